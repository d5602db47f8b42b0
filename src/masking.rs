//! Irreversible redaction of the sensitive user fields.
//!
//! Both functions are pure and deterministic: the same input always yields
//! the same masked output.

use crate::domain::{MaskedUser, UserRow};

pub const DEFAULT_COUNTRY_CODE: &str = "91";

const MASK_SUFFIX: &str = "XXXX";

/// Masks an address into `{local3}XXXX@{domain3}XXXX`.
///
/// The domain extension is dropped. Input without `@` is returned unchanged.
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return email.to_string();
    };
    let domain_base = domain.split_once('.').map_or(domain, |(base, _)| base);

    format!(
        "{}{MASK_SUFFIX}@{}{MASK_SUFFIX}",
        prefix_lowercase(local, 3),
        prefix_lowercase(domain_base, 3)
    )
}

fn prefix_lowercase(value: &str, len: usize) -> String {
    value.chars().take(len).collect::<String>().to_lowercase()
}

/// Phone masking with a configurable country code prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMasker {
    country_code: String,
}

impl Default for PhoneMasker {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY_CODE)
    }
}

impl PhoneMasker {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
        }
    }

    /// Masks all but a few digits of `phone`.
    ///
    /// Digits are any Unicode numeric characters, not only ASCII ones, so a
    /// number written in another script is masked the same way.
    /// With ten or more digits the last ten are rendered as
    /// `+{cc}-{2}XXX-XXX{2}`. Four or fewer digits are returned as given.
    /// Anything in between keeps `max(1, n / 4)` digits visible at each end.
    /// The prefix is always the configured country code, whatever the input carried.
    pub fn mask(&self, phone: &str) -> String {
        let digits: Vec<char> = phone.chars().filter(|c| c.is_numeric()).collect();
        let count = digits.len();

        if count >= 10 {
            let tail = &digits[count - 10..];
            let first: String = tail[..2].iter().collect();
            let last: String = tail[8..].iter().collect();
            return format!("+{}-{first}XXX-XXX{last}", self.country_code);
        }

        if count <= 4 {
            return phone.to_string();
        }

        let keep = (count / 4).max(1);
        let first: String = digits[..keep].iter().collect();
        let last: String = digits[count - keep..].iter().collect();
        let middle = "X".repeat(count - 2 * keep);
        format!("+{}-{first}{middle}{last}", self.country_code)
    }

    /// Projects a stored row into its caller-facing form.
    pub fn mask_row(&self, row: UserRow) -> MaskedUser {
        MaskedUser {
            email: mask_email(&row.email),
            phone_number: self.mask(&row.phone_number),
            user_id: row.user_id,
            name: row.name,
            age: row.age,
            city: row.city,
        }
    }
}

/// [`PhoneMasker::mask`] with the default country code.
#[allow(dead_code)]
pub fn mask_phone(phone: &str) -> String {
    PhoneMasker::default().mask(phone)
}
