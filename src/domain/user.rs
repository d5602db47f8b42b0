use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column order of the backing table. Every row has exactly these columns.
pub const COLUMNS: [&str; 6] = ["user_id", "name", "age", "city", "email", "phone_number"];

/// Fields a caller may supply on create or update. `user_id` is never client supplied.
pub const USER_FIELDS: [&str; 5] = ["name", "age", "city", "email", "phone_number"];

/// A user as it is persisted: every value is text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub user_id: String,
    pub name: String,
    pub age: String,
    pub city: String,
    pub email: String,
    pub phone_number: String,
}

impl UserRow {
    /// Builds the row for a freshly generated id.
    pub fn from_create(user_id: String, payload: UserCreate) -> Self {
        Self {
            user_id,
            name: payload.name,
            age: payload.age,
            city: payload.city,
            email: payload.email,
            phone_number: payload.phone_number,
        }
    }

    /// Overwrites only the columns named in the patch.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
    }

    /// Values in [`COLUMNS`] order.
    pub fn to_record(&self) -> [&str; 6] {
        [
            self.user_id.as_str(),
            self.name.as_str(),
            self.age.as_str(),
            self.city.as_str(),
            self.email.as_str(),
            self.phone_number.as_str(),
        ]
    }
}

/// Payload for creating a new user.
///
/// Values are coerced to text on construction; the store keeps no typed columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCreate {
    pub name: String,
    pub age: String,
    pub city: String,
    pub email: String,
    pub phone_number: String,
}

impl UserCreate {
    pub fn new(
        name: impl Into<String>,
        age: impl ToString,
        city: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age: age.to_string(),
            city: city.into(),
            email: email.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Builds a payload from a loose field mapping.
    ///
    /// Extra keys are ignored. On failure returns the names of every missing
    /// required field, sorted in column order.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, Vec<String>> {
        let missing: Vec<String> = USER_FIELDS
            .iter()
            .filter(|key| !fields.contains_key(**key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let take = |key: &str| fields.get(key).cloned().unwrap_or_default();
        Ok(Self {
            name: take("name"),
            age: take("age"),
            city: take("city"),
            email: take("email"),
            phone_number: take("phone_number"),
        })
    }
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub age: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl UserPatch {
    /// Keeps only recognised keys; anything else is dropped silently.
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        let mut patch = Self::default();
        for (key, value) in fields {
            match key.as_str() {
                "name" => patch.name = Some(value),
                "age" => patch.age = Some(value),
                "city" => patch.city = Some(value),
                "email" => patch.email = Some(value),
                "phone_number" => patch.phone_number = Some(value),
                _ => {}
            }
        }
        patch
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.city.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: impl ToString) -> Self {
        self.age = Some(age.to_string());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }
}

/// A user as returned to callers, with email and phone redacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskedUser {
    pub user_id: String,
    pub name: String,
    pub age: String,
    pub city: String,
    pub email: String,
    pub phone_number: String,
}
