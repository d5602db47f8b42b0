use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

use super::UserError;
use crate::domain::{MaskedUser, UserCreate, UserPatch, UserRow};
use crate::masking::PhoneMasker;
use crate::storage::TableStorage;

const ID_PREFIX: &str = "U_";

/// Result of an update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(String),
    /// Nothing recognisable to apply; storage was not touched.
    NoChanges,
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::Updated(id) => write!(f, "user {} updated successfully.", id),
            UpdateOutcome::NoChanges => write!(f, "No updatable fields provided."),
        }
    }
}

/// Synchronous record store.
///
/// Holds no rows of its own: every call reloads the table and every mutation
/// rewrites it. Each call runs its load-mutate-rewrite cycle under one
/// exclusive guard, so callers sharing a store are serialized. Other processes
/// writing the same file are not coordinated; the last rewrite wins.
pub struct UserStore<S> {
    storage: S,
    masker: PhoneMasker,
    lock: Mutex<()>,
}

impl<S: TableStorage> UserStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_masker(storage, PhoneMasker::default())
    }

    pub fn with_masker(storage: S, masker: PhoneMasker) -> Self {
        Self {
            storage,
            masker,
            lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn exclusive(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data, so a poisoned lock is still usable.
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Looks up one user and masks email and phone.
    ///
    /// An unknown id, or an empty table, is `Ok(None)` rather than an error.
    #[instrument(skip(self))]
    pub fn read_user(&self, user_id: &str) -> Result<Option<MaskedUser>, UserError> {
        let _guard = self.exclusive();
        let rows = self.storage.load_all()?;

        match rows.into_iter().find(|row| row.user_id == user_id) {
            Some(row) => {
                debug!("User found");
                Ok(Some(self.masker.mask_row(row)))
            }
            None => {
                debug!("User not found");
                Ok(None)
            }
        }
    }

    /// Appends a user under the next free id and returns that id.
    #[instrument(skip(self, payload))]
    pub fn add_user(&self, payload: UserCreate) -> Result<String, UserError> {
        let _guard = self.exclusive();
        let mut rows = self.storage.load_all()?;

        let user_id = next_user_id(&rows);
        rows.push(UserRow::from_create(user_id.clone(), payload));
        self.storage.replace_all(&rows)?;

        info!(user_id = %user_id, "User created");
        Ok(user_id)
    }

    /// Overwrites the patched columns of `user_id`.
    ///
    /// An empty patch returns [`UpdateOutcome::NoChanges`] without touching
    /// storage. An unknown id is [`UserError::NotFound`].
    #[instrument(skip(self, patch))]
    pub fn update_user(&self, user_id: &str, patch: UserPatch) -> Result<UpdateOutcome, UserError> {
        if patch.is_empty() {
            debug!("No updatable fields, skipping write");
            return Ok(UpdateOutcome::NoChanges);
        }

        let _guard = self.exclusive();
        let mut rows = self.storage.load_all()?;

        let mut matched = rows.iter_mut().filter(|row| row.user_id == user_id).peekable();
        if matched.peek().is_none() {
            return Err(UserError::NotFound(user_id.to_string()));
        }
        for row in matched {
            row.apply(patch.clone());
        }
        self.storage.replace_all(&rows)?;

        info!("User updated");
        Ok(UpdateOutcome::Updated(user_id.to_string()))
    }
}

/// `U_` followed by one more than the largest numeric suffix present,
/// zero-padded to four digits. Ids that are not `U_<digits>` are skipped.
///
/// Suffixes are compared and incremented as decimal strings, so there is no
/// width at which the sequence wraps or repeats.
pub fn next_user_id(rows: &[UserRow]) -> String {
    let next = rows
        .iter()
        .filter_map(|row| {
            let parsed = id_suffix(&row.user_id);
            if parsed.is_none() {
                warn!(user_id = %row.user_id, "Ignoring malformed user id");
            }
            parsed
        })
        .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        .map_or_else(|| "1".to_string(), increment);
    format!("{ID_PREFIX}{next:0>4}")
}

/// Digits after the prefix with leading zeros stripped; `U_0000` yields "".
fn id_suffix(user_id: &str) -> Option<&str> {
    let digits = user_id.strip_prefix(ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.trim_start_matches('0'))
}

fn increment(digits: &str) -> String {
    let mut out: Vec<char> = digits.chars().collect();
    for digit in out.iter_mut().rev() {
        if *digit == '9' {
            *digit = '0';
        } else {
            *digit = char::from(*digit as u8 + 1);
            return out.into_iter().collect();
        }
    }
    out.insert(0, '1');
    out.into_iter().collect()
}
