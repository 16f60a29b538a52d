//! Storage key derivation.
//!
//! # Responsibility
//! - Map `(ResourceKind, owner)` to the string key used by the backend.
//! - Recognize keys produced by this module.
//!
//! # Invariants
//! - User-scoped keys are `mamaalert_{tag}_{owner}`; global keys are literals.
//! - Blank owners for user-scoped kinds are rejected, never silently joined.
//! - `parse(key_for(k, o)) == (k, o)` for every accepted input.

use crate::model::resource::{KindScope, OwnerId, ResourceKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Application prefix of every user-scoped key.
pub const KEY_PREFIX: &str = "mamaalert";
const KEY_SEPARATOR: char = '_';

static USER_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\Amamaalert_([a-z]+)_(.+)\z").expect("user key pattern is valid")
});

/// Error raised when a key cannot be derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// A user-scoped kind was addressed without a usable owner id.
    MissingOwner(ResourceKind),
}

impl Display for KeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingOwner(kind) => {
                write!(f, "resource kind `{kind}` requires a non-empty owner id")
            }
        }
    }
}

impl Error for KeyError {}

/// Derived string addressing one value in the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Recovers the kind and owner encoded in `raw`.
    ///
    /// Returns `None` for keys this module never derives.
    pub fn parse(raw: &str) -> Option<(ResourceKind, Option<OwnerId>)> {
        if let Some(kind) = ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.global_key() == Some(raw))
        {
            return Some((kind, None));
        }

        let captures = USER_KEY_PATTERN.captures(raw)?;
        let kind = ResourceKind::from_tag(captures.get(1)?.as_str())?;
        let owner = OwnerId::parse(captures.get(2)?.as_str())?;
        Some((kind, Some(owner)))
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the storage key for `kind`, owned by `owner` when user-scoped.
///
/// Global kinds ignore `owner` entirely.
///
/// # Errors
/// - `KeyError::MissingOwner` when a user-scoped kind gets `None` or a blank
///   owner.
pub fn key_for(kind: ResourceKind, owner: Option<&str>) -> Result<StorageKey, KeyError> {
    match (kind.scope(), kind.tag(), kind.global_key()) {
        (KindScope::Global, _, Some(literal)) => Ok(StorageKey(literal.to_string())),
        (KindScope::User, Some(tag), _) => {
            let owner = owner
                .and_then(OwnerId::parse)
                .ok_or(KeyError::MissingOwner(kind))?;
            Ok(StorageKey(format!(
                "{KEY_PREFIX}{KEY_SEPARATOR}{tag}{KEY_SEPARATOR}{owner}"
            )))
        }
        _ => unreachable!("every kind carries either a tag or a global key"),
    }
}
