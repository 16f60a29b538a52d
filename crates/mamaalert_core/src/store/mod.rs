//! Key-value backend contract and implementations.
//!
//! # Responsibility
//! - Define the synchronous backend contract the store façade is built on.
//! - Provide in-memory and SQLite backends.
//! - Provide the fault-swallowing namespaced façade.
//!
//! # Invariants
//! - Backends surface every failure as `StorageFault`; they never panic.
//! - Removing a missing key succeeds.
//! - Only the façade decides how faults reach callers (they do not).

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod namespaced;
pub mod sqlite;

pub type StoreResult<T> = Result<T, StorageFault>;

/// Any failure raised by the underlying key-value backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageFault {
    /// Storage is disabled or cannot be reached.
    Unavailable(String),
    /// The write would grow the store past its byte quota.
    QuotaExceeded { needed_bytes: usize, quota_bytes: usize },
    /// The backend engine reported an error.
    Backend(String),
}

impl StorageFault {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "storage_unavailable",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::Backend(_) => "backend_error",
        }
    }
}

impl Display for StorageFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::QuotaExceeded {
                needed_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded: need {needed_bytes} bytes, quota is {quota_bytes} bytes"
            ),
            Self::Backend(message) => write!(f, "storage backend error: {message}"),
        }
    }
}

impl Error for StorageFault {}

impl From<rusqlite::Error> for StorageFault {
    fn from(value: rusqlite::Error) -> Self {
        Self::Backend(value.to_string())
    }
}

/// Synchronous key-value store the façade delegates to.
///
/// Implementations are the system of record; the façade holds no data.
pub trait KvBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<B: KvBackend + ?Sized> KvBackend for &B {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<B: KvBackend + ?Sized> KvBackend for Box<B> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
