//! In-process key-value backend.
//!
//! Mirrors browser web storage semantics closely enough for tests and
//! ephemeral sessions: optional byte quota and a disabled-storage switch.

use super::{KvBackend, StorageFault, StoreResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Map-backed store; single-threaded by construction.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    disabled: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes growing it past `quota_bytes`.
    ///
    /// Usage is the sum of key and value byte lengths.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Toggles the disabled-storage mode; every call faults while disabled.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Bytes currently counted against the quota.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    fn ensure_enabled(&self) -> StoreResult<()> {
        if self.disabled.get() {
            return Err(StorageFault::Unavailable(
                "in-memory storage is disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.ensure_enabled()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.ensure_enabled()?;

        if let Some(quota_bytes) = self.quota_bytes {
            let replaced = self
                .entries
                .borrow()
                .get(key)
                .map_or(0, |old| key.len() + old.len());
            let needed_bytes = self.used_bytes() - replaced + key.len() + value.len();
            if needed_bytes > quota_bytes {
                return Err(StorageFault::QuotaExceeded {
                    needed_bytes,
                    quota_bytes,
                });
            }
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.ensure_enabled()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryBackend;
    use crate::store::{KvBackend, StorageFault};

    #[test]
    fn quota_counts_replaced_entry_once() {
        let backend = MemoryBackend::with_quota(10);
        backend.set("key", "1234567").unwrap();
        backend.set("key", "7654321").unwrap();
        assert_eq!(backend.used_bytes(), 10);

        let err = backend.set("key", "12345678").unwrap_err();
        assert_eq!(
            err,
            StorageFault::QuotaExceeded {
                needed_bytes: 11,
                quota_bytes: 10,
            }
        );
        assert_eq!(backend.get("key").unwrap().as_deref(), Some("7654321"));
    }

    #[test]
    fn disabled_backend_faults_every_call() {
        let backend = MemoryBackend::new();
        backend.set("key", "value").unwrap();
        backend.set_disabled(true);

        assert!(matches!(backend.get("key"), Err(StorageFault::Unavailable(_))));
        assert!(matches!(backend.set("key", "v"), Err(StorageFault::Unavailable(_))));
        assert!(matches!(backend.remove("key"), Err(StorageFault::Unavailable(_))));

        backend.set_disabled(false);
        assert_eq!(backend.get("key").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn remove_missing_key_succeeds() {
        let backend = MemoryBackend::new();
        backend.remove("absent").unwrap();
        assert!(backend.is_empty());
    }
}
