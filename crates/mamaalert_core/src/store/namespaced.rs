//! Failure-tolerant façade over a key-value backend.
//!
//! # Responsibility
//! - Give presentation callers read/write/remove that cannot fail loudly.
//! - Offer kind-addressed and JSON-typed conveniences on top.
//!
//! # Invariants
//! - No `StorageFault` ever reaches a caller: reads degrade to `None`,
//!   writes/removes degrade to `false`, and the fault is logged.
//! - Faults are never retried.
//! - Log events carry the resource kind name, never owner ids or values.
//!
//! # See also
//! - `model::key` for key derivation.

use super::{KvBackend, StorageFault};
use crate::model::key::{key_for, StorageKey};
use crate::model::resource::ResourceKind;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Stateless wrapper; the injected backend is the system of record.
pub struct NamespacedStore<B: KvBackend> {
    backend: B,
}

impl<B: KvBackend> NamespacedStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Returns the stored value, or `None` when absent or on any fault.
    pub fn read(&self, key: impl AsRef<str>) -> Option<String> {
        let key = key.as_ref();
        match self.backend.get(key) {
            Ok(value) => value,
            Err(fault) => {
                log_fault("store_read", key, &fault);
                None
            }
        }
    }

    /// Persists `value` under `key`; returns `false` on any fault.
    pub fn write(&self, key: impl AsRef<str>, value: &str) -> bool {
        let key = key.as_ref();
        match self.backend.set(key, value) {
            Ok(()) => true,
            Err(fault) => {
                log_fault("store_write", key, &fault);
                false
            }
        }
    }

    /// Deletes `key`; succeeds when it was already absent.
    pub fn remove(&self, key: impl AsRef<str>) -> bool {
        let key = key.as_ref();
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(fault) => {
                log_fault("store_remove", key, &fault);
                false
            }
        }
    }

    /// Reads and decodes a JSON record; undecodable blobs count as absent.
    pub fn read_json<T: DeserializeOwned>(&self, key: impl AsRef<str>) -> Option<T> {
        let key = key.as_ref();
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=store_read_json module=store status=error kind={} error_code=decode_failed error={}",
                    kind_label(key),
                    err
                );
                None
            }
        }
    }

    /// Encodes `value` as JSON and writes it.
    pub fn write_json<T: Serialize + ?Sized>(&self, key: impl AsRef<str>, value: &T) -> bool {
        let key = key.as_ref();
        match serde_json::to_string(value) {
            Ok(raw) => self.write(key, &raw),
            Err(err) => {
                warn!(
                    "event=store_write_json module=store status=error kind={} error_code=encode_failed error={}",
                    kind_label(key),
                    err
                );
                false
            }
        }
    }

    /// Derives the key for `kind`/`owner` and reads it.
    pub fn read_kind(&self, kind: ResourceKind, owner: Option<&str>) -> Option<String> {
        let key = derive_or_log("store_read", kind, owner)?;
        self.read(&key)
    }

    /// Derives the key for `kind`/`owner` and writes `value` to it.
    pub fn write_kind(&self, kind: ResourceKind, owner: Option<&str>, value: &str) -> bool {
        match derive_or_log("store_write", kind, owner) {
            Some(key) => self.write(&key, value),
            None => false,
        }
    }

    /// Derives the key for `kind`/`owner` and removes it.
    pub fn remove_kind(&self, kind: ResourceKind, owner: Option<&str>) -> bool {
        match derive_or_log("store_remove", kind, owner) {
            Some(key) => self.remove(&key),
            None => false,
        }
    }

    /// Removes every user-scoped resource of `owner`.
    ///
    /// Every removal is attempted; returns `true` only if all succeeded.
    /// Global settings are left untouched.
    pub fn clear_owner(&self, owner: &str) -> bool {
        let mut all_removed = true;
        for kind in ResourceKind::USER_SCOPED {
            all_removed &= self.remove_kind(kind, Some(owner));
        }
        debug!(
            "event=store_clear_owner module=store status={} kinds={}",
            if all_removed { "ok" } else { "partial" },
            ResourceKind::USER_SCOPED.len()
        );
        all_removed
    }
}

fn derive_or_log(event: &str, kind: ResourceKind, owner: Option<&str>) -> Option<StorageKey> {
    match key_for(kind, owner) {
        Ok(key) => Some(key),
        Err(err) => {
            warn!(
                "event={} module=store status=error kind={} error_code=invalid_key error={}",
                event, kind, err
            );
            None
        }
    }
}

fn log_fault(event: &str, key: &str, fault: &StorageFault) {
    warn!(
        "event={} module=store status=error kind={} error_code={} error={}",
        event,
        kind_label(key),
        fault.code(),
        fault
    );
}

fn kind_label(key: &str) -> &'static str {
    StorageKey::parse(key).map_or("unknown", |(kind, _)| kind.name())
}
