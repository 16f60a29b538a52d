//! Core persistence logic for MamaAlert.
//! This crate owns storage-key addressing and failure-safe key-value access.

pub mod db;
pub mod logging;
pub mod model;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::key::{key_for, KeyError, StorageKey, KEY_PREFIX};
pub use model::resource::{KindScope, OwnerId, ResourceKind};
pub use store::memory::MemoryBackend;
pub use store::namespaced::NamespacedStore;
pub use store::sqlite::SqliteBackend;
pub use store::{KvBackend, StorageFault, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
