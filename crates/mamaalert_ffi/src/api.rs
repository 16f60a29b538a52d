//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose key derivation and the namespaced store to Dart via FRB.
//! - Keep return shapes flat: strings, options and booleans.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Store calls keep the core contract: absence or `false` on any fault,
//!   including failure to open the database file.

use log::warn;
use mamaalert_core::db::open_db;
use mamaalert_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, key_for,
    ping as ping_inner, NamespacedStore, ResourceKind, SqliteBackend,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const STORE_DB_FILE_NAME: &str = "mamaalert_store.sqlite3";
const STORE_DB_PATH_ENV: &str = "MAMAALERT_DB_PATH";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for rolling logs.
/// - Returns empty string on success, error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Key derivation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeyResponse {
    /// Whether a key was derived.
    pub ok: bool,
    /// Derived key when `ok`.
    pub key: Option<String>,
    /// Human-readable diagnostics; empty on success.
    pub message: String,
}

/// Derives the storage key for a snake_case kind name and optional owner.
///
/// # FFI contract
/// - Sync, pure, no storage access.
/// - Unknown kinds and blank owners for user-scoped kinds return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn storage_key(kind: String, owner_id: Option<String>) -> StorageKeyResponse {
    let Some(resource) = ResourceKind::from_name(&kind) else {
        return StorageKeyResponse {
            ok: false,
            key: None,
            message: format!("unknown resource kind `{}`", kind.trim()),
        };
    };

    match key_for(resource, owner_id.as_deref()) {
        Ok(key) => StorageKeyResponse {
            ok: true,
            key: Some(key.into_string()),
            message: String::new(),
        },
        Err(err) => StorageKeyResponse {
            ok: false,
            key: None,
            message: err.to_string(),
        },
    }
}

/// Reads a stored value; `None` when absent or storage is unusable.
#[flutter_rust_bridge::frb(sync)]
pub fn store_read(key: String) -> Option<String> {
    with_store("store_read", |store| store.read(&key)).flatten()
}

/// Writes a value; `false` when storage is unusable.
#[flutter_rust_bridge::frb(sync)]
pub fn store_write(key: String, value: String) -> bool {
    with_store("store_write", |store| store.write(&key, &value)).unwrap_or(false)
}

/// Removes a value; idempotent, `false` when storage is unusable.
#[flutter_rust_bridge::frb(sync)]
pub fn store_remove(key: String) -> bool {
    with_store("store_remove", |store| store.remove(&key)).unwrap_or(false)
}

/// Removes every user-scoped record of `owner_id` (sign-out).
#[flutter_rust_bridge::frb(sync)]
pub fn store_clear_owner(owner_id: String) -> bool {
    with_store("store_clear_owner", |store| store.clear_owner(&owner_id)).unwrap_or(false)
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(STORE_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

/// Opens the store database for one call; `None` when it cannot be opened.
fn with_store<T>(
    event: &str,
    f: impl FnOnce(&NamespacedStore<SqliteBackend<'_>>) -> T,
) -> Option<T> {
    let conn = match open_db(resolve_store_db_path()) {
        Ok(conn) => conn,
        Err(err) => {
            warn!(
                "event={event} module=ffi status=error error_code=store_unavailable error={err}"
            );
            return None;
        }
    };
    let store = NamespacedStore::new(SqliteBackend::new(&conn));
    Some(f(&store))
}
