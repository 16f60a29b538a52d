use mamaalert_core::{
    key_for, KvBackend, MemoryBackend, NamespacedStore, ResourceKind, StorageFault, StoreResult,
};
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Backend whose writes always fail, counting how often it is called.
#[derive(Default)]
struct FailingWrites {
    inner: MemoryBackend,
    set_calls: Cell<usize>,
}

impl KvBackend for FailingWrites {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        self.set_calls.set(self.set_calls.get() + 1);
        Err(StorageFault::Backend("SecurityError".to_string()))
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct EmergencyContact {
    name: String,
    phone: String,
}

#[test]
fn write_then_read_returns_value() {
    let store = NamespacedStore::new(MemoryBackend::new());
    let key = key_for(ResourceKind::BabyProfile, Some("user-1")).unwrap();

    assert!(store.write(&key, "{\"name\":\"Ada\"}"));
    assert_eq!(store.read(&key).as_deref(), Some("{\"name\":\"Ada\"}"));
}

#[test]
fn last_write_wins() {
    let store = NamespacedStore::new(MemoryBackend::new());
    assert!(store.write("mamaalert-mode", "light"));
    assert!(store.write("mamaalert-mode", "dark"));
    assert_eq!(store.read("mamaalert-mode").as_deref(), Some("dark"));
}

#[test]
fn read_of_unwritten_key_is_absent() {
    let store = NamespacedStore::new(MemoryBackend::new());
    assert!(store.read("mamaalert_plan_user-1").is_none());
}

#[test]
fn remove_is_idempotent() {
    let store = NamespacedStore::new(MemoryBackend::new());
    store.write("mamaalert-onboarding", "true");

    assert!(store.remove("mamaalert-onboarding"));
    assert!(store.remove("mamaalert-onboarding"));
    assert!(store.read("mamaalert-onboarding").is_none());
}

#[test]
fn disabled_storage_degrades_to_absent_and_false() {
    let backend = MemoryBackend::new();
    backend.set("mamaalert-theme", "dark").unwrap();
    backend.set_disabled(true);
    let store = NamespacedStore::new(&backend);

    assert!(store.read("mamaalert-theme").is_none());
    assert!(!store.write("mamaalert-theme", "light"));
    assert!(!store.remove("mamaalert-theme"));
    assert!(!store.remove("mamaalert-theme"));
}

#[test]
fn quota_exceeded_write_returns_false_and_leaves_key_absent() {
    let store = NamespacedStore::new(MemoryBackend::with_quota(32));
    let key = key_for(ResourceKind::SymptomLogs, Some("user-7")).unwrap();

    assert!(!store.write(&key, &"x".repeat(64)));
    assert!(store.read(&key).is_none());
}

#[test]
fn failing_set_is_contained_and_not_retried() {
    let store = NamespacedStore::new(FailingWrites::default());

    assert!(!store.write("mamaalert-theme", "dark"));
    assert_eq!(store.backend().set_calls.get(), 1);
    assert!(store.read("mamaalert-theme").is_none());
}

#[test]
fn json_records_roundtrip() {
    let store = NamespacedStore::new(MemoryBackend::new());
    let key = key_for(ResourceKind::EmergencyContacts, Some("user-3")).unwrap();
    let contacts = vec![
        EmergencyContact {
            name: "Midwife".to_string(),
            phone: "+254700000001".to_string(),
        },
        EmergencyContact {
            name: "Partner".to_string(),
            phone: "+254700000002".to_string(),
        },
    ];

    assert!(store.write_json(&key, &contacts));
    let loaded: Vec<EmergencyContact> = store.read_json(&key).unwrap();
    assert_eq!(loaded, contacts);
}

#[test]
fn malformed_json_reads_as_absent() {
    let store = NamespacedStore::new(MemoryBackend::new());
    store.write("mamaalert_contacts_user-3", "{not json");

    let loaded: Option<Vec<EmergencyContact>> = store.read_json("mamaalert_contacts_user-3");
    assert!(loaded.is_none());
    assert_eq!(
        store.read("mamaalert_contacts_user-3").as_deref(),
        Some("{not json")
    );
}

#[test]
fn kind_helpers_address_the_derived_key() {
    let store = NamespacedStore::new(MemoryBackend::new());

    assert!(store.write_kind(ResourceKind::HospitalBag, Some("user-9"), "[]"));
    assert_eq!(
        store.read("mamaalert_hospitalbag_user-9").as_deref(),
        Some("[]")
    );
    assert_eq!(
        store
            .read_kind(ResourceKind::HospitalBag, Some("user-9"))
            .as_deref(),
        Some("[]")
    );
    assert!(store.remove_kind(ResourceKind::HospitalBag, Some("user-9")));
    assert!(store
        .read_kind(ResourceKind::HospitalBag, Some("user-9"))
        .is_none());
}

#[test]
fn clear_owner_removes_only_that_owners_records() {
    let store = NamespacedStore::new(MemoryBackend::new());
    for kind in ResourceKind::USER_SCOPED {
        assert!(store.write_kind(kind, Some("leaving"), "v"));
        assert!(store.write_kind(kind, Some("staying"), "v"));
    }
    assert!(store.write_kind(ResourceKind::Theme, None, "dark"));

    assert!(store.clear_owner("leaving"));

    for kind in ResourceKind::USER_SCOPED {
        assert!(store.read_kind(kind, Some("leaving")).is_none());
        assert_eq!(store.read_kind(kind, Some("staying")).as_deref(), Some("v"));
    }
    assert_eq!(
        store.read_kind(ResourceKind::Theme, None).as_deref(),
        Some("dark")
    );
}

#[test]
fn clear_owner_reports_failure_when_storage_is_disabled() {
    let backend = MemoryBackend::new();
    backend.set_disabled(true);
    let store = NamespacedStore::new(backend);

    assert!(!store.clear_owner("user-1"));
    assert!(!store.clear_owner(""));
}
