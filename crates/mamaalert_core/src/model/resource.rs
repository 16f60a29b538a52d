//! Resource kinds persisted by the companion app.
//!
//! # Responsibility
//! - Name every persisted resource and classify it as user-scoped or global.
//! - Own the persisted tag/literal for each kind.
//!
//! # Invariants
//! - User-scoped tags are lowercase ASCII letters, mutually distinct, and never
//!   contain the key separator `_`.
//! - Global literal keys never start with the user-scoped prefix.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Whether a resource is stored once per user or once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindScope {
    /// Addressed by kind + owner id.
    User,
    /// Addressed by a fixed literal key.
    Global,
}

/// Logical category of persisted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    PregnancyData,
    BabyProfile,
    EmergencyContacts,
    SymptomLogs,
    Appointments,
    TransportContacts,
    EmergencyPlan,
    HospitalBag,
    Theme,
    Mode,
    Onboarding,
    NotificationPermission,
}

impl ResourceKind {
    /// Every kind, user-scoped first.
    pub const ALL: [ResourceKind; 12] = [
        Self::PregnancyData,
        Self::BabyProfile,
        Self::EmergencyContacts,
        Self::SymptomLogs,
        Self::Appointments,
        Self::TransportContacts,
        Self::EmergencyPlan,
        Self::HospitalBag,
        Self::Theme,
        Self::Mode,
        Self::Onboarding,
        Self::NotificationPermission,
    ];

    /// Kinds that belong to one owner and are wiped on sign-out.
    pub const USER_SCOPED: [ResourceKind; 8] = [
        Self::PregnancyData,
        Self::BabyProfile,
        Self::EmergencyContacts,
        Self::SymptomLogs,
        Self::Appointments,
        Self::TransportContacts,
        Self::EmergencyPlan,
        Self::HospitalBag,
    ];

    pub fn scope(self) -> KindScope {
        match self {
            Self::Theme | Self::Mode | Self::Onboarding | Self::NotificationPermission => {
                KindScope::Global
            }
            _ => KindScope::User,
        }
    }

    pub fn is_user_scoped(self) -> bool {
        self.scope() == KindScope::User
    }

    /// Persisted segment for user-scoped kinds; `None` for global kinds.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Self::PregnancyData => Some("pregnancy"),
            Self::BabyProfile => Some("baby"),
            Self::EmergencyContacts => Some("contacts"),
            Self::SymptomLogs => Some("symptoms"),
            Self::Appointments => Some("appointments"),
            Self::TransportContacts => Some("transport"),
            Self::EmergencyPlan => Some("plan"),
            Self::HospitalBag => Some("hospitalbag"),
            Self::Theme | Self::Mode | Self::Onboarding | Self::NotificationPermission => None,
        }
    }

    /// Fixed storage key for global kinds; `None` for user-scoped kinds.
    pub fn global_key(self) -> Option<&'static str> {
        match self {
            Self::Theme => Some("mamaalert-theme"),
            Self::Mode => Some("mamaalert-mode"),
            Self::Onboarding => Some("mamaalert-onboarding"),
            Self::NotificationPermission => Some("mamaalert-notification-permission"),
            _ => None,
        }
    }

    /// Stable snake_case name, matching the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            Self::PregnancyData => "pregnancy_data",
            Self::BabyProfile => "baby_profile",
            Self::EmergencyContacts => "emergency_contacts",
            Self::SymptomLogs => "symptom_logs",
            Self::Appointments => "appointments",
            Self::TransportContacts => "transport_contacts",
            Self::EmergencyPlan => "emergency_plan",
            Self::HospitalBag => "hospital_bag",
            Self::Theme => "theme",
            Self::Mode => "mode",
            Self::Onboarding => "onboarding",
            Self::NotificationPermission => "notification_permission",
        }
    }

    /// Looks a kind up by its snake_case name (case-insensitive, trimmed).
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
    }

    /// Looks a user-scoped kind up by its persisted tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::USER_SCOPED
            .into_iter()
            .find(|kind| kind.tag() == Some(tag))
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of the user owning a user-scoped resource.
///
/// Issued by the external auth provider; only blank values are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    /// Wraps `raw` unless it is empty or whitespace-only.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for OwnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{KindScope, OwnerId, ResourceKind};
    use std::collections::HashSet;

    #[test]
    fn tags_are_distinct_and_separator_free() {
        let mut seen = HashSet::new();
        for kind in ResourceKind::USER_SCOPED {
            let tag = kind.tag().expect("user-scoped kinds carry a tag");
            assert!(tag.chars().all(|c| c.is_ascii_lowercase()), "{tag}");
            assert!(seen.insert(tag), "duplicate tag {tag}");
        }
    }

    #[test]
    fn scope_matches_tag_and_global_key_presence() {
        for kind in ResourceKind::ALL {
            match kind.scope() {
                KindScope::User => {
                    assert!(kind.tag().is_some());
                    assert!(kind.global_key().is_none());
                }
                KindScope::Global => {
                    assert!(kind.tag().is_none());
                    assert!(kind.global_key().is_some());
                }
            }
        }
    }

    #[test]
    fn names_roundtrip_through_lookup() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(
            ResourceKind::from_name(" Hospital_Bag "),
            Some(ResourceKind::HospitalBag)
        );
        assert_eq!(ResourceKind::from_name("calendar"), None);
    }

    #[test]
    fn serde_name_matches_name() {
        let encoded = serde_json::to_string(&ResourceKind::NotificationPermission).unwrap();
        assert_eq!(encoded, "\"notification_permission\"");
    }

    #[test]
    fn owner_id_rejects_blank_values() {
        assert!(OwnerId::parse("").is_none());
        assert!(OwnerId::parse("   ").is_none());
        assert_eq!(OwnerId::parse("user_42").unwrap().as_str(), "user_42");
    }
}
