use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::member_statuses::MemberStatus;

/// Display/filter classification of a member, derived on every read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveStatus {
    Expired,
    ExpiringSoon,
    Active,
    Inactive,
}

impl EffectiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveStatus::Expired => "expired",
            EffectiveStatus::ExpiringSoon => "expiring_soon",
            EffectiveStatus::Active => "active",
            EffectiveStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expired" => Some(EffectiveStatus::Expired),
            "expiring_soon" => Some(EffectiveStatus::ExpiringSoon),
            "active" => Some(EffectiveStatus::Active),
            "inactive" => Some(EffectiveStatus::Inactive),
            _ => None,
        }
    }

    /// Whether the member may use the floor (check in, book classes).
    pub fn grants_access(&self) -> bool {
        matches!(self, EffectiveStatus::Active | EffectiveStatus::ExpiringSoon)
    }
}

impl From<MemberStatus> for EffectiveStatus {
    fn from(value: MemberStatus) -> Self {
        match value {
            MemberStatus::Active => EffectiveStatus::Active,
            MemberStatus::Inactive => EffectiveStatus::Inactive,
        }
    }
}

impl Display for EffectiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_variant_it_prints() {
        for status in [
            EffectiveStatus::Expired,
            EffectiveStatus::ExpiringSoon,
            EffectiveStatus::Active,
            EffectiveStatus::Inactive,
        ] {
            assert_eq!(EffectiveStatus::from_str(&status.to_string()), Some(status));
        }
        assert_eq!(EffectiveStatus::from_str("pending_payment"), None);
    }

    #[test]
    fn only_active_and_expiring_soon_grant_access() {
        assert!(EffectiveStatus::Active.grants_access());
        assert!(EffectiveStatus::ExpiringSoon.grants_access());
        assert!(!EffectiveStatus::Expired.grants_access());
        assert!(!EffectiveStatus::Inactive.grants_access());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&EffectiveStatus::ExpiringSoon).unwrap();
        assert_eq!(json, "\"expiring_soon\"");
    }
}
