use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::members::MemberEntity,
    ledger::MembershipLedger,
    value_objects::enums::{effective_statuses::EffectiveStatus, member_statuses::MemberStatus},
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MemberDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub membership_plan_id: Uuid,
    pub membership_type: String,
    pub membership_price: i64,
    pub amount_paid: i64,
    pub pending_amount: i64,
    pub join_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub days_until_expiry: i64,
    pub status: MemberStatus,
    pub effective_status: EffectiveStatus,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub notes: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemberDto {
    pub fn from_entity(value: MemberEntity, ledger: &MembershipLedger) -> Self {
        let effective_status = ledger.effective_status(&value);
        let pending_amount = MembershipLedger::pending_amount(&value);
        let days_until_expiry = ledger.days_until(value.expiry_date);
        let name = value.full_name();

        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            name,
            email: value.email,
            phone: value.phone,
            membership_plan_id: value.membership_plan_id,
            membership_type: value.membership_type,
            membership_price: value.membership_price,
            amount_paid: value.amount_paid,
            pending_amount,
            join_date: value.join_date,
            expiry_date: value.expiry_date,
            days_until_expiry,
            status: MemberStatus::from_str(&value.status).unwrap_or(MemberStatus::Inactive),
            effective_status,
            emergency_contact: value.emergency_contact,
            emergency_phone: value.emergency_phone,
            notes: value.notes,
            avatar_url: value.avatar_url,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMemberModel {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub membership_plan_id: Uuid,
    /// Defaults to the full plan price.
    pub amount_paid: Option<i64>,
    /// `YYYY-MM-DD`; defaults to today.
    pub join_date: Option<String>,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub notes: Option<String>,
    pub avatar_url: Option<String>,
}

impl CreateMemberModel {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("emergency_contact", &self.emergency_contact),
            ("emergency_phone", &self.emergency_phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberModel {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub membership_price: Option<i64>,
    pub amount_paid: Option<i64>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub notes: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateMemberModel {
    /// Required text fields that are present in the patch but blank.
    pub fn blanked_fields(&self) -> Vec<&'static str> {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("emergency_contact", &self.emergency_contact),
            ("emergency_phone", &self.emergency_phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
        .map(|(field, _)| field)
        .collect()
    }
}

/// Re-enrollment onto a plan; starts a fresh term and a fresh balance.
#[derive(Debug, Clone, Deserialize)]
pub struct RenewMembershipModel {
    pub membership_plan_id: Uuid,
    pub join_date: Option<String>,
    pub amount_paid: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMembersQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExpiryPreviewQuery {
    pub expiry_date: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MemberStatusFilter {
    #[default]
    All,
    Effective(EffectiveStatus),
    PendingPayment,
}

impl MemberStatusFilter {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(MemberStatusFilter::All),
            "pending_payment" => Some(MemberStatusFilter::PendingPayment),
            other => EffectiveStatus::from_str(other).map(MemberStatusFilter::Effective),
        }
    }

    pub fn matches(&self, ledger: &MembershipLedger, member: &MemberEntity) -> bool {
        match self {
            MemberStatusFilter::All => true,
            MemberStatusFilter::Effective(status) => ledger.effective_status(member) == *status,
            MemberStatusFilter::PendingPayment => MembershipLedger::has_pending_payment(member),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberListFilter {
    pub search: Option<String>,
    pub status: MemberStatusFilter,
}

impl MemberListFilter {
    pub fn by_status(status: MemberStatusFilter) -> Self {
        Self {
            search: None,
            status,
        }
    }

    /// Case-insensitive substring search over name, email and phone, plus the status filter.
    pub fn matches(&self, ledger: &MembershipLedger, member: &MemberEntity) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                member.full_name().to_lowercase().contains(&term)
                    || member.email.to_lowercase().contains(&term)
                    || member.phone.contains(&term)
            }
        };

        matches_search && self.status.matches(ledger, member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn member(expiry_offset_days: i64, status: &str, paid: i64, today: NaiveDate) -> MemberEntity {
        let now = Utc::now();
        MemberEntity {
            id: Uuid::new_v4(),
            first_name: "Priya".to_string(),
            last_name: "Sharma".to_string(),
            email: "Priya.Sharma@example.com".to_string(),
            phone: "9876543210".to_string(),
            membership_plan_id: Uuid::new_v4(),
            membership_type: "Single - 1 Month".to_string(),
            membership_price: 2500,
            amount_paid: paid,
            pending_amount: 0,
            join_date: today - Duration::days(20),
            expiry_date: today + Duration::days(expiry_offset_days),
            status: status.to_string(),
            emergency_contact: "Raj Sharma".to_string(),
            emergency_phone: "9123456789".to_string(),
            notes: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn dto_carries_recomputed_balance_and_status() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let ledger = MembershipLedger::new(today);
        let mut entity = member(3, "active", 1500, today);
        entity.pending_amount = 0;

        let dto = MemberDto::from_entity(entity, &ledger);

        assert_eq!(dto.name, "Priya Sharma");
        assert_eq!(dto.pending_amount, 1000);
        assert_eq!(dto.days_until_expiry, 3);
        assert_eq!(dto.status, MemberStatus::Active);
        assert_eq!(dto.effective_status, EffectiveStatus::ExpiringSoon);
    }

    #[test]
    fn parses_status_filters() {
        assert_eq!(MemberStatusFilter::from_str("all"), Some(MemberStatusFilter::All));
        assert_eq!(
            MemberStatusFilter::from_str("pending_payment"),
            Some(MemberStatusFilter::PendingPayment)
        );
        assert_eq!(
            MemberStatusFilter::from_str("Expiring_Soon"),
            Some(MemberStatusFilter::Effective(EffectiveStatus::ExpiringSoon))
        );
        assert_eq!(MemberStatusFilter::from_str("gold"), None);
    }

    #[test]
    fn filters_on_effective_status_not_stored_status() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let ledger = MembershipLedger::new(today);
        let expired_but_stored_active = member(-2, "active", 2500, today);

        let active = MemberListFilter::by_status(MemberStatusFilter::Effective(
            EffectiveStatus::Active,
        ));
        let expired = MemberListFilter::by_status(MemberStatusFilter::Effective(
            EffectiveStatus::Expired,
        ));

        assert!(!active.matches(&ledger, &expired_but_stored_active));
        assert!(expired.matches(&ledger, &expired_but_stored_active));
    }

    #[test]
    fn search_is_case_insensitive_over_name_email_and_phone() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let ledger = MembershipLedger::new(today);
        let entity = member(60, "active", 2500, today);

        for term in ["priya", "SHARMA", "priya s", "example.com", "98765"] {
            let filter = MemberListFilter {
                search: Some(term.to_string()),
                status: MemberStatusFilter::All,
            };
            assert!(filter.matches(&ledger, &entity), "search {term:?} should match");
        }

        let miss = MemberListFilter {
            search: Some("kumar".to_string()),
            status: MemberStatusFilter::All,
        };
        assert!(!miss.matches(&ledger, &entity));
    }

    #[test]
    fn pending_payment_filter_uses_recomputed_balance() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let ledger = MembershipLedger::new(today);
        let filter = MemberListFilter::by_status(MemberStatusFilter::PendingPayment);

        let mut owes = member(60, "active", 1000, today);
        owes.pending_amount = 0;
        let settled = member(60, "active", 2500, today);

        assert!(filter.matches(&ledger, &owes));
        assert!(!filter.matches(&ledger, &settled));
    }

    #[test]
    fn reports_missing_required_fields() {
        let model = CreateMemberModel {
            first_name: "Priya".to_string(),
            last_name: " ".to_string(),
            email: "priya@example.com".to_string(),
            phone: "".to_string(),
            membership_plan_id: Uuid::new_v4(),
            amount_paid: None,
            join_date: None,
            emergency_contact: "Raj".to_string(),
            emergency_phone: "".to_string(),
            notes: None,
            avatar_url: None,
        };

        assert_eq!(
            model.missing_fields(),
            vec!["last_name", "phone", "emergency_phone"]
        );
    }
}
