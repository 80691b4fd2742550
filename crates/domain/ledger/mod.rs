//! Membership lifecycle and payment reconciliation.
//!
//! Everything here is a pure function of stored member facts and one value of
//! "today". Nothing derived (effective status, pending amount) is written back;
//! callers recompute on every read.

pub mod calendar;
pub mod errors;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    entities::{members::MemberEntity, membership_plans::MembershipPlanEntity},
    value_objects::enums::{effective_statuses::EffectiveStatus, member_statuses::MemberStatus},
};
use calendar::{add_calendar_months, days_between};
use errors::{LedgerError, LedgerResult};

/// Members whose expiry is 1..=7 days away are "expiring soon".
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 7;

/// `max(price - paid, 0)`. Overpayment never produces a negative balance.
pub fn outstanding_balance(membership_price: i64, amount_paid: i64) -> i64 {
    membership_price.saturating_sub(amount_paid).max(0)
}

/// Plan snapshot copied onto a member at (re-)enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub membership_plan_id: Uuid,
    pub membership_type: String,
    pub membership_price: i64,
    pub amount_paid: i64,
    pub pending_amount: i64,
    pub join_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpiryOutlook {
    pub expiry_date: NaiveDate,
    pub days_until_expiry: i64,
    pub is_expired: bool,
    pub is_expiring_soon: bool,
}

/// A ledger bound to one calendar day.
///
/// Build one per request so every member in a response is classified against the
/// same day, even if the request straddles midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipLedger {
    today: NaiveDate,
}

impl MembershipLedger {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Ledger for the host's local calendar day (`TZ` decides which day that is).
    pub fn for_local_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn days_until(&self, expiry_date: NaiveDate) -> i64 {
        days_between(self.today, expiry_date)
    }

    /// A membership stops on its expiry date: the expiry day itself counts as expired.
    pub fn is_expired(&self, expiry_date: NaiveDate) -> bool {
        self.days_until(expiry_date) <= 0
    }

    pub fn is_expiring_soon(&self, expiry_date: NaiveDate) -> bool {
        let days = self.days_until(expiry_date);
        days > 0 && days <= EXPIRING_SOON_WINDOW_DAYS
    }

    pub fn classify(&self, expiry_date: NaiveDate) -> ExpiryOutlook {
        ExpiryOutlook {
            expiry_date,
            days_until_expiry: self.days_until(expiry_date),
            is_expired: self.is_expired(expiry_date),
            is_expiring_soon: self.is_expiring_soon(expiry_date),
        }
    }

    /// Expired, then expiring soon, then whatever the operator stored.
    ///
    /// A stored status outside {active, inactive} reads as inactive.
    pub fn effective_status(&self, member: &MemberEntity) -> EffectiveStatus {
        if self.is_expired(member.expiry_date) {
            return EffectiveStatus::Expired;
        }
        if self.is_expiring_soon(member.expiry_date) {
            return EffectiveStatus::ExpiringSoon;
        }

        MemberStatus::from_str(&member.status)
            .unwrap_or(MemberStatus::Inactive)
            .into()
    }

    pub fn pending_amount(member: &MemberEntity) -> i64 {
        outstanding_balance(member.membership_price, member.amount_paid)
    }

    pub fn has_pending_payment(member: &MemberEntity) -> bool {
        Self::pending_amount(member) > 0
    }

    /// Snapshots `plan` onto a new membership term starting at `join_date`.
    ///
    /// `amount_paid` defaults to the full plan price; an operator recording a
    /// partial payment passes the smaller amount explicitly.
    pub fn enroll(
        plan: &MembershipPlanEntity,
        join_date: NaiveDate,
        amount_paid: Option<i64>,
    ) -> LedgerResult<Enrollment> {
        if plan.name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "membership plan name is required".to_string(),
            ));
        }
        if plan.duration_months < 1 {
            return Err(LedgerError::Validation(format!(
                "membership plan duration must be at least one month, got {}",
                plan.duration_months
            )));
        }
        if plan.price < 0 {
            return Err(LedgerError::Validation(format!(
                "membership plan price must not be negative, got {}",
                plan.price
            )));
        }

        let amount_paid = amount_paid.unwrap_or(plan.price);
        if amount_paid < 0 {
            return Err(LedgerError::Validation(format!(
                "amount paid must not be negative, got {amount_paid}"
            )));
        }

        let expiry_date = add_calendar_months(join_date, plan.duration_months)?;

        Ok(Enrollment {
            membership_plan_id: plan.id,
            membership_type: plan.name.clone(),
            membership_price: plan.price,
            amount_paid,
            pending_amount: outstanding_balance(plan.price, amount_paid),
            join_date,
            expiry_date,
        })
    }

    /// Applies a received payment. `member` is only read; the updated copy is returned.
    pub fn record_payment(member: &MemberEntity, amount: i64) -> LedgerResult<MemberEntity> {
        if amount <= 0 {
            return Err(LedgerError::Validation(format!(
                "payment amount must be positive, got {amount}"
            )));
        }

        let amount_paid = member.amount_paid.checked_add(amount).ok_or_else(|| {
            LedgerError::Validation(format!(
                "payment of {amount} overflows the amount paid by member {}",
                member.id
            ))
        })?;

        let mut updated = member.clone();
        updated.amount_paid = amount_paid;
        updated.pending_amount = outstanding_balance(updated.membership_price, amount_paid);
        Ok(updated)
    }

    /// Pending amount for an operator-edited price/paid pair.
    pub fn rebalance(membership_price: i64, amount_paid: i64) -> LedgerResult<i64> {
        if membership_price < 0 {
            return Err(LedgerError::Validation(format!(
                "membership price must not be negative, got {membership_price}"
            )));
        }
        if amount_paid < 0 {
            return Err(LedgerError::Validation(format!(
                "amount paid must not be negative, got {amount_paid}"
            )));
        }

        Ok(outstanding_balance(membership_price, amount_paid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_plan(price: i64, duration_months: i32) -> MembershipPlanEntity {
        let now = Utc::now();
        MembershipPlanEntity {
            id: Uuid::new_v4(),
            name: "Single - 3 Months".to_string(),
            duration_months,
            plan_type: "single".to_string(),
            price,
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_member(expiry_date: NaiveDate, status: &str) -> MemberEntity {
        let now = Utc::now();
        MemberEntity {
            id: Uuid::new_v4(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            membership_plan_id: Uuid::new_v4(),
            membership_type: "Single - 1 Month".to_string(),
            membership_price: 2500,
            amount_paid: 1500,
            pending_amount: 1000,
            join_date: expiry_date - Duration::days(30),
            expiry_date,
            status: status.to_string(),
            emergency_contact: "Ravi Rao".to_string(),
            emergency_phone: "+91 91234 56789".to_string(),
            notes: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn expiry_date_before_today_is_expired() {
        let ledger = MembershipLedger::new(date(2024, 6, 10));

        assert!(ledger.is_expired(date(2024, 6, 9)));
        assert!(ledger.is_expired(date(2023, 12, 31)));
        assert!(!ledger.is_expired(date(2024, 6, 11)));
    }

    #[test]
    fn expiring_today_is_expired_and_not_expiring_soon() {
        let ledger = MembershipLedger::new(date(2024, 6, 10));
        let today = ledger.today();

        assert_eq!(ledger.days_until(today), 0);
        assert!(ledger.is_expired(today));
        assert!(!ledger.is_expiring_soon(today));
    }

    #[test]
    fn expiring_soon_covers_one_through_seven_days() {
        let ledger = MembershipLedger::new(date(2024, 6, 10));

        assert!(ledger.is_expiring_soon(date(2024, 6, 11)));
        assert!(ledger.is_expiring_soon(date(2024, 6, 17)));
        assert!(!ledger.is_expiring_soon(date(2024, 6, 18)));
        assert!(!ledger.is_expiring_soon(date(2024, 6, 9)));
    }

    #[test]
    fn expired_and_expiring_soon_never_overlap() {
        let ledger = MembershipLedger::new(date(2024, 2, 28));

        for offset in -60..=60 {
            let expiry = ledger.today() + Duration::days(offset);
            assert!(
                !(ledger.is_expired(expiry) && ledger.is_expiring_soon(expiry)),
                "both predicates fired for offset {offset}"
            );
        }
    }

    #[test]
    fn expiry_overrides_stored_inactive_status() {
        let ledger = MembershipLedger::new(date(2024, 6, 10));
        let member = sample_member(date(2024, 5, 1), "inactive");

        assert_eq!(ledger.effective_status(&member), EffectiveStatus::Expired);
        assert_eq!(member.status, "inactive");
    }

    #[test]
    fn five_days_out_reads_as_expiring_soon() {
        let ledger = MembershipLedger::new(date(2024, 6, 10));
        let member = sample_member(date(2024, 6, 15), "active");

        assert_eq!(ledger.effective_status(&member), EffectiveStatus::ExpiringSoon);
    }

    #[test]
    fn falls_back_to_stored_status_outside_the_window() {
        let ledger = MembershipLedger::new(date(2024, 6, 10));

        let active = sample_member(date(2024, 9, 1), "active");
        let inactive = sample_member(date(2024, 9, 1), "inactive");
        let unknown = sample_member(date(2024, 9, 1), "frozen");

        assert_eq!(ledger.effective_status(&active), EffectiveStatus::Active);
        assert_eq!(ledger.effective_status(&inactive), EffectiveStatus::Inactive);
        assert_eq!(ledger.effective_status(&unknown), EffectiveStatus::Inactive);
    }

    #[test]
    fn pending_amount_ignores_the_stored_column() {
        let mut member = sample_member(date(2024, 9, 1), "active");
        member.pending_amount = 42;

        assert_eq!(MembershipLedger::pending_amount(&member), 1000);
        assert!(MembershipLedger::has_pending_payment(&member));
    }

    #[test]
    fn enroll_defaults_to_paid_in_full() {
        let plan = sample_plan(6900, 3);

        let enrollment = MembershipLedger::enroll(&plan, date(2024, 1, 15), None).unwrap();

        assert_eq!(enrollment.membership_plan_id, plan.id);
        assert_eq!(enrollment.membership_type, plan.name);
        assert_eq!(enrollment.membership_price, 6900);
        assert_eq!(enrollment.amount_paid, 6900);
        assert_eq!(enrollment.pending_amount, 0);
        assert_eq!(enrollment.join_date, date(2024, 1, 15));
        assert_eq!(enrollment.expiry_date, date(2024, 4, 15));
    }

    #[test]
    fn enroll_with_partial_payment_leaves_a_balance() {
        let plan = sample_plan(2500, 1);

        let enrollment = MembershipLedger::enroll(&plan, date(2024, 1, 31), Some(1000)).unwrap();

        assert_eq!(enrollment.amount_paid, 1000);
        assert_eq!(enrollment.pending_amount, 1500);
        assert_eq!(enrollment.expiry_date, date(2024, 2, 29));
    }

    #[test]
    fn enroll_rejects_bad_plan_data_and_negative_payments() {
        let zero_months = sample_plan(2500, 0);
        let negative_price = sample_plan(-1, 1);
        let plan = sample_plan(2500, 1);
        let join = date(2024, 1, 15);

        for result in [
            MembershipLedger::enroll(&zero_months, join, None),
            MembershipLedger::enroll(&negative_price, join, None),
            MembershipLedger::enroll(&plan, join, Some(-5)),
        ] {
            assert!(matches!(result, Err(LedgerError::Validation(_))));
        }
    }

    #[test]
    fn record_payment_settles_the_balance() {
        let member = sample_member(date(2024, 9, 1), "active");
        assert_eq!(MembershipLedger::pending_amount(&member), 1000);

        let updated = MembershipLedger::record_payment(&member, 1000).unwrap();

        assert_eq!(updated.amount_paid, 2500);
        assert_eq!(updated.pending_amount, 0);
        assert_eq!(MembershipLedger::pending_amount(&updated), 0);
    }

    #[test]
    fn overpayment_is_kept_and_pending_stays_at_zero() {
        let member = sample_member(date(2024, 9, 1), "active");

        let updated = MembershipLedger::record_payment(&member, 4000).unwrap();

        assert_eq!(updated.amount_paid, 5500);
        assert_eq!(updated.pending_amount, 0);
    }

    #[test]
    fn non_positive_payments_are_rejected_without_touching_the_member() {
        let member = sample_member(date(2024, 9, 1), "active");
        let before = member.clone();

        for amount in [0, -1, -2500] {
            let err = MembershipLedger::record_payment(&member, amount).unwrap_err();
            assert!(matches!(err, LedgerError::Validation(_)));
        }
        assert_eq!(member, before);
    }

    #[test]
    fn pending_invariant_holds_across_payment_sequences() {
        let mut member = sample_member(date(2024, 9, 1), "active");
        member.amount_paid = 0;

        for amount in [1, 499, 1000, 1000, 7] {
            member = MembershipLedger::record_payment(&member, amount).unwrap();
            assert_eq!(
                member.pending_amount,
                (member.membership_price - member.amount_paid).max(0)
            );
        }
        assert_eq!(member.amount_paid, 2507);
    }

    #[test]
    fn rebalance_validates_and_recomputes() {
        assert_eq!(MembershipLedger::rebalance(2500, 1500), Ok(1000));
        assert_eq!(MembershipLedger::rebalance(2500, 3000), Ok(0));
        assert!(matches!(
            MembershipLedger::rebalance(-1, 0),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            MembershipLedger::rebalance(2500, -1),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn classify_reports_all_predicates() {
        let ledger = MembershipLedger::new(date(2024, 6, 10));

        let outlook = ledger.classify(date(2024, 6, 13));

        assert_eq!(outlook.days_until_expiry, 3);
        assert!(!outlook.is_expired);
        assert!(outlook.is_expiring_soon);
    }
}
