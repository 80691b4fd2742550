use std::sync::Arc;
use tracing::error;

use crate::usecases::errors::{UseCaseError, UseCaseResult};
use gymdesk::domain::{
    entities::members::MemberEntity,
    ledger::{MembershipLedger, calendar::month_bounds},
    repositories::{
        check_ins::CheckInRepository, members::MemberRepository, payments::PaymentRepository,
    },
    value_objects::{
        dashboard::{DashboardAlertsDto, DashboardSummaryDto},
        enums::effective_statuses::EffectiveStatus,
    },
};

pub struct DashboardUseCase<M, C, Pay>
where
    M: MemberRepository + Send + Sync + 'static,
    C: CheckInRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    member_repository: Arc<M>,
    check_in_repository: Arc<C>,
    payment_repository: Arc<Pay>,
}

impl<M, C, Pay> DashboardUseCase<M, C, Pay>
where
    M: MemberRepository + Send + Sync + 'static,
    C: CheckInRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    pub fn new(
        member_repository: Arc<M>,
        check_in_repository: Arc<C>,
        payment_repository: Arc<Pay>,
    ) -> Self {
        Self {
            member_repository,
            check_in_repository,
            payment_repository,
        }
    }

    pub async fn alerts(&self) -> UseCaseResult<DashboardAlertsDto> {
        let ledger = MembershipLedger::for_local_today();
        let members = self.load_members().await?;
        Ok(tally_alerts(&ledger, &members))
    }

    pub async fn summary(&self) -> UseCaseResult<DashboardSummaryDto> {
        let ledger = MembershipLedger::for_local_today();
        let members = self.load_members().await?;

        let active_members = members
            .iter()
            .filter(|member| ledger.effective_status(member).grants_access())
            .count();

        let checked_in_now = self.check_in_repository.count_open().await.map_err(|err| {
            error!(db_error = ?err, "dashboard: failed to count open check-ins");
            UseCaseError::Internal(err)
        })?;

        let (month_start, next_month_start) = month_bounds(ledger.today())?;
        let monthly_revenue = self
            .payment_repository
            .sum_completed(Some(month_start), Some(next_month_start))
            .await
            .map_err(|err| {
                error!(db_error = ?err, "dashboard: failed to sum monthly revenue");
                UseCaseError::Internal(err)
            })?;

        Ok(DashboardSummaryDto {
            total_members: members.len() as i64,
            active_members: active_members as i64,
            checked_in_now,
            monthly_revenue,
            alerts: tally_alerts(&ledger, &members),
        })
    }

    async fn load_members(&self) -> UseCaseResult<Vec<MemberEntity>> {
        self.member_repository.list_members().await.map_err(|err| {
            error!(db_error = ?err, "dashboard: failed to list members");
            UseCaseError::Internal(err)
        })
    }
}

/// Each member is classified once against `ledger`, so no member is both expired and
/// expiring soon.
fn tally_alerts(ledger: &MembershipLedger, members: &[MemberEntity]) -> DashboardAlertsDto {
    members
        .iter()
        .fold(DashboardAlertsDto::default(), |mut alerts, member| {
            match ledger.effective_status(member) {
                EffectiveStatus::Expired => alerts.expired += 1,
                EffectiveStatus::ExpiringSoon => alerts.expiring_soon += 1,
                EffectiveStatus::Active | EffectiveStatus::Inactive => {}
            }

            let pending = MembershipLedger::pending_amount(member);
            if pending > 0 {
                alerts.pending_payments += 1;
                alerts.pending_total = alerts.pending_total.saturating_add(pending);
            }

            alerts
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, NaiveDate, Utc};
    use gymdesk::domain::repositories::{
        check_ins::MockCheckInRepository, members::MockMemberRepository,
        payments::MockPaymentRepository,
    };
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn member(today: NaiveDate, expiry_in_days: i64, status: &str, paid: i64) -> MemberEntity {
        let now = Utc::now();
        MemberEntity {
            id: Uuid::new_v4(),
            first_name: "Member".to_string(),
            last_name: format!("{expiry_in_days}"),
            email: "member@example.com".to_string(),
            phone: "9000000040".to_string(),
            membership_plan_id: Uuid::new_v4(),
            membership_type: "Single - 1 Month".to_string(),
            membership_price: 2500,
            amount_paid: paid,
            pending_amount: 0,
            join_date: today - Duration::days(20),
            expiry_date: today + Duration::days(expiry_in_days),
            status: status.to_string(),
            emergency_contact: "Contact".to_string(),
            emergency_phone: "9000000041".to_string(),
            notes: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn buckets_members_once_and_totals_pending() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let ledger = MembershipLedger::new(today);
        let members = vec![
            member(today, -4, "active", 2500),
            member(today, 0, "active", 1000),
            member(today, 3, "active", 2500),
            member(today, 7, "inactive", 500),
            member(today, 8, "active", 2500),
            member(today, 40, "inactive", 2500),
        ];

        let alerts = tally_alerts(&ledger, &members);

        assert_eq!(
            alerts,
            DashboardAlertsDto {
                expired: 2,
                expiring_soon: 2,
                pending_payments: 2,
                pending_total: 1500 + 2000,
            }
        );
    }

    #[tokio::test]
    async fn summary_combines_members_check_ins_and_revenue() {
        let today = Local::now().date_naive();
        let (month_start, next_month_start) = month_bounds(today).unwrap();
        let members = vec![
            member(today, 90, "active", 2500),
            member(today, 5, "active", 2500),
            member(today, 90, "inactive", 2500),
            member(today, -1, "active", 1000),
        ];

        let mut member_repo = MockMemberRepository::new();
        member_repo
            .expect_list_members()
            .returning(move || Ok(members.clone()));

        let mut check_in_repo = MockCheckInRepository::new();
        check_in_repo.expect_count_open().returning(|| Ok(3));

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_sum_completed()
            .with(eq(Some(month_start)), eq(Some(next_month_start)))
            .returning(|_, _| Ok(47500));

        let usecase = DashboardUseCase::new(
            Arc::new(member_repo),
            Arc::new(check_in_repo),
            Arc::new(payment_repo),
        );
        let summary = usecase.summary().await.unwrap();

        assert_eq!(summary.total_members, 4);
        assert_eq!(summary.active_members, 2);
        assert_eq!(summary.checked_in_now, 3);
        assert_eq!(summary.monthly_revenue, 47500);
        assert_eq!(summary.alerts.expired, 1);
        assert_eq!(summary.alerts.expiring_soon, 1);
        assert_eq!(summary.alerts.pending_total, 1500);
    }
}
