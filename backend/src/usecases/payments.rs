use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult};
use gymdesk::domain::{
    entities::payments::{InsertPaymentEntity, RecordedPaymentEntity},
    ledger::{
        MembershipLedger,
        calendar::{month_bounds, parse_calendar_date},
    },
    repositories::{members::MemberRepository, payments::PaymentRepository},
    value_objects::{
        enums::{payment_methods::PaymentMethod, payment_statuses::PaymentStatus},
        payments::{CreatePaymentModel, PaymentDto, PaymentStatsDto, RecordedPaymentDto},
    },
};

pub struct PaymentUseCase<Pay, M>
where
    Pay: PaymentRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    payment_repository: Arc<Pay>,
    member_repository: Arc<M>,
}

impl<Pay, M> PaymentUseCase<Pay, M>
where
    Pay: PaymentRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    pub fn new(payment_repository: Arc<Pay>, member_repository: Arc<M>) -> Self {
        Self {
            payment_repository,
            member_repository,
        }
    }

    pub async fn list_payments(&self) -> UseCaseResult<Vec<PaymentDto>> {
        let payments = self
            .payment_repository
            .list_payments()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "payments: failed to list payments");
                UseCaseError::Internal(err)
            })?;

        Ok(payments.into_iter().map(PaymentDto::from).collect())
    }

    pub async fn list_member_payments(&self, member_id: Uuid) -> UseCaseResult<Vec<PaymentDto>> {
        self.member_repository
            .find_by_id(member_id)
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "payments: failed to load member");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("member"))?;

        let payments = self
            .payment_repository
            .list_by_member(member_id)
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "payments: failed to list member payments");
                UseCaseError::Internal(err)
            })?;

        Ok(payments.into_iter().map(PaymentDto::from).collect())
    }

    /// Records a completed payment and moves the member's balance in the same write.
    ///
    /// The member read here only validates the request; the stored balance is
    /// advanced from the row the repository locks.
    pub async fn record_payment(
        &self,
        model: CreatePaymentModel,
    ) -> UseCaseResult<RecordedPaymentDto> {
        let member_id = model.member_id;

        if model.payment_type.trim().is_empty() {
            return Err(UseCaseError::Validation(
                "payment_type is required".to_string(),
            ));
        }

        let payment_method = PaymentMethod::from_str(model.payment_method.trim()).ok_or_else(|| {
            let err = UseCaseError::InvalidArgument(format!(
                "unknown payment method `{}`",
                model.payment_method
            ));
            warn!(
                %member_id,
                payment_method = model.payment_method,
                status = err.status_code().as_u16(),
                "payments: invalid payment method"
            );
            err
        })?;

        let payment_date = match model.payment_date.as_deref() {
            Some(raw) => parse_calendar_date(raw)?,
            None => MembershipLedger::for_local_today().today(),
        };

        let member = self
            .member_repository
            .find_by_id(member_id)
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "payments: failed to load member");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("member"))?;

        MembershipLedger::record_payment(&member, model.amount).map_err(|err| {
            warn!(
                %member_id,
                amount = model.amount,
                error = %err,
                "payments: payment rejected by ledger"
            );
            err
        })?;

        let transaction_id = model
            .transaction_id
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| format!("TXN-{}", Utc::now().timestamp_millis()));

        let insert_payment_entity = InsertPaymentEntity {
            member_id,
            amount: model.amount,
            payment_type: model.payment_type.trim().to_string(),
            payment_method: payment_method.to_string(),
            status: PaymentStatus::Completed.to_string(),
            transaction_id: Some(transaction_id),
            notes: model.notes,
            payment_date,
        };

        let RecordedPaymentEntity { payment, balance } = self
            .payment_repository
            .record_payment(insert_payment_entity)
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "payments: failed to record payment");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("member"))?;

        info!(
            %member_id,
            payment_id = %payment.id,
            amount = payment.amount,
            pending_amount = balance.pending_amount,
            "payments: payment recorded"
        );

        Ok(RecordedPaymentDto {
            payment: PaymentDto::from(payment),
            amount_paid: balance.amount_paid,
            pending_amount: balance.pending_amount,
        })
    }

    pub async fn stats(&self) -> UseCaseResult<PaymentStatsDto> {
        let today = MembershipLedger::for_local_today().today();
        let (month_start, next_month_start) = month_bounds(today)?;

        let total_revenue = self.sum_completed(None, None).await?;
        let monthly_revenue = self
            .sum_completed(Some(month_start), Some(next_month_start))
            .await?;
        let pending_payments = self.count_by_status(PaymentStatus::Pending).await?;
        let completed_payments = self.count_by_status(PaymentStatus::Completed).await?;

        Ok(PaymentStatsDto {
            total_revenue,
            monthly_revenue,
            pending_payments,
            completed_payments,
        })
    }

    async fn sum_completed(
        &self,
        from: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> UseCaseResult<i64> {
        self.payment_repository
            .sum_completed(from, until)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "payments: failed to sum revenue");
                UseCaseError::Internal(err)
            })
    }

    async fn count_by_status(&self, status: PaymentStatus) -> UseCaseResult<i64> {
        self.payment_repository
            .count_by_status(status)
            .await
            .map_err(|err| {
                error!(%status, db_error = ?err, "payments: failed to count payments");
                UseCaseError::Internal(err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};
    use gymdesk::domain::{
        entities::{
            members::MemberEntity,
            payments::{MemberBalanceEntity, PaymentEntity},
        },
        repositories::{members::MockMemberRepository, payments::MockPaymentRepository},
    };
    use mockall::predicate::eq;
    use std::sync::Mutex;

    fn sample_member(membership_price: i64, amount_paid: i64) -> MemberEntity {
        let now = Utc::now();
        let today = Local::now().date_naive();
        MemberEntity {
            id: Uuid::new_v4(),
            first_name: "Neha".to_string(),
            last_name: "Iyer".to_string(),
            email: "neha@example.com".to_string(),
            phone: "9000000003".to_string(),
            membership_plan_id: Uuid::new_v4(),
            membership_type: "Single - 3 Months".to_string(),
            membership_price,
            amount_paid,
            pending_amount: (membership_price - amount_paid).max(0),
            join_date: today - Duration::days(10),
            expiry_date: today + Duration::days(80),
            status: "active".to_string(),
            emergency_contact: "Ravi Iyer".to_string(),
            emergency_phone: "9000000004".to_string(),
            notes: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn payment_from_insert(insert: InsertPaymentEntity) -> PaymentEntity {
        let now = Utc::now();
        PaymentEntity {
            id: Uuid::new_v4(),
            member_id: insert.member_id,
            amount: insert.amount,
            payment_type: insert.payment_type,
            payment_method: insert.payment_method,
            status: insert.status,
            transaction_id: insert.transaction_id,
            notes: insert.notes,
            payment_date: insert.payment_date,
            created_at: now,
            updated_at: now,
        }
    }

    fn recorded_from_insert(
        insert: InsertPaymentEntity,
        membership_price: i64,
        amount_paid: i64,
    ) -> RecordedPaymentEntity {
        let member_id = insert.member_id;
        RecordedPaymentEntity {
            payment: payment_from_insert(insert),
            balance: MemberBalanceEntity {
                member_id,
                amount_paid,
                pending_amount: (membership_price - amount_paid).max(0),
            },
        }
    }

    fn payment_model(member_id: Uuid, amount: i64) -> CreatePaymentModel {
        CreatePaymentModel {
            member_id,
            amount,
            payment_type: "Membership Fee".to_string(),
            payment_method: "UPI".to_string(),
            transaction_id: None,
            notes: None,
            payment_date: None,
        }
    }

    #[tokio::test]
    async fn records_payment_and_new_balance_together() {
        let member = sample_member(6900, 4000);
        let member_id = member.id;

        let mut member_repo = MockMemberRepository::new();
        member_repo
            .expect_find_by_id()
            .with(eq(member_id))
            .returning(move |_| Ok(Some(member.clone())));

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_record_payment()
            .withf(move |insert| {
                insert.member_id == member_id
                    && insert.amount == 2900
                    && insert.payment_method == "UPI"
                    && insert.status == "completed"
                    && insert
                        .transaction_id
                        .as_deref()
                        .is_some_and(|id| id.starts_with("TXN-"))
            })
            .times(1)
            .returning(|insert| Ok(Some(recorded_from_insert(insert, 6900, 6900))));

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(member_repo));
        let recorded = usecase
            .record_payment(payment_model(member_id, 2900))
            .await
            .unwrap();

        assert_eq!(recorded.amount_paid, 6900);
        assert_eq!(recorded.pending_amount, 0);
        assert_eq!(recorded.payment.payment_date, Local::now().date_naive());
    }

    #[tokio::test]
    async fn overpayment_leaves_no_negative_balance() {
        let member = sample_member(2500, 2000);
        let member_id = member.id;

        let mut member_repo = MockMemberRepository::new();
        member_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(member.clone())));

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_record_payment()
            .withf(|insert| insert.amount == 1000)
            .returning(|insert| Ok(Some(recorded_from_insert(insert, 2500, 3000))));

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(member_repo));
        let recorded = usecase
            .record_payment(payment_model(member_id, 1000))
            .await
            .unwrap();

        assert_eq!(recorded.pending_amount, 0);
    }

    #[tokio::test]
    async fn non_positive_amounts_are_rejected_without_writing() {
        let member = sample_member(2500, 0);
        let member_id = member.id;

        let mut member_repo = MockMemberRepository::new();
        member_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(member.clone())));

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_record_payment().never();

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(member_repo));

        for amount in [0, -100] {
            let err = usecase
                .record_payment(payment_model(member_id, amount))
                .await
                .unwrap_err();
            assert!(matches!(err, UseCaseError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn overlapping_payments_both_reach_the_stored_balance() {
        // Both requests validate against the same stale read of the member.
        let snapshot = sample_member(2500, 1500);
        let member_id = snapshot.id;
        let stored = Arc::new(Mutex::new(snapshot.clone()));

        let mut member_repo = MockMemberRepository::new();
        member_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(snapshot.clone())));

        let mut payment_repo = MockPaymentRepository::new();
        let row = Arc::clone(&stored);
        payment_repo
            .expect_record_payment()
            .times(2)
            .returning(move |insert| {
                let mut member = row.lock().unwrap();
                *member = MembershipLedger::record_payment(&member, insert.amount).unwrap();
                let balance = MemberBalanceEntity {
                    member_id: member.id,
                    amount_paid: member.amount_paid,
                    pending_amount: member.pending_amount,
                };
                Ok(Some(RecordedPaymentEntity {
                    payment: payment_from_insert(insert),
                    balance,
                }))
            });

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(member_repo));
        let first = usecase
            .record_payment(payment_model(member_id, 600))
            .await
            .unwrap();
        let second = usecase
            .record_payment(payment_model(member_id, 400))
            .await
            .unwrap();

        assert_eq!(first.amount_paid, 2100);
        assert_eq!(second.amount_paid, 2500);
        assert_eq!(second.pending_amount, 0);

        let member = stored.lock().unwrap();
        assert_eq!(member.amount_paid, 2500);
        assert_eq!(member.pending_amount, 0);
    }

    #[tokio::test]
    async fn member_removed_before_the_write_is_not_found() {
        let member = sample_member(2500, 0);
        let member_id = member.id;

        let mut member_repo = MockMemberRepository::new();
        member_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(member.clone())));

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_record_payment().returning(|_| Ok(None));

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(member_repo));
        let err = usecase
            .record_payment(payment_model(member_id, 500))
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::NotFound("member")));
    }

    #[tokio::test]
    async fn unknown_payment_method_is_invalid_argument() {
        let usecase = PaymentUseCase::new(
            Arc::new(MockPaymentRepository::new()),
            Arc::new(MockMemberRepository::new()),
        );

        let mut model = payment_model(Uuid::new_v4(), 500);
        model.payment_method = "Bitcoin".to_string();

        let err = usecase.record_payment(model).await.unwrap_err();
        assert!(matches!(err, UseCaseError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn payment_for_unknown_member_is_not_found() {
        let mut member_repo = MockMemberRepository::new();
        member_repo.expect_find_by_id().returning(|_| Ok(None));

        let usecase = PaymentUseCase::new(
            Arc::new(MockPaymentRepository::new()),
            Arc::new(member_repo),
        );

        let err = usecase
            .record_payment(payment_model(Uuid::new_v4(), 500))
            .await
            .unwrap_err();
        assert!(matches!(err, UseCaseError::NotFound("member")));
    }

    #[tokio::test]
    async fn stats_sum_the_current_month_only_for_monthly_revenue() {
        let today = Local::now().date_naive();
        let (month_start, next_month_start) = month_bounds(today).unwrap();

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_sum_completed()
            .with(eq(None::<NaiveDate>), eq(None::<NaiveDate>))
            .returning(|_, _| Ok(90000));
        payment_repo
            .expect_sum_completed()
            .with(eq(Some(month_start)), eq(Some(next_month_start)))
            .returning(|_, _| Ok(12500));
        payment_repo
            .expect_count_by_status()
            .with(eq(PaymentStatus::Pending))
            .returning(|_| Ok(2));
        payment_repo
            .expect_count_by_status()
            .with(eq(PaymentStatus::Completed))
            .returning(|_| Ok(14));

        let usecase = PaymentUseCase::new(
            Arc::new(payment_repo),
            Arc::new(MockMemberRepository::new()),
        );
        let stats = usecase.stats().await.unwrap();

        assert_eq!(
            stats,
            PaymentStatsDto {
                total_revenue: 90000,
                monthly_revenue: 12500,
                pending_payments: 2,
                completed_payments: 14,
            }
        );
    }
}
