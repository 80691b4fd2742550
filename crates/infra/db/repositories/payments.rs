use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{members, payments},
    },
};
use domain::{
    entities::{
        members::MemberEntity,
        payments::{InsertPaymentEntity, MemberBalanceEntity, PaymentEntity, RecordedPaymentEntity},
    },
    ledger::MembershipLedger,
    repositories::payments::PaymentRepository,
    value_objects::enums::payment_statuses::PaymentStatus,
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn list_payments(&self) -> Result<Vec<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = payments::table
            .order((payments::payment_date.desc(), payments::created_at.desc()))
            .select(PaymentEntity::as_select())
            .load::<PaymentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = payments::table
            .filter(payments::member_id.eq(member_id))
            .order((payments::payment_date.desc(), payments::created_at.desc()))
            .select(PaymentEntity::as_select())
            .load::<PaymentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn record_payment(
        &self,
        insert_payment_entity: InsertPaymentEntity,
    ) -> Result<Option<RecordedPaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let recorded = conn.transaction::<Option<RecordedPaymentEntity>, anyhow::Error, _>(|tx| {
            // Payments for one member apply one after another on the locked row.
            let Some(member) = members::table
                .find(insert_payment_entity.member_id)
                .select(MemberEntity::as_select())
                .for_update()
                .get_result::<MemberEntity>(tx)
                .optional()?
            else {
                return Ok(None);
            };

            let updated = MembershipLedger::record_payment(&member, insert_payment_entity.amount)?;

            let payment = insert_into(payments::table)
                .values(&insert_payment_entity)
                .returning(PaymentEntity::as_returning())
                .get_result::<PaymentEntity>(tx)?;

            update(members::table.find(member.id))
                .set((
                    members::amount_paid.eq(updated.amount_paid),
                    members::pending_amount.eq(updated.pending_amount),
                    members::updated_at.eq(Utc::now()),
                ))
                .execute(tx)?;

            Ok(Some(RecordedPaymentEntity {
                payment,
                balance: MemberBalanceEntity {
                    member_id: member.id,
                    amount_paid: updated.amount_paid,
                    pending_amount: updated.pending_amount,
                },
            }))
        })?;

        Ok(recorded)
    }

    async fn sum_completed(
        &self,
        from: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = payments::table
            .filter(payments::status.eq(PaymentStatus::Completed.to_string()))
            .select(payments::amount)
            .into_boxed();

        if let Some(from) = from {
            query = query.filter(payments::payment_date.ge(from));
        }
        if let Some(until) = until {
            query = query.filter(payments::payment_date.lt(until));
        }

        let amounts = query.load::<i64>(&mut conn)?;

        Ok(amounts.into_iter().sum())
    }

    async fn count_by_status(&self, status: PaymentStatus) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = payments::table
            .filter(payments::status.eq(status.to_string()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
