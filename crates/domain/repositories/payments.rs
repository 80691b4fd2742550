use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::payments::{InsertPaymentEntity, PaymentEntity, RecordedPaymentEntity},
    value_objects::enums::payment_statuses::PaymentStatus,
};

#[automock]
#[async_trait]
pub trait PaymentRepository {
    async fn list_payments(&self) -> Result<Vec<PaymentEntity>>;
    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<PaymentEntity>>;
    /// Inserts the payment and applies its amount to the member's locked row in one
    /// transaction. `None` when the member no longer exists; nothing is written then.
    async fn record_payment(
        &self,
        insert_payment_entity: InsertPaymentEntity,
    ) -> Result<Option<RecordedPaymentEntity>>;
    /// Sum of completed payments with `from <= payment_date < until`; open bounds are unbounded.
    async fn sum_completed(&self, from: Option<NaiveDate>, until: Option<NaiveDate>) -> Result<i64>;
    async fn count_by_status(&self, status: PaymentStatus) -> Result<i64>;
}
