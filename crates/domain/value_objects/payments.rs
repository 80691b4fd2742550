use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::payments::PaymentEntity;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentDto {
    pub id: Uuid,
    pub member_id: Uuid,
    pub amount: i64,
    pub payment_type: String,
    pub payment_method: String,
    pub status: String,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub payment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentEntity> for PaymentDto {
    fn from(value: PaymentEntity) -> Self {
        Self {
            id: value.id,
            member_id: value.member_id,
            amount: value.amount,
            payment_type: value.payment_type,
            payment_method: value.payment_method,
            status: value.status,
            transaction_id: value.transaction_id,
            notes: value.notes,
            payment_date: value.payment_date,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentModel {
    pub member_id: Uuid,
    pub amount: i64,
    pub payment_type: String,
    pub payment_method: String,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    /// `YYYY-MM-DD`; defaults to today.
    pub payment_date: Option<String>,
}

/// Payment recorded together with the member balance it produced.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordedPaymentDto {
    pub payment: PaymentDto,
    pub amount_paid: i64,
    pub pending_amount: i64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct PaymentStatsDto {
    pub total_revenue: i64,
    pub monthly_revenue: i64,
    pub pending_payments: i64,
    pub completed_payments: i64,
}
