use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::payments;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
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
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub member_id: Uuid,
    pub amount: i64,
    pub payment_type: String,
    pub payment_method: String,
    pub status: String,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub payment_date: NaiveDate,
}

/// Member balance as committed alongside the payment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberBalanceEntity {
    pub member_id: Uuid,
    pub amount_paid: i64,
    pub pending_amount: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPaymentEntity {
    pub payment: PaymentEntity,
    pub balance: MemberBalanceEntity,
}
