use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::members;

/// Stored member row. `pending_amount` is kept in step with price and paid amount on
/// every write, but readers go through the ledger instead of trusting the column.
#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = members)]
pub struct MemberEntity {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub membership_plan_id: Uuid,
    pub membership_type: String,
    pub membership_price: i64,
    pub amount_paid: i64,
    pub pending_amount: i64,
    pub join_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub notes: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemberEntity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = members)]
pub struct InsertMemberEntity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub membership_plan_id: Uuid,
    pub membership_type: String,
    pub membership_price: i64,
    pub amount_paid: i64,
    pub pending_amount: i64,
    pub join_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub notes: Option<String>,
    pub avatar_url: Option<String>,
}

/// Partial update; `None` columns are left untouched.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = members)]
pub struct UpdateMemberEntity {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub membership_plan_id: Option<Uuid>,
    pub membership_type: Option<String>,
    pub membership_price: Option<i64>,
    pub amount_paid: Option<i64>,
    pub pending_amount: Option<i64>,
    pub join_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub notes: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
