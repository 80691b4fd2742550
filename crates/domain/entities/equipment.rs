use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::equipment;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = equipment)]
pub struct EquipmentEntity {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub serial_number: String,
    pub location: String,
    pub status: String,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = equipment)]
pub struct InsertEquipmentEntity {
    pub name: String,
    pub category: String,
    pub serial_number: String,
    pub location: String,
    pub status: String,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = equipment)]
pub struct UpdateEquipmentEntity {
    pub name: Option<String>,
    pub category: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    pub notes: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
