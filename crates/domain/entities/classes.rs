use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::{class_bookings, classes};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = classes)]
pub struct ClassEntity {
    pub id: Uuid,
    pub name: String,
    pub trainer_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i32,
    pub capacity: i32,
    pub current_participants: i32,
    pub location: String,
    pub difficulty: String,
    pub category: String,
    pub description: Option<String>,
    pub days_of_week: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = classes)]
pub struct InsertClassEntity {
    pub name: String,
    pub trainer_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i32,
    pub capacity: i32,
    pub current_participants: i32,
    pub location: String,
    pub difficulty: String,
    pub category: String,
    pub description: Option<String>,
    pub days_of_week: Vec<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = classes)]
pub struct UpdateClassEntity {
    pub name: Option<String>,
    pub trainer_id: Option<Uuid>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration_minutes: Option<i32>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub days_of_week: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = class_bookings)]
pub struct ClassBookingEntity {
    pub id: Uuid,
    pub member_id: Uuid,
    pub class_id: Uuid,
    pub booking_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = class_bookings)]
pub struct InsertClassBookingEntity {
    pub member_id: Uuid,
    pub class_id: Uuid,
    pub booking_date: NaiveDate,
    pub status: String,
}
