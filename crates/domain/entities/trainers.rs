use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::trainers;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = trainers)]
pub struct TrainerEntity {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub specializations: Vec<String>,
    pub experience_years: i32,
    pub certifications: Vec<String>,
    pub hourly_rate: i64,
    pub availability: String,
    pub rating: f64,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = trainers)]
pub struct InsertTrainerEntity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub specializations: Vec<String>,
    pub experience_years: i32,
    pub certifications: Vec<String>,
    pub hourly_rate: i64,
    pub availability: String,
    pub rating: f64,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = trainers)]
pub struct UpdateTrainerEntity {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specializations: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub certifications: Option<Vec<String>>,
    pub hourly_rate: Option<i64>,
    pub availability: Option<String>,
    pub rating: Option<f64>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
