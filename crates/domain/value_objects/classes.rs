use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::classes::{ClassBookingEntity, ClassEntity};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassDto {
    pub id: Uuid,
    pub name: String,
    pub trainer_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i32,
    pub capacity: i32,
    pub current_participants: i32,
    pub spots_left: i32,
    pub location: String,
    pub difficulty: String,
    pub category: String,
    pub description: Option<String>,
    pub days_of_week: Vec<String>,
    pub is_active: bool,
}

impl From<ClassEntity> for ClassDto {
    fn from(value: ClassEntity) -> Self {
        Self {
            id: value.id,
            spots_left: (value.capacity - value.current_participants).max(0),
            name: value.name,
            trainer_id: value.trainer_id,
            start_time: value.start_time,
            end_time: value.end_time,
            duration_minutes: value.duration_minutes,
            capacity: value.capacity,
            current_participants: value.current_participants,
            location: value.location,
            difficulty: value.difficulty,
            category: value.category,
            description: value.description,
            days_of_week: value.days_of_week,
            is_active: value.is_active,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassModel {
    pub name: String,
    pub trainer_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: i32,
    pub location: String,
    pub difficulty: String,
    pub category: String,
    pub description: Option<String>,
    #[serde(default)]
    pub days_of_week: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClassModel {
    pub name: Option<String>,
    pub trainer_id: Option<Uuid>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub days_of_week: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookClassModel {
    pub member_id: Uuid,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassBookingDto {
    pub id: Uuid,
    pub member_id: Uuid,
    pub class_id: Uuid,
    pub booking_date: NaiveDate,
    pub status: String,
}

impl From<ClassBookingEntity> for ClassBookingDto {
    fn from(value: ClassBookingEntity) -> Self {
        Self {
            id: value.id,
            member_id: value.member_id,
            class_id: value.class_id,
            booking_date: value.booking_date,
            status: value.status,
        }
    }
}
