use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::trainers::TrainerEntity;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrainerDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
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

impl From<TrainerEntity> for TrainerDto {
    fn from(value: TrainerEntity) -> Self {
        Self {
            id: value.id,
            name: format!("{} {}", value.first_name, value.last_name),
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            specializations: value.specializations,
            experience_years: value.experience_years,
            certifications: value.certifications,
            hourly_rate: value.hourly_rate,
            availability: value.availability,
            rating: value.rating,
            bio: value.bio,
            avatar_url: value.avatar_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrainerModel {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub experience_years: i32,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub hourly_rate: i64,
    pub availability: Option<String>,
    #[serde(default)]
    pub rating: f64,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTrainerModel {
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
}
