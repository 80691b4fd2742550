use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::check_ins::CheckInEntity;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckInDto {
    pub id: Uuid,
    pub member_id: Uuid,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
}

impl From<CheckInEntity> for CheckInDto {
    fn from(value: CheckInEntity) -> Self {
        Self {
            id: value.id,
            member_id: value.member_id,
            check_in_time: value.check_in_time,
            check_out_time: value.check_out_time,
            duration_minutes: value.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckInModel {
    pub member_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckInHistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CheckInStatsDto {
    pub today: i64,
    pub yesterday: i64,
    pub this_week: i64,
    pub currently_in: i64,
}
