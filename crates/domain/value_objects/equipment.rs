use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::equipment::EquipmentEntity;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EquipmentDto {
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
}

impl From<EquipmentEntity> for EquipmentDto {
    fn from(value: EquipmentEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            category: value.category,
            serial_number: value.serial_number,
            location: value.location,
            status: value.status,
            purchase_date: value.purchase_date,
            warranty_expiry: value.warranty_expiry,
            last_maintenance: value.last_maintenance,
            next_maintenance: value.next_maintenance,
            notes: value.notes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEquipmentModel {
    pub name: String,
    pub category: String,
    pub serial_number: String,
    pub location: String,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEquipmentModel {
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
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEquipmentQuery {
    pub status: Option<String>,
}
