use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::equipment::{EquipmentEntity, InsertEquipmentEntity, UpdateEquipmentEntity},
    value_objects::enums::equipment_statuses::EquipmentStatus,
};

#[automock]
#[async_trait]
pub trait EquipmentRepository {
    /// Ordered by name, optionally narrowed to one status.
    async fn list_equipment(&self, status: Option<EquipmentStatus>) -> Result<Vec<EquipmentEntity>>;
    async fn find_by_id(&self, equipment_id: Uuid) -> Result<Option<EquipmentEntity>>;
    async fn create(&self, insert_equipment_entity: InsertEquipmentEntity)
    -> Result<EquipmentEntity>;
    async fn update(
        &self,
        equipment_id: Uuid,
        update_equipment_entity: UpdateEquipmentEntity,
    ) -> Result<Option<EquipmentEntity>>;
    async fn delete(&self, equipment_id: Uuid) -> Result<bool>;
    /// Operational equipment whose next maintenance is on or before `today`.
    async fn list_maintenance_due(&self, today: NaiveDate) -> Result<Vec<EquipmentEntity>>;
}
