use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::equipment},
};
use domain::{
    entities::equipment::{EquipmentEntity, InsertEquipmentEntity, UpdateEquipmentEntity},
    repositories::equipment::EquipmentRepository,
    value_objects::enums::equipment_statuses::EquipmentStatus,
};

pub struct EquipmentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl EquipmentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl EquipmentRepository for EquipmentPostgres {
    async fn list_equipment(
        &self,
        status: Option<EquipmentStatus>,
    ) -> Result<Vec<EquipmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = equipment::table
            .order(equipment::name.asc())
            .select(EquipmentEntity::as_select())
            .into_boxed();

        if let Some(status) = status {
            query = query.filter(equipment::status.eq(status.to_string()));
        }

        let results = query.load::<EquipmentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, equipment_id: Uuid) -> Result<Option<EquipmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = equipment::table
            .find(equipment_id)
            .select(EquipmentEntity::as_select())
            .first::<EquipmentEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(
        &self,
        insert_equipment_entity: InsertEquipmentEntity,
    ) -> Result<EquipmentEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(equipment::table)
            .values(&insert_equipment_entity)
            .returning(EquipmentEntity::as_returning())
            .get_result::<EquipmentEntity>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        equipment_id: Uuid,
        update_equipment_entity: UpdateEquipmentEntity,
    ) -> Result<Option<EquipmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(equipment::table.find(equipment_id))
            .set(&update_equipment_entity)
            .returning(EquipmentEntity::as_returning())
            .get_result::<EquipmentEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, equipment_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(equipment::table.find(equipment_id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }

    async fn list_maintenance_due(&self, today: NaiveDate) -> Result<Vec<EquipmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = equipment::table
            .filter(equipment::status.eq(EquipmentStatus::Operational.to_string()))
            .filter(equipment::next_maintenance.le(today))
            .order(equipment::next_maintenance.asc())
            .select(EquipmentEntity::as_select())
            .load::<EquipmentEntity>(&mut conn)?;

        Ok(results)
    }
}
