use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::trainers},
};
use domain::{
    entities::trainers::{InsertTrainerEntity, TrainerEntity, UpdateTrainerEntity},
    repositories::trainers::TrainerRepository,
};

pub struct TrainerPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl TrainerPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TrainerRepository for TrainerPostgres {
    async fn list_trainers(&self) -> Result<Vec<TrainerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = trainers::table
            .order((trainers::first_name.asc(), trainers::last_name.asc()))
            .select(TrainerEntity::as_select())
            .load::<TrainerEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, trainer_id: Uuid) -> Result<Option<TrainerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = trainers::table
            .find(trainer_id)
            .select(TrainerEntity::as_select())
            .first::<TrainerEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(&self, insert_trainer_entity: InsertTrainerEntity) -> Result<TrainerEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(trainers::table)
            .values(&insert_trainer_entity)
            .returning(TrainerEntity::as_returning())
            .get_result::<TrainerEntity>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        trainer_id: Uuid,
        update_trainer_entity: UpdateTrainerEntity,
    ) -> Result<Option<TrainerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(trainers::table.find(trainer_id))
            .set(&update_trainer_entity)
            .returning(TrainerEntity::as_returning())
            .get_result::<TrainerEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
