use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::trainers::{InsertTrainerEntity, TrainerEntity, UpdateTrainerEntity};

#[automock]
#[async_trait]
pub trait TrainerRepository {
    async fn list_trainers(&self) -> Result<Vec<TrainerEntity>>;
    async fn find_by_id(&self, trainer_id: Uuid) -> Result<Option<TrainerEntity>>;
    async fn create(&self, insert_trainer_entity: InsertTrainerEntity) -> Result<TrainerEntity>;
    async fn update(
        &self,
        trainer_id: Uuid,
        update_trainer_entity: UpdateTrainerEntity,
    ) -> Result<Option<TrainerEntity>>;
}
