use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::classes::{
    ClassBookingEntity, ClassEntity, InsertClassBookingEntity, InsertClassEntity, UpdateClassEntity,
};

#[automock]
#[async_trait]
pub trait ClassRepository {
    /// Active classes ordered by start time.
    async fn list_active(&self) -> Result<Vec<ClassEntity>>;
    async fn find_by_id(&self, class_id: Uuid) -> Result<Option<ClassEntity>>;
    async fn create(&self, insert_class_entity: InsertClassEntity) -> Result<ClassEntity>;
    async fn update(
        &self,
        class_id: Uuid,
        update_class_entity: UpdateClassEntity,
    ) -> Result<Option<ClassEntity>>;
    /// Soft delete.
    async fn deactivate(&self, class_id: Uuid) -> Result<bool>;
    /// Takes one seat and inserts the booking atomically. `None` when the class is full.
    async fn book(
        &self,
        insert_class_booking_entity: InsertClassBookingEntity,
    ) -> Result<Option<ClassBookingEntity>>;
    async fn list_bookings(&self, class_id: Uuid) -> Result<Vec<ClassBookingEntity>>;
}
