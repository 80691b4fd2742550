use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{class_bookings, classes},
    },
};
use domain::{
    entities::classes::{
        ClassBookingEntity, ClassEntity, InsertClassBookingEntity, InsertClassEntity,
        UpdateClassEntity,
    },
    repositories::classes::ClassRepository,
    value_objects::enums::booking_statuses::BookingStatus,
};

pub struct ClassPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ClassPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ClassRepository for ClassPostgres {
    async fn list_active(&self) -> Result<Vec<ClassEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = classes::table
            .filter(classes::is_active.eq(true))
            .order(classes::start_time.asc())
            .select(ClassEntity::as_select())
            .load::<ClassEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, class_id: Uuid) -> Result<Option<ClassEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = classes::table
            .find(class_id)
            .select(ClassEntity::as_select())
            .first::<ClassEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(&self, insert_class_entity: InsertClassEntity) -> Result<ClassEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(classes::table)
            .values(&insert_class_entity)
            .returning(ClassEntity::as_returning())
            .get_result::<ClassEntity>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        class_id: Uuid,
        update_class_entity: UpdateClassEntity,
    ) -> Result<Option<ClassEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(classes::table.find(class_id))
            .set(&update_class_entity)
            .returning(ClassEntity::as_returning())
            .get_result::<ClassEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn deactivate(&self, class_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = update(classes::table.find(class_id))
            .set((
                classes::is_active.eq(false),
                classes::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }

    async fn book(
        &self,
        insert_class_booking_entity: InsertClassBookingEntity,
    ) -> Result<Option<ClassBookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let booking = conn.transaction::<Option<ClassBookingEntity>, diesel::result::Error, _>(
            |tx| {
                // Seat is taken only while below capacity; concurrent bookings cannot overfill.
                let seats_taken = update(classes::table.find(insert_class_booking_entity.class_id))
                    .filter(classes::is_active.eq(true))
                    .filter(classes::current_participants.lt(classes::capacity))
                    .set((
                        classes::current_participants.eq(classes::current_participants + 1),
                        classes::updated_at.eq(Utc::now()),
                    ))
                    .execute(tx)?;

                if seats_taken == 0 {
                    return Ok(None);
                }

                let booking = insert_into(class_bookings::table)
                    .values(&insert_class_booking_entity)
                    .returning(ClassBookingEntity::as_returning())
                    .get_result::<ClassBookingEntity>(tx)?;

                Ok(Some(booking))
            },
        )?;

        Ok(booking)
    }

    async fn list_bookings(&self, class_id: Uuid) -> Result<Vec<ClassBookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = class_bookings::table
            .filter(class_bookings::class_id.eq(class_id))
            .filter(class_bookings::status.eq(BookingStatus::Booked.to_string()))
            .order(class_bookings::created_at.asc())
            .select(ClassBookingEntity::as_select())
            .load::<ClassBookingEntity>(&mut conn)?;

        Ok(results)
    }
}
