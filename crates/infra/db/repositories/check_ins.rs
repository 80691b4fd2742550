use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{
    RunQueryDsl, insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    update,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::check_ins},
};
use domain::{
    entities::check_ins::{CheckInEntity, InsertCheckInEntity},
    repositories::check_ins::CheckInRepository,
};

pub struct CheckInPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CheckInPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CheckInRepository for CheckInPostgres {
    async fn list_active(&self) -> Result<Vec<CheckInEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = check_ins::table
            .filter(check_ins::check_out_time.is_null())
            .order(check_ins::check_in_time.desc())
            .select(CheckInEntity::as_select())
            .load::<CheckInEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_history(&self, limit: i64) -> Result<Vec<CheckInEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = check_ins::table
            .order(check_ins::check_in_time.desc())
            .limit(limit)
            .select(CheckInEntity::as_select())
            .load::<CheckInEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, check_in_id: Uuid) -> Result<Option<CheckInEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = check_ins::table
            .find(check_in_id)
            .select(CheckInEntity::as_select())
            .first::<CheckInEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_open_for_member(&self, member_id: Uuid) -> Result<Option<CheckInEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = check_ins::table
            .filter(check_ins::member_id.eq(member_id))
            .filter(check_ins::check_out_time.is_null())
            .select(CheckInEntity::as_select())
            .first::<CheckInEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn check_in(
        &self,
        insert_check_in_entity: InsertCheckInEntity,
    ) -> Result<Option<CheckInEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(check_ins::table)
            .values(&insert_check_in_entity)
            .returning(CheckInEntity::as_returning())
            .get_result::<CheckInEntity>(&mut conn);

        // check_ins_one_open_per_member_idx allows one open row per member.
        match result {
            Ok(check_in) => Ok(Some(check_in)),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn check_out(
        &self,
        check_in_id: Uuid,
        check_out_time: DateTime<Utc>,
        duration_minutes: i32,
    ) -> Result<Option<CheckInEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(check_ins::table.find(check_in_id))
            .filter(check_ins::check_out_time.is_null())
            .set((
                check_ins::check_out_time.eq(Some(check_out_time)),
                check_ins::duration_minutes.eq(Some(duration_minutes)),
            ))
            .returning(CheckInEntity::as_returning())
            .get_result::<CheckInEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn count_between(
        &self,
        from: DateTime<Utc>,
        until: Option<DateTime<Utc>>,
    ) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = check_ins::table
            .filter(check_ins::check_in_time.ge(from))
            .count()
            .into_boxed();

        if let Some(until) = until {
            query = query.filter(check_ins::check_in_time.lt(until));
        }

        let count = query.get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn count_open(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = check_ins::table
            .filter(check_ins::check_out_time.is_null())
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
