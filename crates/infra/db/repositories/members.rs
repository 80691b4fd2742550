use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::members},
};
use domain::{
    entities::members::{InsertMemberEntity, MemberEntity, UpdateMemberEntity},
    repositories::members::MemberRepository,
};

pub struct MemberPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl MemberPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MemberRepository for MemberPostgres {
    async fn list_members(&self) -> Result<Vec<MemberEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = members::table
            .order(members::created_at.desc())
            .select(MemberEntity::as_select())
            .load::<MemberEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, member_id: Uuid) -> Result<Option<MemberEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = members::table
            .find(member_id)
            .select(MemberEntity::as_select())
            .first::<MemberEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(&self, insert_member_entity: InsertMemberEntity) -> Result<MemberEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(members::table)
            .values(&insert_member_entity)
            .returning(MemberEntity::as_returning())
            .get_result::<MemberEntity>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        member_id: Uuid,
        update_member_entity: UpdateMemberEntity,
    ) -> Result<Option<MemberEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(members::table.find(member_id))
            .set(&update_member_entity)
            .returning(MemberEntity::as_returning())
            .get_result::<MemberEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, member_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(members::table.find(member_id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
