use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain;
use crate::infra::db::postgres::{postgres_connection::PgPoolSquad, schema::membership_plans};
use domain::{
    entities::membership_plans::MembershipPlanEntity,
    repositories::membership_plans::MembershipPlanRepository,
};

pub struct MembershipPlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl MembershipPlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MembershipPlanRepository for MembershipPlanPostgres {
    async fn list_active_plans(&self) -> Result<Vec<MembershipPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = membership_plans::table
            .filter(membership_plans::is_active.eq(true))
            .order((
                membership_plans::plan_type.asc(),
                membership_plans::duration_months.asc(),
            ))
            .select(MembershipPlanEntity::as_select())
            .load::<MembershipPlanEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<MembershipPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = membership_plans::table
            .find(plan_id)
            .select(MembershipPlanEntity::as_select())
            .first::<MembershipPlanEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
