use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::membership_plans::MembershipPlanEntity;

#[automock]
#[async_trait]
pub trait MembershipPlanRepository {
    async fn list_active_plans(&self) -> Result<Vec<MembershipPlanEntity>>;
    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<MembershipPlanEntity>>;
}
