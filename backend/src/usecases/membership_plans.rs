use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult};
use gymdesk::domain::{
    repositories::membership_plans::MembershipPlanRepository,
    value_objects::membership_plans::MembershipPlanDto,
};

pub struct MembershipPlanUseCase<P>
where
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    plan_repository: Arc<P>,
}

impl<P> MembershipPlanUseCase<P>
where
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    pub fn new(plan_repository: Arc<P>) -> Self {
        Self { plan_repository }
    }

    pub async fn list_plans(&self) -> UseCaseResult<Vec<MembershipPlanDto>> {
        let plans = self
            .plan_repository
            .list_active_plans()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "membership_plans: failed to list plans");
                UseCaseError::Internal(err)
            })?;

        Ok(plans.into_iter().map(MembershipPlanDto::from).collect())
    }

    pub async fn get_plan(&self, plan_id: Uuid) -> UseCaseResult<MembershipPlanDto> {
        self.plan_repository
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "membership_plans: failed to load plan");
                UseCaseError::Internal(err)
            })?
            .map(MembershipPlanDto::from)
            .ok_or(UseCaseError::NotFound("membership plan"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gymdesk::domain::{
        entities::membership_plans::MembershipPlanEntity,
        repositories::membership_plans::MockMembershipPlanRepository,
        value_objects::enums::plan_types::PlanType,
    };

    #[tokio::test]
    async fn lists_plans_with_their_type() {
        let now = Utc::now();
        let plan = MembershipPlanEntity {
            id: Uuid::new_v4(),
            name: "Couple - 3 Months".to_string(),
            duration_months: 3,
            plan_type: "couple".to_string(),
            price: 11500,
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let mut plan_repo = MockMembershipPlanRepository::new();
        plan_repo
            .expect_list_active_plans()
            .returning(move || Ok(vec![plan.clone()]));

        let usecase = MembershipPlanUseCase::new(Arc::new(plan_repo));
        let plans = usecase.list_plans().await.unwrap();

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].plan_type, Some(PlanType::Couple));
        assert_eq!(plans[0].price, 11500);
    }

    #[tokio::test]
    async fn unknown_plan_is_not_found() {
        let mut plan_repo = MockMembershipPlanRepository::new();
        plan_repo.expect_find_by_id().returning(|_| Ok(None));

        let usecase = MembershipPlanUseCase::new(Arc::new(plan_repo));
        let err = usecase.get_plan(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, UseCaseError::NotFound("membership plan")));
    }
}
