use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::usecases::membership_plans::MembershipPlanUseCase;
use gymdesk::{
    domain::repositories::membership_plans::MembershipPlanRepository,
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::membership_plans::MembershipPlanPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plan_repository = MembershipPlanPostgres::new(Arc::clone(&db_pool));
    let plan_usecase = MembershipPlanUseCase::new(Arc::new(plan_repository));

    Router::new()
        .route("/", get(list_plans))
        .route("/:id", get(get_plan))
        .with_state(Arc::new(plan_usecase))
}

pub async fn list_plans<P>(
    State(plan_usecase): State<Arc<MembershipPlanUseCase<P>>>,
) -> impl IntoResponse
where
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match plan_usecase.list_plans().await {
        Ok(plans) => (StatusCode::OK, Json(plans)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_plan<P>(
    State(plan_usecase): State<Arc<MembershipPlanUseCase<P>>>,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match plan_usecase.get_plan(plan_id).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(err) => err.into_response(),
    }
}
