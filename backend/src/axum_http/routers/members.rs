use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::usecases::members::MemberUseCase;
use gymdesk::{
    domain::{
        repositories::{members::MemberRepository, membership_plans::MembershipPlanRepository},
        value_objects::members::{
            CreateMemberModel, ExpiryPreviewQuery, ListMembersQuery, RenewMembershipModel,
            UpdateMemberModel,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{members::MemberPostgres, membership_plans::MembershipPlanPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let member_repository = MemberPostgres::new(Arc::clone(&db_pool));
    let plan_repository = MembershipPlanPostgres::new(Arc::clone(&db_pool));
    let member_usecase =
        MemberUseCase::new(Arc::new(member_repository), Arc::new(plan_repository));

    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/expiring", get(list_expiring))
        .route("/expired", get(list_expired))
        .route("/pending-payments", get(list_pending_payments))
        .route("/expiry-preview", get(preview_expiry))
        .route(
            "/:id",
            get(get_member).patch(update_member).delete(delete_member),
        )
        .route("/:id/renew", post(renew_membership))
        .with_state(Arc::new(member_usecase))
}

pub async fn list_members<M, P>(
    State(member_usecase): State<Arc<MemberUseCase<M, P>>>,
    Query(query): Query<ListMembersQuery>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match member_usecase.list_members(query).await {
        Ok(members) => (StatusCode::OK, Json(members)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_expiring<M, P>(
    State(member_usecase): State<Arc<MemberUseCase<M, P>>>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match member_usecase.list_expiring().await {
        Ok(members) => (StatusCode::OK, Json(members)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_expired<M, P>(
    State(member_usecase): State<Arc<MemberUseCase<M, P>>>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match member_usecase.list_expired().await {
        Ok(members) => (StatusCode::OK, Json(members)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_pending_payments<M, P>(
    State(member_usecase): State<Arc<MemberUseCase<M, P>>>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match member_usecase.list_pending_payments().await {
        Ok(members) => (StatusCode::OK, Json(members)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn preview_expiry<M, P>(
    State(member_usecase): State<Arc<MemberUseCase<M, P>>>,
    Query(query): Query<ExpiryPreviewQuery>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match member_usecase.preview_expiry(&query.expiry_date) {
        Ok(outlook) => (StatusCode::OK, Json(outlook)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_member<M, P>(
    State(member_usecase): State<Arc<MemberUseCase<M, P>>>,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match member_usecase.get_member(member_id).await {
        Ok(member) => (StatusCode::OK, Json(member)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_member<M, P>(
    State(member_usecase): State<Arc<MemberUseCase<M, P>>>,
    Json(create_member_model): Json<CreateMemberModel>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match member_usecase.create_member(create_member_model).await {
        Ok(member) => (StatusCode::CREATED, Json(member)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_member<M, P>(
    State(member_usecase): State<Arc<MemberUseCase<M, P>>>,
    Path(member_id): Path<Uuid>,
    Json(update_member_model): Json<UpdateMemberModel>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match member_usecase
        .update_member(member_id, update_member_model)
        .await
    {
        Ok(member) => (StatusCode::OK, Json(member)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn renew_membership<M, P>(
    State(member_usecase): State<Arc<MemberUseCase<M, P>>>,
    Path(member_id): Path<Uuid>,
    Json(renew_membership_model): Json<RenewMembershipModel>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match member_usecase
        .renew_membership(member_id, renew_membership_model)
        .await
    {
        Ok(member) => (StatusCode::OK, Json(member)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_member<M, P>(
    State(member_usecase): State<Arc<MemberUseCase<M, P>>>,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    match member_usecase.delete_member(member_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
