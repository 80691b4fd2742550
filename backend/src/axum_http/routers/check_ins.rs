use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::usecases::check_ins::CheckInUseCase;
use gymdesk::{
    domain::{
        repositories::{check_ins::CheckInRepository, members::MemberRepository},
        value_objects::check_ins::{CheckInHistoryQuery, CheckInModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{check_ins::CheckInPostgres, members::MemberPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, history_limit: i64) -> Router {
    let check_in_repository = CheckInPostgres::new(Arc::clone(&db_pool));
    let member_repository = MemberPostgres::new(Arc::clone(&db_pool));
    let check_in_usecase = CheckInUseCase::new(
        Arc::new(check_in_repository),
        Arc::new(member_repository),
        history_limit,
    );

    Router::new()
        .route("/", post(check_in))
        .route("/active", get(list_active))
        .route("/history", get(history))
        .route("/stats", get(stats))
        .route("/:id/check-out", post(check_out))
        .with_state(Arc::new(check_in_usecase))
}

pub async fn list_active<C, M>(
    State(check_in_usecase): State<Arc<CheckInUseCase<C, M>>>,
) -> impl IntoResponse
where
    C: CheckInRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match check_in_usecase.list_active().await {
        Ok(check_ins) => (StatusCode::OK, Json(check_ins)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn history<C, M>(
    State(check_in_usecase): State<Arc<CheckInUseCase<C, M>>>,
    Query(query): Query<CheckInHistoryQuery>,
) -> impl IntoResponse
where
    C: CheckInRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match check_in_usecase.history(query).await {
        Ok(check_ins) => (StatusCode::OK, Json(check_ins)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn stats<C, M>(
    State(check_in_usecase): State<Arc<CheckInUseCase<C, M>>>,
) -> impl IntoResponse
where
    C: CheckInRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match check_in_usecase.stats().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn check_in<C, M>(
    State(check_in_usecase): State<Arc<CheckInUseCase<C, M>>>,
    Json(check_in_model): Json<CheckInModel>,
) -> impl IntoResponse
where
    C: CheckInRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match check_in_usecase.check_in(check_in_model).await {
        Ok(check_in) => (StatusCode::CREATED, Json(check_in)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn check_out<C, M>(
    State(check_in_usecase): State<Arc<CheckInUseCase<C, M>>>,
    Path(check_in_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: CheckInRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match check_in_usecase.check_out(check_in_id).await {
        Ok(check_in) => (StatusCode::OK, Json(check_in)).into_response(),
        Err(err) => err.into_response(),
    }
}
