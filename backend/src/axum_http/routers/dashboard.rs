use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};

use crate::usecases::dashboard::DashboardUseCase;
use gymdesk::{
    domain::repositories::{
        check_ins::CheckInRepository, members::MemberRepository, payments::PaymentRepository,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            check_ins::CheckInPostgres, members::MemberPostgres, payments::PaymentPostgres,
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let member_repository = MemberPostgres::new(Arc::clone(&db_pool));
    let check_in_repository = CheckInPostgres::new(Arc::clone(&db_pool));
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let dashboard_usecase = DashboardUseCase::new(
        Arc::new(member_repository),
        Arc::new(check_in_repository),
        Arc::new(payment_repository),
    );

    Router::new()
        .route("/alerts", get(alerts))
        .route("/summary", get(summary))
        .with_state(Arc::new(dashboard_usecase))
}

pub async fn alerts<M, C, Pay>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<M, C, Pay>>>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    C: CheckInRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    match dashboard_usecase.alerts().await {
        Ok(alerts) => (StatusCode::OK, Json(alerts)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn summary<M, C, Pay>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<M, C, Pay>>>,
) -> impl IntoResponse
where
    M: MemberRepository + Send + Sync + 'static,
    C: CheckInRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    match dashboard_usecase.summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => err.into_response(),
    }
}
