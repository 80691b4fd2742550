use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::usecases::payments::PaymentUseCase;
use gymdesk::{
    domain::{
        repositories::{members::MemberRepository, payments::PaymentRepository},
        value_objects::payments::CreatePaymentModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{members::MemberPostgres, payments::PaymentPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let member_repository = MemberPostgres::new(Arc::clone(&db_pool));
    let payment_usecase =
        PaymentUseCase::new(Arc::new(payment_repository), Arc::new(member_repository));

    Router::new()
        .route("/", get(list_payments).post(record_payment))
        .route("/stats", get(stats))
        .route("/members/:member_id", get(list_member_payments))
        .with_state(Arc::new(payment_usecase))
}

pub async fn list_payments<Pay, M>(
    State(payment_usecase): State<Arc<PaymentUseCase<Pay, M>>>,
) -> impl IntoResponse
where
    Pay: PaymentRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match payment_usecase.list_payments().await {
        Ok(payments) => (StatusCode::OK, Json(payments)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_member_payments<Pay, M>(
    State(payment_usecase): State<Arc<PaymentUseCase<Pay, M>>>,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse
where
    Pay: PaymentRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match payment_usecase.list_member_payments(member_id).await {
        Ok(payments) => (StatusCode::OK, Json(payments)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn record_payment<Pay, M>(
    State(payment_usecase): State<Arc<PaymentUseCase<Pay, M>>>,
    Json(create_payment_model): Json<CreatePaymentModel>,
) -> impl IntoResponse
where
    Pay: PaymentRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match payment_usecase.record_payment(create_payment_model).await {
        Ok(recorded) => (StatusCode::CREATED, Json(recorded)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn stats<Pay, M>(
    State(payment_usecase): State<Arc<PaymentUseCase<Pay, M>>>,
) -> impl IntoResponse
where
    Pay: PaymentRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match payment_usecase.stats().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(err) => err.into_response(),
    }
}
