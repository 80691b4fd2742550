use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::usecases::equipment::EquipmentUseCase;
use gymdesk::{
    domain::{
        repositories::equipment::EquipmentRepository,
        value_objects::equipment::{
            CreateEquipmentModel, ListEquipmentQuery, UpdateEquipmentModel,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::equipment::EquipmentPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let equipment_repository = EquipmentPostgres::new(Arc::clone(&db_pool));
    let equipment_usecase = EquipmentUseCase::new(Arc::new(equipment_repository));

    Router::new()
        .route("/", get(list_equipment).post(create_equipment))
        .route("/maintenance-due", get(list_maintenance_due))
        .route(
            "/:id",
            get(get_equipment)
                .patch(update_equipment)
                .delete(delete_equipment),
        )
        .route("/:id/maintenance", post(record_maintenance))
        .with_state(Arc::new(equipment_usecase))
}

pub async fn list_equipment<E>(
    State(equipment_usecase): State<Arc<EquipmentUseCase<E>>>,
    Query(query): Query<ListEquipmentQuery>,
) -> impl IntoResponse
where
    E: EquipmentRepository + Send + Sync + 'static,
{
    match equipment_usecase.list_equipment(query).await {
        Ok(equipment) => (StatusCode::OK, Json(equipment)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_maintenance_due<E>(
    State(equipment_usecase): State<Arc<EquipmentUseCase<E>>>,
) -> impl IntoResponse
where
    E: EquipmentRepository + Send + Sync + 'static,
{
    match equipment_usecase.list_maintenance_due().await {
        Ok(equipment) => (StatusCode::OK, Json(equipment)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_equipment<E>(
    State(equipment_usecase): State<Arc<EquipmentUseCase<E>>>,
    Path(equipment_id): Path<Uuid>,
) -> impl IntoResponse
where
    E: EquipmentRepository + Send + Sync + 'static,
{
    match equipment_usecase.get_equipment(equipment_id).await {
        Ok(equipment) => (StatusCode::OK, Json(equipment)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_equipment<E>(
    State(equipment_usecase): State<Arc<EquipmentUseCase<E>>>,
    Json(create_equipment_model): Json<CreateEquipmentModel>,
) -> impl IntoResponse
where
    E: EquipmentRepository + Send + Sync + 'static,
{
    match equipment_usecase
        .create_equipment(create_equipment_model)
        .await
    {
        Ok(equipment) => (StatusCode::CREATED, Json(equipment)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_equipment<E>(
    State(equipment_usecase): State<Arc<EquipmentUseCase<E>>>,
    Path(equipment_id): Path<Uuid>,
    Json(update_equipment_model): Json<UpdateEquipmentModel>,
) -> impl IntoResponse
where
    E: EquipmentRepository + Send + Sync + 'static,
{
    match equipment_usecase
        .update_equipment(equipment_id, update_equipment_model)
        .await
    {
        Ok(equipment) => (StatusCode::OK, Json(equipment)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn record_maintenance<E>(
    State(equipment_usecase): State<Arc<EquipmentUseCase<E>>>,
    Path(equipment_id): Path<Uuid>,
) -> impl IntoResponse
where
    E: EquipmentRepository + Send + Sync + 'static,
{
    match equipment_usecase.record_maintenance(equipment_id).await {
        Ok(equipment) => (StatusCode::OK, Json(equipment)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_equipment<E>(
    State(equipment_usecase): State<Arc<EquipmentUseCase<E>>>,
    Path(equipment_id): Path<Uuid>,
) -> impl IntoResponse
where
    E: EquipmentRepository + Send + Sync + 'static,
{
    match equipment_usecase.delete_equipment(equipment_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
