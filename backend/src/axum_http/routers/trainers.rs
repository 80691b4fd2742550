use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::usecases::trainers::TrainerUseCase;
use gymdesk::{
    domain::{
        repositories::trainers::TrainerRepository,
        value_objects::trainers::{CreateTrainerModel, UpdateTrainerModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::trainers::TrainerPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let trainer_repository = TrainerPostgres::new(Arc::clone(&db_pool));
    let trainer_usecase = TrainerUseCase::new(Arc::new(trainer_repository));

    Router::new()
        .route("/", get(list_trainers).post(create_trainer))
        .route("/:id", get(get_trainer).patch(update_trainer))
        .with_state(Arc::new(trainer_usecase))
}

pub async fn list_trainers<T>(
    State(trainer_usecase): State<Arc<TrainerUseCase<T>>>,
) -> impl IntoResponse
where
    T: TrainerRepository + Send + Sync + 'static,
{
    match trainer_usecase.list_trainers().await {
        Ok(trainers) => (StatusCode::OK, Json(trainers)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_trainer<T>(
    State(trainer_usecase): State<Arc<TrainerUseCase<T>>>,
    Path(trainer_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: TrainerRepository + Send + Sync + 'static,
{
    match trainer_usecase.get_trainer(trainer_id).await {
        Ok(trainer) => (StatusCode::OK, Json(trainer)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_trainer<T>(
    State(trainer_usecase): State<Arc<TrainerUseCase<T>>>,
    Json(create_trainer_model): Json<CreateTrainerModel>,
) -> impl IntoResponse
where
    T: TrainerRepository + Send + Sync + 'static,
{
    match trainer_usecase.create_trainer(create_trainer_model).await {
        Ok(trainer) => (StatusCode::CREATED, Json(trainer)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_trainer<T>(
    State(trainer_usecase): State<Arc<TrainerUseCase<T>>>,
    Path(trainer_id): Path<Uuid>,
    Json(update_trainer_model): Json<UpdateTrainerModel>,
) -> impl IntoResponse
where
    T: TrainerRepository + Send + Sync + 'static,
{
    match trainer_usecase
        .update_trainer(trainer_id, update_trainer_model)
        .await
    {
        Ok(trainer) => (StatusCode::OK, Json(trainer)).into_response(),
        Err(err) => err.into_response(),
    }
}
