use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::usecases::classes::ClassUseCase;
use gymdesk::{
    domain::{
        repositories::{
            classes::ClassRepository, members::MemberRepository, trainers::TrainerRepository,
        },
        value_objects::classes::{BookClassModel, CreateClassModel, UpdateClassModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            classes::ClassPostgres, members::MemberPostgres, trainers::TrainerPostgres,
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let class_repository = ClassPostgres::new(Arc::clone(&db_pool));
    let trainer_repository = TrainerPostgres::new(Arc::clone(&db_pool));
    let member_repository = MemberPostgres::new(Arc::clone(&db_pool));
    let class_usecase = ClassUseCase::new(
        Arc::new(class_repository),
        Arc::new(trainer_repository),
        Arc::new(member_repository),
    );

    Router::new()
        .route("/", get(list_classes).post(create_class))
        .route(
            "/:id",
            get(get_class).patch(update_class).delete(delete_class),
        )
        .route("/:id/bookings", get(list_bookings).post(book_class))
        .with_state(Arc::new(class_usecase))
}

pub async fn list_classes<C, T, M>(
    State(class_usecase): State<Arc<ClassUseCase<C, T, M>>>,
) -> impl IntoResponse
where
    C: ClassRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match class_usecase.list_classes().await {
        Ok(classes) => (StatusCode::OK, Json(classes)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_class<C, T, M>(
    State(class_usecase): State<Arc<ClassUseCase<C, T, M>>>,
    Path(class_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: ClassRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match class_usecase.get_class(class_id).await {
        Ok(class) => (StatusCode::OK, Json(class)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_class<C, T, M>(
    State(class_usecase): State<Arc<ClassUseCase<C, T, M>>>,
    Json(create_class_model): Json<CreateClassModel>,
) -> impl IntoResponse
where
    C: ClassRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match class_usecase.create_class(create_class_model).await {
        Ok(class) => (StatusCode::CREATED, Json(class)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_class<C, T, M>(
    State(class_usecase): State<Arc<ClassUseCase<C, T, M>>>,
    Path(class_id): Path<Uuid>,
    Json(update_class_model): Json<UpdateClassModel>,
) -> impl IntoResponse
where
    C: ClassRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match class_usecase.update_class(class_id, update_class_model).await {
        Ok(class) => (StatusCode::OK, Json(class)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_class<C, T, M>(
    State(class_usecase): State<Arc<ClassUseCase<C, T, M>>>,
    Path(class_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: ClassRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match class_usecase.delete_class(class_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn book_class<C, T, M>(
    State(class_usecase): State<Arc<ClassUseCase<C, T, M>>>,
    Path(class_id): Path<Uuid>,
    Json(book_class_model): Json<BookClassModel>,
) -> impl IntoResponse
where
    C: ClassRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match class_usecase.book_class(class_id, book_class_model).await {
        Ok(booking) => (StatusCode::CREATED, Json(booking)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_bookings<C, T, M>(
    State(class_usecase): State<Arc<ClassUseCase<C, T, M>>>,
    Path(class_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: ClassRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    match class_usecase.list_bookings(class_id).await {
        Ok(bookings) => (StatusCode::OK, Json(bookings)).into_response(),
        Err(err) => err.into_response(),
    }
}
