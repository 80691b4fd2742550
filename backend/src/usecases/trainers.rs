use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult};
use gymdesk::domain::{
    entities::trainers::{InsertTrainerEntity, UpdateTrainerEntity},
    repositories::trainers::TrainerRepository,
    value_objects::{
        enums::trainer_availabilities::TrainerAvailability,
        trainers::{CreateTrainerModel, TrainerDto, UpdateTrainerModel},
    },
};

pub struct TrainerUseCase<T>
where
    T: TrainerRepository + Send + Sync + 'static,
{
    trainer_repository: Arc<T>,
}

impl<T> TrainerUseCase<T>
where
    T: TrainerRepository + Send + Sync + 'static,
{
    pub fn new(trainer_repository: Arc<T>) -> Self {
        Self { trainer_repository }
    }

    pub async fn list_trainers(&self) -> UseCaseResult<Vec<TrainerDto>> {
        let trainers = self
            .trainer_repository
            .list_trainers()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "trainers: failed to list trainers");
                UseCaseError::Internal(err)
            })?;

        Ok(trainers.into_iter().map(TrainerDto::from).collect())
    }

    pub async fn get_trainer(&self, trainer_id: Uuid) -> UseCaseResult<TrainerDto> {
        self.trainer_repository
            .find_by_id(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "trainers: failed to load trainer");
                UseCaseError::Internal(err)
            })?
            .map(TrainerDto::from)
            .ok_or(UseCaseError::NotFound("trainer"))
    }

    pub async fn create_trainer(&self, model: CreateTrainerModel) -> UseCaseResult<TrainerDto> {
        for (field, value) in [
            ("first_name", &model.first_name),
            ("last_name", &model.last_name),
            ("email", &model.email),
            ("phone", &model.phone),
        ] {
            if value.trim().is_empty() {
                return Err(UseCaseError::Validation(format!("{field} is required")));
            }
        }
        validate_numbers(
            Some(model.experience_years),
            Some(model.hourly_rate),
            Some(model.rating),
        )?;

        let availability = match model.availability.as_deref() {
            Some(raw) => parse_availability(raw)?,
            None => TrainerAvailability::default(),
        };

        let trainer = self
            .trainer_repository
            .create(InsertTrainerEntity {
                first_name: model.first_name.trim().to_string(),
                last_name: model.last_name.trim().to_string(),
                email: model.email.trim().to_string(),
                phone: model.phone.trim().to_string(),
                specializations: model.specializations,
                experience_years: model.experience_years,
                certifications: model.certifications,
                hourly_rate: model.hourly_rate,
                availability: availability.to_string(),
                rating: model.rating,
                bio: model.bio,
                avatar_url: model.avatar_url,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "trainers: failed to create trainer");
                UseCaseError::Internal(err)
            })?;

        info!(trainer_id = %trainer.id, "trainers: trainer created");
        Ok(TrainerDto::from(trainer))
    }

    pub async fn update_trainer(
        &self,
        trainer_id: Uuid,
        model: UpdateTrainerModel,
    ) -> UseCaseResult<TrainerDto> {
        for (field, value) in [
            ("first_name", &model.first_name),
            ("last_name", &model.last_name),
            ("email", &model.email),
            ("phone", &model.phone),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(UseCaseError::Validation(format!("{field} cannot be blank")));
            }
        }
        validate_numbers(model.experience_years, model.hourly_rate, model.rating)?;

        let availability = model
            .availability
            .as_deref()
            .map(parse_availability)
            .transpose()?;

        let trainer = self
            .trainer_repository
            .update(
                trainer_id,
                UpdateTrainerEntity {
                    first_name: model.first_name.map(|v| v.trim().to_string()),
                    last_name: model.last_name.map(|v| v.trim().to_string()),
                    email: model.email.map(|v| v.trim().to_string()),
                    phone: model.phone.map(|v| v.trim().to_string()),
                    specializations: model.specializations,
                    experience_years: model.experience_years,
                    certifications: model.certifications,
                    hourly_rate: model.hourly_rate,
                    availability: availability.map(|a| a.to_string()),
                    rating: model.rating,
                    bio: model.bio,
                    avatar_url: model.avatar_url,
                    updated_at: Some(Utc::now()),
                },
            )
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "trainers: failed to update trainer");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("trainer"))?;

        info!(%trainer_id, "trainers: trainer updated");
        Ok(TrainerDto::from(trainer))
    }
}

fn parse_availability(raw: &str) -> UseCaseResult<TrainerAvailability> {
    TrainerAvailability::from_str(raw.trim())
        .ok_or_else(|| UseCaseError::InvalidArgument(format!("unknown availability `{raw}`")))
}

fn validate_numbers(
    experience_years: Option<i32>,
    hourly_rate: Option<i64>,
    rating: Option<f64>,
) -> UseCaseResult<()> {
    if experience_years.is_some_and(|years| years < 0) {
        return Err(UseCaseError::Validation(
            "experience_years must not be negative".to_string(),
        ));
    }
    if hourly_rate.is_some_and(|rate| rate < 0) {
        return Err(UseCaseError::Validation(
            "hourly_rate must not be negative".to_string(),
        ));
    }
    if rating.is_some_and(|rating| !(0.0..=5.0).contains(&rating)) {
        return Err(UseCaseError::Validation(
            "rating must be between 0 and 5".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gymdesk::domain::{
        entities::trainers::TrainerEntity, repositories::trainers::MockTrainerRepository,
    };

    fn create_model() -> CreateTrainerModel {
        CreateTrainerModel {
            first_name: "Meera".to_string(),
            last_name: "Nair".to_string(),
            email: "meera@example.com".to_string(),
            phone: "9000000020".to_string(),
            specializations: vec!["Strength".to_string()],
            experience_years: 5,
            certifications: vec!["ACE".to_string()],
            hourly_rate: 1200,
            availability: None,
            rating: 4.5,
            bio: None,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn create_trainer_defaults_to_available() {
        let mut trainer_repo = MockTrainerRepository::new();
        trainer_repo
            .expect_create()
            .withf(|insert| insert.availability == "Available")
            .returning(|insert| {
                let now = Utc::now();
                Ok(TrainerEntity {
                    id: Uuid::new_v4(),
                    first_name: insert.first_name,
                    last_name: insert.last_name,
                    email: insert.email,
                    phone: insert.phone,
                    specializations: insert.specializations,
                    experience_years: insert.experience_years,
                    certifications: insert.certifications,
                    hourly_rate: insert.hourly_rate,
                    availability: insert.availability,
                    rating: insert.rating,
                    bio: insert.bio,
                    avatar_url: insert.avatar_url,
                    created_at: now,
                    updated_at: now,
                })
            });

        let dto = TrainerUseCase::new(Arc::new(trainer_repo))
            .create_trainer(create_model())
            .await
            .unwrap();

        assert_eq!(dto.name, "Meera Nair");
        assert_eq!(dto.availability, "Available");
    }

    #[tokio::test]
    async fn rejects_out_of_range_rating() {
        let mut model = create_model();
        model.rating = 7.5;

        let err = TrainerUseCase::new(Arc::new(MockTrainerRepository::new()))
            .create_trainer(model)
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_unknown_availability_on_update() {
        let err = TrainerUseCase::new(Arc::new(MockTrainerRepository::new()))
            .update_trainer(
                Uuid::new_v4(),
                UpdateTrainerModel {
                    availability: Some("On Holiday".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn updating_an_unknown_trainer_is_not_found() {
        let mut trainer_repo = MockTrainerRepository::new();
        trainer_repo.expect_update().returning(|_, _| Ok(None));

        let err = TrainerUseCase::new(Arc::new(trainer_repo))
            .update_trainer(
                Uuid::new_v4(),
                UpdateTrainerModel {
                    availability: Some("Off Duty".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::NotFound("trainer")));
    }
}
