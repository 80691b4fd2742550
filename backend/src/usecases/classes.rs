use chrono::{NaiveTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult};
use gymdesk::domain::{
    entities::classes::{
        ClassEntity, InsertClassBookingEntity, InsertClassEntity, UpdateClassEntity,
    },
    ledger::MembershipLedger,
    repositories::{
        classes::ClassRepository, members::MemberRepository, trainers::TrainerRepository,
    },
    value_objects::{
        classes::{BookClassModel, ClassBookingDto, ClassDto, CreateClassModel, UpdateClassModel},
        enums::{booking_statuses::BookingStatus, class_difficulties::ClassDifficulty},
    },
};

pub struct ClassUseCase<C, T, M>
where
    C: ClassRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    class_repository: Arc<C>,
    trainer_repository: Arc<T>,
    member_repository: Arc<M>,
}

impl<C, T, M> ClassUseCase<C, T, M>
where
    C: ClassRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    pub fn new(
        class_repository: Arc<C>,
        trainer_repository: Arc<T>,
        member_repository: Arc<M>,
    ) -> Self {
        Self {
            class_repository,
            trainer_repository,
            member_repository,
        }
    }

    pub async fn list_classes(&self) -> UseCaseResult<Vec<ClassDto>> {
        let classes = self.class_repository.list_active().await.map_err(|err| {
            error!(db_error = ?err, "classes: failed to list classes");
            UseCaseError::Internal(err)
        })?;

        Ok(classes.into_iter().map(ClassDto::from).collect())
    }

    pub async fn get_class(&self, class_id: Uuid) -> UseCaseResult<ClassDto> {
        self.find_class(class_id).await.map(ClassDto::from)
    }

    pub async fn create_class(&self, model: CreateClassModel) -> UseCaseResult<ClassDto> {
        for (field, value) in [
            ("name", &model.name),
            ("location", &model.location),
            ("category", &model.category),
        ] {
            if value.trim().is_empty() {
                return Err(UseCaseError::Validation(format!("{field} is required")));
            }
        }

        let difficulty = parse_difficulty(&model.difficulty)?;
        let duration_minutes = duration_minutes(model.start_time, model.end_time)?;
        if model.capacity < 1 {
            return Err(UseCaseError::Validation(format!(
                "capacity must be at least 1, got {}",
                model.capacity
            )));
        }
        self.ensure_trainer(model.trainer_id).await?;

        let insert_class_entity = InsertClassEntity {
            name: model.name.trim().to_string(),
            trainer_id: model.trainer_id,
            start_time: model.start_time,
            end_time: model.end_time,
            duration_minutes,
            capacity: model.capacity,
            current_participants: 0,
            location: model.location.trim().to_string(),
            difficulty: difficulty.to_string(),
            category: model.category.trim().to_string(),
            description: model.description,
            days_of_week: model.days_of_week,
            is_active: true,
        };

        let class = self
            .class_repository
            .create(insert_class_entity)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "classes: failed to create class");
                UseCaseError::Internal(err)
            })?;

        info!(class_id = %class.id, trainer_id = %class.trainer_id, "classes: class created");
        Ok(ClassDto::from(class))
    }

    pub async fn update_class(
        &self,
        class_id: Uuid,
        model: UpdateClassModel,
    ) -> UseCaseResult<ClassDto> {
        let existing = self.find_class(class_id).await?;

        let difficulty = model
            .difficulty
            .as_deref()
            .map(parse_difficulty)
            .transpose()?;

        let start_time = model.start_time.unwrap_or(existing.start_time);
        let end_time = model.end_time.unwrap_or(existing.end_time);
        let duration_minutes = duration_minutes(start_time, end_time)?;

        if let Some(capacity) = model.capacity {
            if capacity < existing.current_participants.max(1) {
                return Err(UseCaseError::Validation(format!(
                    "capacity must be at least {}, got {capacity}",
                    existing.current_participants.max(1)
                )));
            }
        }

        if let Some(trainer_id) = model.trainer_id {
            self.ensure_trainer(trainer_id).await?;
        }

        let update_class_entity = UpdateClassEntity {
            name: model.name.map(|v| v.trim().to_string()),
            trainer_id: model.trainer_id,
            start_time: Some(start_time),
            end_time: Some(end_time),
            duration_minutes: Some(duration_minutes),
            capacity: model.capacity,
            location: model.location.map(|v| v.trim().to_string()),
            difficulty: difficulty.map(|d| d.to_string()),
            category: model.category.map(|v| v.trim().to_string()),
            description: model.description,
            days_of_week: model.days_of_week,
            is_active: None,
            updated_at: Some(Utc::now()),
        };

        let class = self
            .class_repository
            .update(class_id, update_class_entity)
            .await
            .map_err(|err| {
                error!(%class_id, db_error = ?err, "classes: failed to update class");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("class"))?;

        info!(%class_id, "classes: class updated");
        Ok(ClassDto::from(class))
    }

    pub async fn delete_class(&self, class_id: Uuid) -> UseCaseResult<()> {
        let deactivated = self
            .class_repository
            .deactivate(class_id)
            .await
            .map_err(|err| {
                error!(%class_id, db_error = ?err, "classes: failed to deactivate class");
                UseCaseError::Internal(err)
            })?;

        if !deactivated {
            return Err(UseCaseError::NotFound("class"));
        }

        info!(%class_id, "classes: class deactivated");
        Ok(())
    }

    /// Books `model.member_id` into the class for today. Requires a membership that still
    /// grants access and a free seat.
    pub async fn book_class(
        &self,
        class_id: Uuid,
        model: BookClassModel,
    ) -> UseCaseResult<ClassBookingDto> {
        let member_id = model.member_id;
        let ledger = MembershipLedger::for_local_today();

        let class = self.find_class(class_id).await?;
        if !class.is_active {
            return Err(UseCaseError::Validation(format!(
                "class `{}` is no longer scheduled",
                class.name
            )));
        }

        let member = self
            .member_repository
            .find_by_id(member_id)
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "classes: failed to load member");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("member"))?;

        let effective_status = ledger.effective_status(&member);
        if !effective_status.grants_access() {
            let err = UseCaseError::Validation(format!(
                "member {} is {effective_status} and cannot book classes",
                member.full_name()
            ));
            warn!(
                %member_id,
                %class_id,
                %effective_status,
                status = err.status_code().as_u16(),
                "classes: booking refused"
            );
            return Err(err);
        }

        let booking = self
            .class_repository
            .book(InsertClassBookingEntity {
                member_id,
                class_id,
                booking_date: ledger.today(),
                status: BookingStatus::Booked.to_string(),
            })
            .await
            .map_err(|err| {
                error!(%member_id, %class_id, db_error = ?err, "classes: failed to book class");
                UseCaseError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%member_id, %class_id, capacity = class.capacity, "classes: class is full");
                UseCaseError::Conflict(format!("class `{}` is full", class.name))
            })?;

        info!(%member_id, %class_id, booking_id = %booking.id, "classes: class booked");
        Ok(ClassBookingDto::from(booking))
    }

    pub async fn list_bookings(&self, class_id: Uuid) -> UseCaseResult<Vec<ClassBookingDto>> {
        self.find_class(class_id).await?;

        let bookings = self
            .class_repository
            .list_bookings(class_id)
            .await
            .map_err(|err| {
                error!(%class_id, db_error = ?err, "classes: failed to list bookings");
                UseCaseError::Internal(err)
            })?;

        Ok(bookings.into_iter().map(ClassBookingDto::from).collect())
    }

    async fn find_class(&self, class_id: Uuid) -> UseCaseResult<ClassEntity> {
        self.class_repository
            .find_by_id(class_id)
            .await
            .map_err(|err| {
                error!(%class_id, db_error = ?err, "classes: failed to load class");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("class"))
    }

    async fn ensure_trainer(&self, trainer_id: Uuid) -> UseCaseResult<()> {
        self.trainer_repository
            .find_by_id(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "classes: failed to load trainer");
                UseCaseError::Internal(err)
            })?
            .map(|_| ())
            .ok_or(UseCaseError::NotFound("trainer"))
    }
}

fn parse_difficulty(raw: &str) -> UseCaseResult<ClassDifficulty> {
    ClassDifficulty::from_str(raw.trim())
        .ok_or_else(|| UseCaseError::InvalidArgument(format!("unknown difficulty `{raw}`")))
}

/// Classes never span midnight.
fn duration_minutes(start_time: NaiveTime, end_time: NaiveTime) -> UseCaseResult<i32> {
    if end_time <= start_time {
        return Err(UseCaseError::Validation(format!(
            "end time {end_time} must be after start time {start_time}"
        )));
    }

    i32::try_from((end_time - start_time).num_minutes())
        .map_err(|err| UseCaseError::Internal(err.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};
    use gymdesk::domain::{
        entities::{classes::ClassBookingEntity, members::MemberEntity, trainers::TrainerEntity},
        repositories::{
            classes::MockClassRepository, members::MockMemberRepository,
            trainers::MockTrainerRepository,
        },
    };
    use mockall::predicate::eq;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_class(capacity: i32, current_participants: i32) -> ClassEntity {
        let now = Utc::now();
        ClassEntity {
            id: Uuid::new_v4(),
            name: "Morning Yoga".to_string(),
            trainer_id: Uuid::new_v4(),
            start_time: time(6, 0),
            end_time: time(7, 0),
            duration_minutes: 60,
            capacity,
            current_participants,
            location: "Studio A".to_string(),
            difficulty: "Beginner".to_string(),
            category: "Yoga".to_string(),
            description: None,
            days_of_week: vec!["Monday".to_string(), "Wednesday".to_string()],
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_trainer(trainer_id: Uuid) -> TrainerEntity {
        let now = Utc::now();
        TrainerEntity {
            id: trainer_id,
            first_name: "Vikram".to_string(),
            last_name: "Rao".to_string(),
            email: "vikram@example.com".to_string(),
            phone: "9000000010".to_string(),
            specializations: vec!["Yoga".to_string()],
            experience_years: 8,
            certifications: vec![],
            hourly_rate: 800,
            availability: "Available".to_string(),
            rating: 4.7,
            bio: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_member(expiry_in_days: i64) -> MemberEntity {
        let now = Utc::now();
        let today = Local::now().date_naive();
        MemberEntity {
            id: Uuid::new_v4(),
            first_name: "Sana".to_string(),
            last_name: "Khan".to_string(),
            email: "sana@example.com".to_string(),
            phone: "9000000011".to_string(),
            membership_plan_id: Uuid::new_v4(),
            membership_type: "Single - 1 Month".to_string(),
            membership_price: 2500,
            amount_paid: 2500,
            pending_amount: 0,
            join_date: today - Duration::days(20),
            expiry_date: today + Duration::days(expiry_in_days),
            status: "active".to_string(),
            emergency_contact: "Imran Khan".to_string(),
            emergency_phone: "9000000012".to_string(),
            notes: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_model(trainer_id: Uuid) -> CreateClassModel {
        CreateClassModel {
            name: "HIIT Blast".to_string(),
            trainer_id,
            start_time: time(18, 0),
            end_time: time(18, 45),
            capacity: 20,
            location: "Main Floor".to_string(),
            difficulty: "Advanced".to_string(),
            category: "Cardio".to_string(),
            description: None,
            days_of_week: vec!["Friday".to_string()],
        }
    }

    fn usecase(
        class_repo: MockClassRepository,
        trainer_repo: MockTrainerRepository,
        member_repo: MockMemberRepository,
    ) -> ClassUseCase<MockClassRepository, MockTrainerRepository, MockMemberRepository> {
        ClassUseCase::new(
            Arc::new(class_repo),
            Arc::new(trainer_repo),
            Arc::new(member_repo),
        )
    }

    #[tokio::test]
    async fn create_class_derives_duration_and_starts_empty() {
        let trainer_id = Uuid::new_v4();

        let mut trainer_repo = MockTrainerRepository::new();
        trainer_repo
            .expect_find_by_id()
            .with(eq(trainer_id))
            .returning(move |id| Ok(Some(sample_trainer(id))));

        let mut class_repo = MockClassRepository::new();
        class_repo
            .expect_create()
            .withf(|insert| {
                insert.duration_minutes == 45
                    && insert.current_participants == 0
                    && insert.difficulty == "Advanced"
                    && insert.is_active
            })
            .returning(|insert| {
                let mut class = sample_class(insert.capacity, 0);
                class.name = insert.name;
                class.duration_minutes = insert.duration_minutes;
                Ok(class)
            });

        let dto = usecase(class_repo, trainer_repo, MockMemberRepository::new())
            .create_class(create_model(trainer_id))
            .await
            .unwrap();

        assert_eq!(dto.duration_minutes, 45);
        assert_eq!(dto.spots_left, 20);
    }

    #[tokio::test]
    async fn create_class_rejects_end_before_start() {
        let mut model = create_model(Uuid::new_v4());
        model.end_time = time(17, 30);

        let err = usecase(
            MockClassRepository::new(),
            MockTrainerRepository::new(),
            MockMemberRepository::new(),
        )
        .create_class(model)
        .await
        .unwrap_err();

        assert!(matches!(err, UseCaseError::Validation(_)));
    }

    #[tokio::test]
    async fn create_class_requires_existing_trainer() {
        let mut trainer_repo = MockTrainerRepository::new();
        trainer_repo.expect_find_by_id().returning(|_| Ok(None));

        let err = usecase(
            MockClassRepository::new(),
            trainer_repo,
            MockMemberRepository::new(),
        )
        .create_class(create_model(Uuid::new_v4()))
        .await
        .unwrap_err();

        assert!(matches!(err, UseCaseError::NotFound("trainer")));
    }

    #[tokio::test]
    async fn booking_a_full_class_is_a_conflict() {
        let class = sample_class(10, 10);
        let class_id = class.id;
        let member = sample_member(30);
        let member_id = member.id;

        let mut class_repo = MockClassRepository::new();
        class_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(class.clone())));
        class_repo.expect_book().returning(|_| Ok(None));

        let mut member_repo = MockMemberRepository::new();
        member_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(member.clone())));

        let err = usecase(class_repo, MockTrainerRepository::new(), member_repo)
            .book_class(class_id, BookClassModel { member_id })
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Conflict(_)));
    }

    #[tokio::test]
    async fn expired_members_cannot_book() {
        let class = sample_class(10, 2);
        let class_id = class.id;
        let member = sample_member(0);
        let member_id = member.id;

        let mut class_repo = MockClassRepository::new();
        class_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(class.clone())));
        class_repo.expect_book().never();

        let mut member_repo = MockMemberRepository::new();
        member_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(member.clone())));

        let err = usecase(class_repo, MockTrainerRepository::new(), member_repo)
            .book_class(class_id, BookClassModel { member_id })
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Validation(_)));
    }

    #[tokio::test]
    async fn expiring_soon_members_can_still_book() {
        let class = sample_class(10, 2);
        let class_id = class.id;
        let member = sample_member(3);
        let member_id = member.id;
        let today = Local::now().date_naive();

        let mut class_repo = MockClassRepository::new();
        class_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(class.clone())));
        class_repo
            .expect_book()
            .withf(move |insert| {
                insert.member_id == member_id
                    && insert.class_id == class_id
                    && insert.booking_date == today
                    && insert.status == "booked"
            })
            .returning(|insert| {
                let now = Utc::now();
                Ok(Some(ClassBookingEntity {
                    id: Uuid::new_v4(),
                    member_id: insert.member_id,
                    class_id: insert.class_id,
                    booking_date: insert.booking_date,
                    status: insert.status,
                    created_at: now,
                    updated_at: now,
                }))
            });

        let mut member_repo = MockMemberRepository::new();
        member_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(member.clone())));

        let booking = usecase(class_repo, MockTrainerRepository::new(), member_repo)
            .book_class(class_id, BookClassModel { member_id })
            .await
            .unwrap();

        assert_eq!(booking.member_id, member_id);
        assert_eq!(booking.status, "booked");
    }

    #[tokio::test]
    async fn capacity_cannot_drop_below_current_participants() {
        let class = sample_class(20, 12);
        let class_id = class.id;

        let mut class_repo = MockClassRepository::new();
        class_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(class.clone())));
        class_repo.expect_update().never();

        let err = usecase(
            class_repo,
            MockTrainerRepository::new(),
            MockMemberRepository::new(),
        )
        .update_class(
            class_id,
            UpdateClassModel {
                capacity: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, UseCaseError::Validation(_)));
    }

    #[tokio::test]
    async fn deleting_an_unknown_class_is_not_found() {
        let mut class_repo = MockClassRepository::new();
        class_repo.expect_deactivate().returning(|_| Ok(false));

        let err = usecase(
            class_repo,
            MockTrainerRepository::new(),
            MockMemberRepository::new(),
        )
        .delete_class(Uuid::new_v4())
        .await
        .unwrap_err();

        assert!(matches!(err, UseCaseError::NotFound("class")));
    }
}
