use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult};
use gymdesk::domain::{
    entities::equipment::{EquipmentEntity, InsertEquipmentEntity, UpdateEquipmentEntity},
    ledger::MembershipLedger,
    repositories::equipment::EquipmentRepository,
    value_objects::{
        enums::equipment_statuses::EquipmentStatus,
        equipment::{CreateEquipmentModel, EquipmentDto, ListEquipmentQuery, UpdateEquipmentModel},
    },
};

pub struct EquipmentUseCase<E>
where
    E: EquipmentRepository + Send + Sync + 'static,
{
    equipment_repository: Arc<E>,
}

impl<E> EquipmentUseCase<E>
where
    E: EquipmentRepository + Send + Sync + 'static,
{
    pub fn new(equipment_repository: Arc<E>) -> Self {
        Self {
            equipment_repository,
        }
    }

    pub async fn list_equipment(
        &self,
        query: ListEquipmentQuery,
    ) -> UseCaseResult<Vec<EquipmentDto>> {
        let status = query.status.as_deref().map(parse_status).transpose()?;

        let equipment = self
            .equipment_repository
            .list_equipment(status)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "equipment: failed to list equipment");
                UseCaseError::Internal(err)
            })?;

        Ok(equipment.into_iter().map(EquipmentDto::from).collect())
    }

    pub async fn list_maintenance_due(&self) -> UseCaseResult<Vec<EquipmentDto>> {
        let today = MembershipLedger::for_local_today().today();

        let equipment = self
            .equipment_repository
            .list_maintenance_due(today)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "equipment: failed to list maintenance due");
                UseCaseError::Internal(err)
            })?;

        Ok(equipment.into_iter().map(EquipmentDto::from).collect())
    }

    pub async fn get_equipment(&self, equipment_id: Uuid) -> UseCaseResult<EquipmentDto> {
        self.equipment_repository
            .find_by_id(equipment_id)
            .await
            .map_err(|err| {
                error!(%equipment_id, db_error = ?err, "equipment: failed to load equipment");
                UseCaseError::Internal(err)
            })?
            .map(EquipmentDto::from)
            .ok_or(UseCaseError::NotFound("equipment"))
    }

    pub async fn create_equipment(
        &self,
        model: CreateEquipmentModel,
    ) -> UseCaseResult<EquipmentDto> {
        for (field, value) in [
            ("name", &model.name),
            ("category", &model.category),
            ("serial_number", &model.serial_number),
            ("location", &model.location),
        ] {
            if value.trim().is_empty() {
                return Err(UseCaseError::Validation(format!("{field} is required")));
            }
        }

        let equipment = self
            .equipment_repository
            .create(InsertEquipmentEntity {
                name: model.name.trim().to_string(),
                category: model.category.trim().to_string(),
                serial_number: model.serial_number.trim().to_string(),
                location: model.location.trim().to_string(),
                status: EquipmentStatus::Operational.to_string(),
                purchase_date: model.purchase_date,
                warranty_expiry: model.warranty_expiry,
                next_maintenance: model.next_maintenance,
                notes: model.notes,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "equipment: failed to create equipment");
                UseCaseError::Internal(err)
            })?;

        info!(equipment_id = %equipment.id, "equipment: equipment registered");
        Ok(EquipmentDto::from(equipment))
    }

    pub async fn update_equipment(
        &self,
        equipment_id: Uuid,
        model: UpdateEquipmentModel,
    ) -> UseCaseResult<EquipmentDto> {
        for (field, value) in [
            ("name", &model.name),
            ("category", &model.category),
            ("serial_number", &model.serial_number),
            ("location", &model.location),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(UseCaseError::Validation(format!("{field} cannot be blank")));
            }
        }
        let status = model.status.as_deref().map(parse_status).transpose()?;

        let equipment = self
            .apply_update(
                equipment_id,
                UpdateEquipmentEntity {
                    name: model.name.map(|v| v.trim().to_string()),
                    category: model.category.map(|v| v.trim().to_string()),
                    serial_number: model.serial_number.map(|v| v.trim().to_string()),
                    location: model.location.map(|v| v.trim().to_string()),
                    status: status.map(|s| s.to_string()),
                    purchase_date: model.purchase_date,
                    warranty_expiry: model.warranty_expiry,
                    last_maintenance: model.last_maintenance,
                    next_maintenance: model.next_maintenance,
                    notes: model.notes,
                    updated_at: Some(Utc::now()),
                },
            )
            .await?;

        info!(%equipment_id, "equipment: equipment updated");
        Ok(EquipmentDto::from(equipment))
    }

    /// Takes the item out of service for maintenance starting today.
    pub async fn record_maintenance(&self, equipment_id: Uuid) -> UseCaseResult<EquipmentDto> {
        let today = MembershipLedger::for_local_today().today();

        let equipment = self
            .apply_update(
                equipment_id,
                UpdateEquipmentEntity {
                    status: Some(EquipmentStatus::Maintenance.to_string()),
                    last_maintenance: Some(today),
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await?;

        info!(%equipment_id, %today, "equipment: maintenance recorded");
        Ok(EquipmentDto::from(equipment))
    }

    pub async fn delete_equipment(&self, equipment_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .equipment_repository
            .delete(equipment_id)
            .await
            .map_err(|err| {
                error!(%equipment_id, db_error = ?err, "equipment: failed to delete equipment");
                UseCaseError::Internal(err)
            })?;

        if !deleted {
            return Err(UseCaseError::NotFound("equipment"));
        }

        info!(%equipment_id, "equipment: equipment deleted");
        Ok(())
    }

    async fn apply_update(
        &self,
        equipment_id: Uuid,
        update_equipment_entity: UpdateEquipmentEntity,
    ) -> UseCaseResult<EquipmentEntity> {
        self.equipment_repository
            .update(equipment_id, update_equipment_entity)
            .await
            .map_err(|err| {
                error!(%equipment_id, db_error = ?err, "equipment: failed to update equipment");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("equipment"))
    }
}

fn parse_status(raw: &str) -> UseCaseResult<EquipmentStatus> {
    EquipmentStatus::from_str(raw.trim())
        .ok_or_else(|| UseCaseError::InvalidArgument(format!("unknown equipment status `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDate};
    use gymdesk::domain::repositories::equipment::MockEquipmentRepository;
    use mockall::predicate::eq;

    fn sample_equipment(status: EquipmentStatus) -> EquipmentEntity {
        let now = Utc::now();
        EquipmentEntity {
            id: Uuid::new_v4(),
            name: "Treadmill T-200".to_string(),
            category: "Cardio".to_string(),
            serial_number: "TM-200-0042".to_string(),
            location: "Cardio Zone".to_string(),
            status: status.to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2023, 4, 1),
            warranty_expiry: NaiveDate::from_ymd_opt(2026, 4, 1),
            last_maintenance: None,
            next_maintenance: NaiveDate::from_ymd_opt(2024, 5, 1),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn filters_by_parsed_status() {
        let mut equipment_repo = MockEquipmentRepository::new();
        equipment_repo
            .expect_list_equipment()
            .with(eq(Some(EquipmentStatus::OutOfOrder)))
            .returning(|_| Ok(vec![sample_equipment(EquipmentStatus::OutOfOrder)]));

        let usecase = EquipmentUseCase::new(Arc::new(equipment_repo));
        let equipment = usecase
            .list_equipment(ListEquipmentQuery {
                status: Some("out_of_order".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(equipment.len(), 1);
        assert_eq!(equipment[0].status, "out_of_order");
    }

    #[tokio::test]
    async fn unknown_status_filter_is_invalid_argument() {
        let usecase = EquipmentUseCase::new(Arc::new(MockEquipmentRepository::new()));
        let err = usecase
            .list_equipment(ListEquipmentQuery {
                status: Some("broken".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn maintenance_due_is_checked_against_today() {
        let today = Local::now().date_naive();

        let mut equipment_repo = MockEquipmentRepository::new();
        equipment_repo
            .expect_list_maintenance_due()
            .with(eq(today))
            .returning(|_| Ok(vec![sample_equipment(EquipmentStatus::Operational)]));

        let usecase = EquipmentUseCase::new(Arc::new(equipment_repo));
        assert_eq!(usecase.list_maintenance_due().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn recording_maintenance_moves_item_out_of_service() {
        let equipment = sample_equipment(EquipmentStatus::Operational);
        let equipment_id = equipment.id;
        let today = Local::now().date_naive();

        let mut equipment_repo = MockEquipmentRepository::new();
        equipment_repo
            .expect_update()
            .withf(move |id, update| {
                *id == equipment_id
                    && update.status.as_deref() == Some("maintenance")
                    && update.last_maintenance == Some(today)
            })
            .returning(move |_, update| {
                let mut item = equipment.clone();
                item.status = update.status.unwrap_or_default();
                item.last_maintenance = update.last_maintenance;
                Ok(Some(item))
            });

        let usecase = EquipmentUseCase::new(Arc::new(equipment_repo));
        let dto = usecase.record_maintenance(equipment_id).await.unwrap();

        assert_eq!(dto.status, "maintenance");
        assert_eq!(dto.last_maintenance, Some(today));
    }

    #[tokio::test]
    async fn create_requires_serial_number() {
        let usecase = EquipmentUseCase::new(Arc::new(MockEquipmentRepository::new()));
        let err = usecase
            .create_equipment(CreateEquipmentModel {
                name: "Rower".to_string(),
                category: "Cardio".to_string(),
                serial_number: " ".to_string(),
                location: "Cardio Zone".to_string(),
                purchase_date: None,
                warranty_expiry: None,
                next_maintenance: None,
                notes: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Validation(message) if message.contains("serial_number")));
    }
}
