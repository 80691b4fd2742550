use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult};
use gymdesk::domain::{
    entities::{
        members::{InsertMemberEntity, MemberEntity, UpdateMemberEntity},
        membership_plans::MembershipPlanEntity,
    },
    ledger::{ExpiryOutlook, MembershipLedger, calendar::parse_calendar_date},
    repositories::{members::MemberRepository, membership_plans::MembershipPlanRepository},
    value_objects::{
        enums::{effective_statuses::EffectiveStatus, member_statuses::MemberStatus},
        members::{
            CreateMemberModel, ListMembersQuery, MemberDto, MemberListFilter, MemberStatusFilter,
            RenewMembershipModel, UpdateMemberModel,
        },
    },
};

pub struct MemberUseCase<M, P>
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    member_repository: Arc<M>,
    plan_repository: Arc<P>,
}

impl<M, P> MemberUseCase<M, P>
where
    M: MemberRepository + Send + Sync + 'static,
    P: MembershipPlanRepository + Send + Sync + 'static,
{
    pub fn new(member_repository: Arc<M>, plan_repository: Arc<P>) -> Self {
        Self {
            member_repository,
            plan_repository,
        }
    }

    pub async fn list_members(&self, query: ListMembersQuery) -> UseCaseResult<Vec<MemberDto>> {
        let status = match query.status.as_deref() {
            None => MemberStatusFilter::All,
            Some(raw) => MemberStatusFilter::from_str(raw).ok_or_else(|| {
                let err = UseCaseError::InvalidArgument(format!("unknown member status `{raw}`"));
                warn!(
                    status_filter = raw,
                    status = err.status_code().as_u16(),
                    "members: invalid status filter"
                );
                err
            })?,
        };

        self.filtered(MemberListFilter {
            search: query.search,
            status,
        })
        .await
    }

    pub async fn list_expiring(&self) -> UseCaseResult<Vec<MemberDto>> {
        self.filtered(MemberListFilter::by_status(MemberStatusFilter::Effective(
            EffectiveStatus::ExpiringSoon,
        )))
        .await
    }

    pub async fn list_expired(&self) -> UseCaseResult<Vec<MemberDto>> {
        self.filtered(MemberListFilter::by_status(MemberStatusFilter::Effective(
            EffectiveStatus::Expired,
        )))
        .await
    }

    pub async fn list_pending_payments(&self) -> UseCaseResult<Vec<MemberDto>> {
        self.filtered(MemberListFilter::by_status(MemberStatusFilter::PendingPayment))
            .await
    }

    pub fn preview_expiry(&self, raw_expiry_date: &str) -> UseCaseResult<ExpiryOutlook> {
        let expiry_date = parse_calendar_date(raw_expiry_date)?;
        Ok(MembershipLedger::for_local_today().classify(expiry_date))
    }

    pub async fn get_member(&self, member_id: Uuid) -> UseCaseResult<MemberDto> {
        let member = self.find_member(member_id).await?;
        Ok(MemberDto::from_entity(
            member,
            &MembershipLedger::for_local_today(),
        ))
    }

    pub async fn create_member(&self, model: CreateMemberModel) -> UseCaseResult<MemberDto> {
        let missing = model.missing_fields();
        if !missing.is_empty() {
            let err = UseCaseError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ));
            warn!(
                missing = ?missing,
                status = err.status_code().as_u16(),
                "members: create rejected"
            );
            return Err(err);
        }

        let ledger = MembershipLedger::for_local_today();
        let plan = self.find_active_plan(model.membership_plan_id).await?;
        let join_date = match model.join_date.as_deref() {
            Some(raw) => parse_calendar_date(raw)?,
            None => ledger.today(),
        };
        let enrollment = MembershipLedger::enroll(&plan, join_date, model.amount_paid)?;

        let insert_member_entity = InsertMemberEntity {
            first_name: model.first_name.trim().to_string(),
            last_name: model.last_name.trim().to_string(),
            email: model.email.trim().to_string(),
            phone: model.phone.trim().to_string(),
            membership_plan_id: enrollment.membership_plan_id,
            membership_type: enrollment.membership_type,
            membership_price: enrollment.membership_price,
            amount_paid: enrollment.amount_paid,
            pending_amount: enrollment.pending_amount,
            join_date: enrollment.join_date,
            expiry_date: enrollment.expiry_date,
            status: MemberStatus::Active.to_string(),
            emergency_contact: model.emergency_contact.trim().to_string(),
            emergency_phone: model.emergency_phone.trim().to_string(),
            notes: model.notes,
            avatar_url: model.avatar_url,
        };

        let member = self
            .member_repository
            .create(insert_member_entity)
            .await
            .map_err(|err| {
                error!(
                    plan_id = %plan.id,
                    db_error = ?err,
                    "members: failed to create member"
                );
                UseCaseError::Internal(err)
            })?;

        info!(
            member_id = %member.id,
            plan_id = %plan.id,
            expiry_date = %member.expiry_date,
            pending_amount = member.pending_amount,
            "members: member enrolled"
        );

        Ok(MemberDto::from_entity(member, &ledger))
    }

    pub async fn update_member(
        &self,
        member_id: Uuid,
        model: UpdateMemberModel,
    ) -> UseCaseResult<MemberDto> {
        let blanked = model.blanked_fields();
        if !blanked.is_empty() {
            return Err(UseCaseError::Validation(format!(
                "fields cannot be blank: {}",
                blanked.join(", ")
            )));
        }

        let status = model
            .status
            .as_deref()
            .map(|raw| {
                MemberStatus::from_str(raw).ok_or_else(|| {
                    UseCaseError::InvalidArgument(format!("unknown member status `{raw}`"))
                })
            })
            .transpose()?;

        let existing = self.find_member(member_id).await?;

        // Balance columns are written only when the patch touches them.
        let (membership_price, amount_paid, pending_amount) =
            if model.membership_price.is_some() || model.amount_paid.is_some() {
                let membership_price = model.membership_price.unwrap_or(existing.membership_price);
                let amount_paid = model.amount_paid.unwrap_or(existing.amount_paid);
                let pending_amount = MembershipLedger::rebalance(membership_price, amount_paid)?;
                (Some(membership_price), Some(amount_paid), Some(pending_amount))
            } else {
                (None, None, None)
            };

        let update_member_entity = UpdateMemberEntity {
            first_name: model.first_name.map(|v| v.trim().to_string()),
            last_name: model.last_name.map(|v| v.trim().to_string()),
            email: model.email.map(|v| v.trim().to_string()),
            phone: model.phone.map(|v| v.trim().to_string()),
            membership_price,
            amount_paid,
            pending_amount,
            status: status.map(|s| s.to_string()),
            emergency_contact: model.emergency_contact.map(|v| v.trim().to_string()),
            emergency_phone: model.emergency_phone.map(|v| v.trim().to_string()),
            notes: model.notes,
            avatar_url: model.avatar_url,
            updated_at: Some(Utc::now()),
            ..Default::default()
        };

        let member = self.apply_update(member_id, update_member_entity).await?;
        info!(%member_id, "members: member updated");

        Ok(MemberDto::from_entity(
            member,
            &MembershipLedger::for_local_today(),
        ))
    }

    /// Starts a new term on `model.membership_plan_id`; the previous balance is replaced.
    pub async fn renew_membership(
        &self,
        member_id: Uuid,
        model: RenewMembershipModel,
    ) -> UseCaseResult<MemberDto> {
        let ledger = MembershipLedger::for_local_today();
        self.find_member(member_id).await?;
        let plan = self.find_active_plan(model.membership_plan_id).await?;

        let join_date = match model.join_date.as_deref() {
            Some(raw) => parse_calendar_date(raw)?,
            None => ledger.today(),
        };
        let enrollment = MembershipLedger::enroll(&plan, join_date, model.amount_paid)?;

        let update_member_entity = UpdateMemberEntity {
            membership_plan_id: Some(enrollment.membership_plan_id),
            membership_type: Some(enrollment.membership_type),
            membership_price: Some(enrollment.membership_price),
            amount_paid: Some(enrollment.amount_paid),
            pending_amount: Some(enrollment.pending_amount),
            join_date: Some(enrollment.join_date),
            expiry_date: Some(enrollment.expiry_date),
            status: Some(MemberStatus::Active.to_string()),
            updated_at: Some(Utc::now()),
            ..Default::default()
        };

        let member = self.apply_update(member_id, update_member_entity).await?;
        info!(
            %member_id,
            plan_id = %plan.id,
            expiry_date = %member.expiry_date,
            "members: membership renewed"
        );

        Ok(MemberDto::from_entity(member, &ledger))
    }

    pub async fn delete_member(&self, member_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .member_repository
            .delete(member_id)
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "members: failed to delete member");
                UseCaseError::Internal(err)
            })?;

        if !deleted {
            return Err(UseCaseError::NotFound("member"));
        }

        info!(%member_id, "members: member deleted");
        Ok(())
    }

    async fn filtered(&self, filter: MemberListFilter) -> UseCaseResult<Vec<MemberDto>> {
        let ledger = MembershipLedger::for_local_today();

        let members = self.member_repository.list_members().await.map_err(|err| {
            error!(db_error = ?err, "members: failed to list members");
            UseCaseError::Internal(err)
        })?;

        Ok(members
            .into_iter()
            .filter(|member| filter.matches(&ledger, member))
            .map(|member| MemberDto::from_entity(member, &ledger))
            .collect())
    }

    async fn find_member(&self, member_id: Uuid) -> UseCaseResult<MemberEntity> {
        self.member_repository
            .find_by_id(member_id)
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "members: failed to load member");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("member"))
    }

    async fn find_active_plan(&self, plan_id: Uuid) -> UseCaseResult<MembershipPlanEntity> {
        let plan = self
            .plan_repository
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "members: failed to load membership plan");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("membership plan"))?;

        if !plan.is_active {
            warn!(%plan_id, "members: inactive membership plan requested");
            return Err(UseCaseError::Validation(format!(
                "membership plan `{}` is no longer offered",
                plan.name
            )));
        }

        Ok(plan)
    }

    async fn apply_update(
        &self,
        member_id: Uuid,
        update_member_entity: UpdateMemberEntity,
    ) -> UseCaseResult<MemberEntity> {
        self.member_repository
            .update(member_id, update_member_entity)
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "members: failed to update member");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("member"))
    }
}
