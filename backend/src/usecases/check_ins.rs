use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult};
use gymdesk::domain::{
    entities::check_ins::{CheckInEntity, InsertCheckInEntity},
    ledger::MembershipLedger,
    repositories::{check_ins::CheckInRepository, members::MemberRepository},
    value_objects::check_ins::{CheckInDto, CheckInHistoryQuery, CheckInModel, CheckInStatsDto},
};

pub const MAX_HISTORY_LIMIT: i64 = 200;

pub struct CheckInUseCase<C, M>
where
    C: CheckInRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    check_in_repository: Arc<C>,
    member_repository: Arc<M>,
    default_history_limit: i64,
}

impl<C, M> CheckInUseCase<C, M>
where
    C: CheckInRepository + Send + Sync + 'static,
    M: MemberRepository + Send + Sync + 'static,
{
    pub fn new(
        check_in_repository: Arc<C>,
        member_repository: Arc<M>,
        default_history_limit: i64,
    ) -> Self {
        Self {
            check_in_repository,
            member_repository,
            default_history_limit,
        }
    }

    pub async fn list_active(&self) -> UseCaseResult<Vec<CheckInDto>> {
        let check_ins = self
            .check_in_repository
            .list_active()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "check_ins: failed to list active check-ins");
                UseCaseError::Internal(err)
            })?;

        Ok(check_ins.into_iter().map(CheckInDto::from).collect())
    }

    /// Most recent first. Limits above the maximum are capped.
    pub async fn history(&self, query: CheckInHistoryQuery) -> UseCaseResult<Vec<CheckInDto>> {
        let limit = query.limit.unwrap_or(self.default_history_limit);
        if limit < 1 {
            return Err(UseCaseError::InvalidArgument(format!(
                "limit must be positive, got {limit}"
            )));
        }
        let limit = limit.min(MAX_HISTORY_LIMIT);

        let check_ins = self
            .check_in_repository
            .list_history(limit)
            .await
            .map_err(|err| {
                error!(limit, db_error = ?err, "check_ins: failed to load history");
                UseCaseError::Internal(err)
            })?;

        Ok(check_ins.into_iter().map(CheckInDto::from).collect())
    }

    pub async fn stats(&self) -> UseCaseResult<CheckInStatsDto> {
        let today = MembershipLedger::for_local_today().today();
        let today_start = local_midnight(today)?;
        let yesterday_start = local_midnight(today - Duration::days(1))?;
        let week_start = local_midnight(today - Duration::days(6))?;

        let today_count = self.count_between(today_start, None).await?;
        let yesterday = self.count_between(yesterday_start, Some(today_start)).await?;
        let this_week = self.count_between(week_start, None).await?;
        let currently_in = self.check_in_repository.count_open().await.map_err(|err| {
            error!(db_error = ?err, "check_ins: failed to count open check-ins");
            UseCaseError::Internal(err)
        })?;

        Ok(CheckInStatsDto {
            today: today_count,
            yesterday,
            this_week,
            currently_in,
        })
    }

    pub async fn check_in(&self, model: CheckInModel) -> UseCaseResult<CheckInDto> {
        let member_id = model.member_id;
        let ledger = MembershipLedger::for_local_today();

        let member = self
            .member_repository
            .find_by_id(member_id)
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "check_ins: failed to load member");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("member"))?;

        let effective_status = ledger.effective_status(&member);
        if !effective_status.grants_access() {
            let err = UseCaseError::Validation(format!(
                "member {} is {effective_status} and cannot check in",
                member.full_name()
            ));
            warn!(
                %member_id,
                %effective_status,
                status = err.status_code().as_u16(),
                "check_ins: check-in refused"
            );
            return Err(err);
        }

        let open = self
            .check_in_repository
            .find_open_for_member(member_id)
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "check_ins: failed to load open check-in");
                UseCaseError::Internal(err)
            })?;
        if let Some(open) = open {
            warn!(%member_id, check_in_id = %open.id, "check_ins: member already checked in");
            return Err(UseCaseError::Conflict(format!(
                "member {} is already checked in",
                member.full_name()
            )));
        }

        let check_in = self
            .check_in_repository
            .check_in(InsertCheckInEntity {
                member_id,
                check_in_time: Utc::now(),
            })
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "check_ins: failed to record check-in");
                UseCaseError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%member_id, "check_ins: concurrent check-in already open");
                UseCaseError::Conflict(format!(
                    "member {} is already checked in",
                    member.full_name()
                ))
            })?;

        info!(%member_id, check_in_id = %check_in.id, "check_ins: member checked in");
        Ok(CheckInDto::from(check_in))
    }

    pub async fn check_out(&self, check_in_id: Uuid) -> UseCaseResult<CheckInDto> {
        let existing = self.find_check_in(check_in_id).await?;
        if existing.check_out_time.is_some() {
            return Err(UseCaseError::Conflict(
                "check-in is already closed".to_string(),
            ));
        }

        let check_out_time = Utc::now();
        let duration_minutes = visit_minutes(existing.check_in_time, check_out_time);

        let check_in = self
            .check_in_repository
            .check_out(check_in_id, check_out_time, duration_minutes)
            .await
            .map_err(|err| {
                error!(%check_in_id, db_error = ?err, "check_ins: failed to record check-out");
                UseCaseError::Internal(err)
            })?
            .ok_or_else(|| UseCaseError::Conflict("check-in is already closed".to_string()))?;

        info!(
            %check_in_id,
            member_id = %check_in.member_id,
            duration_minutes,
            "check_ins: member checked out"
        );
        Ok(CheckInDto::from(check_in))
    }

    async fn find_check_in(&self, check_in_id: Uuid) -> UseCaseResult<CheckInEntity> {
        self.check_in_repository
            .find_by_id(check_in_id)
            .await
            .map_err(|err| {
                error!(%check_in_id, db_error = ?err, "check_ins: failed to load check-in");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("check-in"))
    }

    async fn count_between(
        &self,
        from: DateTime<Utc>,
        until: Option<DateTime<Utc>>,
    ) -> UseCaseResult<i64> {
        self.check_in_repository
            .count_between(from, until)
            .await
            .map_err(|err| {
                error!(%from, db_error = ?err, "check_ins: failed to count check-ins");
                UseCaseError::Internal(err)
            })
    }
}

/// Start of `date` in the host's local time zone.
fn local_midnight(date: NaiveDate) -> UseCaseResult<DateTime<Utc>> {
    start_of_day(date, &Local)
        .ok_or_else(|| UseCaseError::Internal(anyhow::anyhow!("no local start of day on {date}")))
}

/// First valid local minute of `date` in `tz`.
///
/// A DST gap can skip midnight; the day then starts when the clocks resume.
fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    (0..=180)
        .find_map(|minute| {
            (midnight + Duration::minutes(minute))
                .and_local_timezone(tz.clone())
                .earliest()
        })
        .map(|local| local.with_timezone(&Utc))
}

fn visit_minutes(check_in_time: DateTime<Utc>, check_out_time: DateTime<Utc>) -> i32 {
    let minutes = (check_out_time - check_in_time).num_minutes().max(0);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}
