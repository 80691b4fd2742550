use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::check_ins::{CheckInEntity, InsertCheckInEntity};

#[automock]
#[async_trait]
pub trait CheckInRepository {
    /// Check-ins without a check-out, newest first.
    async fn list_active(&self) -> Result<Vec<CheckInEntity>>;
    async fn list_history(&self, limit: i64) -> Result<Vec<CheckInEntity>>;
    async fn find_by_id(&self, check_in_id: Uuid) -> Result<Option<CheckInEntity>>;
    async fn find_open_for_member(&self, member_id: Uuid) -> Result<Option<CheckInEntity>>;
    /// `None` when the member already has an open check-in.
    async fn check_in(
        &self,
        insert_check_in_entity: InsertCheckInEntity,
    ) -> Result<Option<CheckInEntity>>;
    /// `None` when the check-in does not exist or was already closed.
    async fn check_out(
        &self,
        check_in_id: Uuid,
        check_out_time: DateTime<Utc>,
        duration_minutes: i32,
    ) -> Result<Option<CheckInEntity>>;
    /// Check-ins with `from <= check_in_time < until`; `None` leaves the range open.
    async fn count_between(&self, from: DateTime<Utc>, until: Option<DateTime<Utc>>)
    -> Result<i64>;
    async fn count_open(&self) -> Result<i64>;
}
