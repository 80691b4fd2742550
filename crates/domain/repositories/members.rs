use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::members::{InsertMemberEntity, MemberEntity, UpdateMemberEntity};

#[automock]
#[async_trait]
pub trait MemberRepository {
    /// Newest members first.
    async fn list_members(&self) -> Result<Vec<MemberEntity>>;
    async fn find_by_id(&self, member_id: Uuid) -> Result<Option<MemberEntity>>;
    async fn create(&self, insert_member_entity: InsertMemberEntity) -> Result<MemberEntity>;
    async fn update(
        &self,
        member_id: Uuid,
        update_member_entity: UpdateMemberEntity,
    ) -> Result<Option<MemberEntity>>;
    async fn delete(&self, member_id: Uuid) -> Result<bool>;
}
