use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    entities::membership_plans::MembershipPlanEntity, value_objects::enums::plan_types::PlanType,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MembershipPlanDto {
    pub id: Uuid,
    pub name: String,
    pub duration_months: i32,
    #[serde(rename = "type")]
    pub plan_type: Option<PlanType>,
    pub price: i64,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<MembershipPlanEntity> for MembershipPlanDto {
    fn from(value: MembershipPlanEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            duration_months: value.duration_months,
            plan_type: PlanType::from_str(&value.plan_type),
            price: value.price,
            description: value.description,
            is_active: value.is_active,
        }
    }
}
