use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    #[default]
    Operational,
    Maintenance,
    OutOfOrder,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Operational => "operational",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::OutOfOrder => "out_of_order",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "operational" => Some(EquipmentStatus::Operational),
            "maintenance" => Some(EquipmentStatus::Maintenance),
            "out_of_order" => Some(EquipmentStatus::OutOfOrder),
            _ => None,
        }
    }
}

impl Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
