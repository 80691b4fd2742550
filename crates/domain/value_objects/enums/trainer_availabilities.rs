use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrainerAvailability {
    #[default]
    Available,
    Busy,
    #[serde(rename = "Off Duty")]
    OffDuty,
}

impl TrainerAvailability {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainerAvailability::Available => "Available",
            TrainerAvailability::Busy => "Busy",
            TrainerAvailability::OffDuty => "Off Duty",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "Available" => Some(TrainerAvailability::Available),
            "Busy" => Some(TrainerAvailability::Busy),
            "Off Duty" => Some(TrainerAvailability::OffDuty),
            _ => None,
        }
    }
}

impl Display for TrainerAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
