use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    Single,
    Couple,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Single => "single",
            PlanType::Couple => "couple",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "single" => Some(PlanType::Single),
            "couple" => Some(PlanType::Couple),
            _ => None,
        }
    }
}

impl Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
