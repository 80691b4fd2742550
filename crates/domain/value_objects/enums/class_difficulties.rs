use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClassDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl ClassDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassDifficulty::Beginner => "Beginner",
            ClassDifficulty::Intermediate => "Intermediate",
            ClassDifficulty::Advanced => "Advanced",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "Beginner" => Some(ClassDifficulty::Beginner),
            "Intermediate" => Some(ClassDifficulty::Intermediate),
            "Advanced" => Some(ClassDifficulty::Advanced),
            _ => None,
        }
    }
}

impl Display for ClassDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
