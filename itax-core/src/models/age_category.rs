use serde::{Deserialize, Serialize};

use crate::models::OldRegimeRules;

/// Age bracket that decides the old-regime basic exemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeCategory {
    Regular,
    Senior,
    SuperSenior,
}

impl AgeCategory {
    pub fn from_age(
        age: u32,
        rules: &OldRegimeRules,
    ) -> Self {
        if age >= rules.super_senior_age {
            Self::SuperSenior
        } else if age >= rules.senior_age {
            Self::Senior
        } else {
            Self::Regular
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Senior => "senior",
            Self::SuperSenior => "super_senior",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Regular => "Below 60",
            Self::Senior => "Senior citizen (60-79)",
            Self::SuperSenior => "Super senior citizen (80+)",
        }
    }
}
