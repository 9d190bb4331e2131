use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TaxEngineError;

/// The statutory scheme a taxpayer elects for the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Regime {
    New,
    Old,
}

impl Regime {
    pub fn all() -> &'static [Regime] {
        &[Regime::New, Regime::Old]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Old => "old",
        }
    }

    /// Parses a regime name, ignoring surrounding whitespace and case.
    pub fn parse(s: &str) -> Result<Self, TaxEngineError> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "old" => Ok(Self::Old),
            _ => Err(TaxEngineError::InvalidRegime(s.to_string())),
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Regime {
    type Err = TaxEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Regime {
    type Error = TaxEngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
