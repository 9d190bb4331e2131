//! CSV loader for taxpayer profiles.
//!
//! | Column                     | Required | Notes                                 |
//! |----------------------------|----------|---------------------------------------|
//! | `id`                       | yes      | Copied to the output unchanged        |
//! | `gross_income`             | yes      | Rupees, e.g. `1200000`                |
//! | `age`                      | yes      | Whole years                           |
//! | `regime`                   | no       | `new` or `old`; empty means `new`     |
//! | `is_salaried`              | no       | `true` or `false`; empty means `true` |
//! | `deductions_80c`           | no       | Empty means zero                      |
//! | `health_insurance_premium` | no       | Empty means zero                      |
//!
//! ```csv
//! id,gross_income,age,regime,is_salaried,deductions_80c,health_insurance_premium
//! A-1,1200000,30,new,true,,
//! A-2,1000000,45,old,true,150000,25000
//! ```

use std::io::Read;

use itax_core::{Regime, TaxEngineError, TaxInput};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading taxpayer profiles.
#[derive(Debug, Error)]
pub enum TaxpayerLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("CSV write error: {0}")]
    CsvWrite(String),

    #[error("invalid regime '{regime}' on row {row}")]
    InvalidRegime { regime: String, row: usize },

    #[error("{field} out of range on row {row}: {value}")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        row: usize,
    },
}

impl From<csv::Error> for TaxpayerLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxpayerLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the taxpayer CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxpayerRecord {
    pub id: String,
    pub gross_income: Decimal,
    pub age: u32,
    pub regime: Option<String>,
    pub is_salaried: Option<bool>,
    pub deductions_80c: Option<Decimal>,
    pub health_insurance_premium: Option<Decimal>,
}

/// A validated profile ready for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxpayerProfile {
    pub id: String,
    pub input: TaxInput,
}

/// Converts a record into a profile. `row` is 1-based (header = row 0).
fn convert_record(
    record: TaxpayerRecord,
    row: usize,
) -> Result<TaxpayerProfile, TaxpayerLoaderError> {
    let regime = match record.regime.as_deref().map(str::trim) {
        None | Some("") => Regime::New,
        Some(name) => Regime::parse(name).map_err(|_| TaxpayerLoaderError::InvalidRegime {
            regime: name.to_string(),
            row,
        })?,
    };

    let input = TaxInput::new(record.gross_income, record.age, regime)
        .with_salaried(record.is_salaried.unwrap_or(true))
        .with_deductions_80c(record.deductions_80c.unwrap_or_default())
        .with_health_insurance_premium(record.health_insurance_premium.unwrap_or_default());

    input.validate().map_err(|err| match err {
        TaxEngineError::OutOfRangeInput { field, value } => {
            TaxpayerLoaderError::OutOfRange { field, value, row }
        }
        TaxEngineError::InvalidRegime(regime) => TaxpayerLoaderError::InvalidRegime { regime, row },
    })?;

    Ok(TaxpayerProfile {
        id: record.id,
        input,
    })
}

/// Loader for taxpayer profiles from CSV files.
pub struct TaxpayerLoader;

impl TaxpayerLoader {
    /// Parse raw records from a CSV reader without validating them.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxpayerRecord>, TaxpayerLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxpayerRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate profiles, stopping at the first bad row.
    ///
    /// # Errors
    ///
    /// * [`TaxpayerLoaderError::CsvParse`] if the CSV is malformed.
    /// * [`TaxpayerLoaderError::InvalidRegime`] for an unknown regime name.
    /// * [`TaxpayerLoaderError::OutOfRange`] for a non-positive income or a
    ///   negative deduction.
    pub fn load<R: Read>(reader: R) -> Result<Vec<TaxpayerProfile>, TaxpayerLoaderError> {
        Self::parse(reader)?
            .into_iter()
            .enumerate()
            .map(|(idx, record)| convert_record(record, idx + 1))
            .collect()
    }
}
