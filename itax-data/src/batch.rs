//! Batch resolution of loaded profiles and CSV output.

use std::io::Write;

use itax_core::TaxEngine;
use itax_core::calculations::common::format_amount;
use serde::Serialize;
use tracing::debug;

use crate::loader::{TaxpayerLoaderError, TaxpayerProfile};

/// One output line for a single-regime calculation.
///
/// Amounts are rendered with two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub id: String,
    pub regime: String,
    pub gross_income: String,
    pub taxable_income: String,
    pub tax_before_cess: String,
    pub cess: String,
    pub rebate_applied: String,
    pub final_tax: String,
    pub effective_rate: String,
}

/// One output line for a regime comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub id: String,
    pub gross_income: String,
    pub new_regime_tax: String,
    pub old_regime_tax: String,
    pub savings: String,
    pub recommended_regime: String,
}

/// Runs the engine over a set of profiles.
#[derive(Debug, Clone, Copy)]
pub struct BatchProcessor<'a> {
    engine: &'a TaxEngine,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(engine: &'a TaxEngine) -> Self {
        Self { engine }
    }

    /// Resolves each profile under its own regime.
    pub fn resolve_all(
        &self,
        profiles: &[TaxpayerProfile],
    ) -> Vec<ResultRow> {
        profiles
            .iter()
            .map(|profile| {
                let result = self.engine.resolve(&profile.input);
                debug!(id = %profile.id, final_tax = %result.final_tax, "resolved profile");

                ResultRow {
                    id: profile.id.clone(),
                    regime: result.regime.to_string(),
                    gross_income: format_amount(result.gross_income),
                    taxable_income: format_amount(result.taxable_income),
                    tax_before_cess: format_amount(result.tax_before_cess),
                    cess: format_amount(result.cess),
                    rebate_applied: format_amount(result.rebate_applied),
                    final_tax: format_amount(result.final_tax),
                    effective_rate: format_amount(result.effective_rate),
                }
            })
            .collect()
    }

    /// Compares both regimes for each profile, ignoring its `regime`.
    pub fn compare_all(
        &self,
        profiles: &[TaxpayerProfile],
    ) -> Vec<ComparisonRow> {
        profiles
            .iter()
            .map(|profile| {
                let comparison = self.engine.compare_input(&profile.input);

                ComparisonRow {
                    id: profile.id.clone(),
                    gross_income: format_amount(profile.input.gross_income),
                    new_regime_tax: format_amount(comparison.new_regime.final_tax),
                    old_regime_tax: format_amount(comparison.old_regime.final_tax),
                    savings: format_amount(comparison.savings),
                    recommended_regime: comparison.recommended_regime.to_string(),
                }
            })
            .collect()
    }
}

/// Writes `rows` as CSV with a header line.
///
/// # Errors
///
/// Returns [`TaxpayerLoaderError::CsvWrite`] if serialization or the
/// underlying writer fails.
pub fn write_rows<W: Write, T: Serialize>(
    writer: W,
    rows: &[T],
) -> Result<(), TaxpayerLoaderError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| TaxpayerLoaderError::CsvWrite(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| TaxpayerLoaderError::CsvWrite(e.to_string()))
}
