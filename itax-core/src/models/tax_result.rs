use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::{AgeCategory, Regime, SlabApplication};

/// Which rule set produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub financial_year: String,
    pub compliance_status: String,
}

/// Full computation for one taxpayer under one regime.
///
/// Amounts are kept at full decimal precision; call [`TaxResult::rounded`]
/// before presenting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: Regime,
    pub gross_income: Decimal,

    /// Standard deduction applied (new regime, salaried only).
    pub standard_deduction: Decimal,

    /// 80C and health insurance deductions applied (old regime only).
    pub total_deductions: Decimal,

    pub basic_exemption: Decimal,
    pub taxable_income: Decimal,

    pub tax_before_cess: Decimal,
    pub cess: Decimal,
    pub tax_after_cess: Decimal,

    /// Section 87A rebate the taxpayer qualifies for (zero above the income limit).
    pub rebate_87a: Decimal,

    /// Portion of the rebate actually set against tax after cess.
    pub rebate_applied: Decimal,

    pub final_tax: Decimal,

    /// Final tax as a percentage of gross income.
    pub effective_rate: Decimal,

    pub breakdown: Vec<SlabApplication>,
    pub age_category: AgeCategory,
    pub metadata: ResultMetadata,
}

impl TaxResult {
    /// Returns a copy with every amount rounded half-up to two decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            regime: self.regime,
            gross_income: round_half_up(self.gross_income),
            standard_deduction: round_half_up(self.standard_deduction),
            total_deductions: round_half_up(self.total_deductions),
            basic_exemption: round_half_up(self.basic_exemption),
            taxable_income: round_half_up(self.taxable_income),
            tax_before_cess: round_half_up(self.tax_before_cess),
            cess: round_half_up(self.cess),
            tax_after_cess: round_half_up(self.tax_after_cess),
            rebate_87a: round_half_up(self.rebate_87a),
            rebate_applied: round_half_up(self.rebate_applied),
            final_tax: round_half_up(self.final_tax),
            effective_rate: round_half_up(self.effective_rate),
            breakdown: self
                .breakdown
                .iter()
                .map(|line| SlabApplication {
                    label: line.label.clone(),
                    rate: line.rate,
                    taxable_amount: round_half_up(line.taxable_amount),
                    tax: round_half_up(line.tax),
                })
                .collect(),
            age_category: self.age_category,
            metadata: self.metadata.clone(),
        }
    }

    /// Whether the result carries a slab taxed at `rate` (a fraction).
    pub fn has_slab_rate(
        &self,
        rate: Decimal,
    ) -> bool {
        self.breakdown.iter().any(|line| line.rate == rate)
    }
}
