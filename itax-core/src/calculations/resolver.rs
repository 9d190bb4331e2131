//! Regime resolution: deductions, exemption, slab tax, cess and rebate.
//!
//! # New regime
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Income after standard deduction (75000 if salaried), minimum 0 |
//! | 2    | Taxable income: step 1 - basic exemption (400000), minimum 0 |
//! | 3    | Slab tax on step 2 |
//! | 4    | Tax after cess: step 3 × 1.04 |
//! | 5    | Section 87A rebate of up to 60000 when step 1 ≤ 1200000 |
//! | 6    | Final tax: step 4 - rebate, minimum 0 |
//!
//! # Old regime
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Basic exemption by age: 250000, 300000 from 60, 500000 from 80 |
//! | 2    | Income after 80C and health insurance deductions, minimum 0 |
//! | 3    | Taxable income: step 2 - step 1, minimum 0 |
//! | 4    | Slab tax on step 3 |
//! | 5    | Tax after cess: step 4 × 1.04 |
//! | 6    | Section 87A rebate of up to 12500 when step 2 ≤ 500000 |
//! | 7    | Final tax: step 5 - rebate, minimum 0 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itax_core::{Regime, TaxInput, TaxRules};
//! use itax_core::calculations::RegimeResolver;
//!
//! let rules = TaxRules::fy2025_26();
//! let resolver = RegimeResolver::new(&rules);
//!
//! let result = resolver.resolve(&TaxInput::new(dec!(1200000), 30, Regime::New));
//!
//! assert_eq!(result.taxable_income, dec!(725000));
//! assert_eq!(result.tax_after_cess, dec!(54600));
//! assert_eq!(result.rebate_87a, dec!(60000));
//! assert_eq!(result.final_tax, dec!(0));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::max;
use crate::calculations::{ProgressiveTaxCalculator, SlabTable};
use crate::models::{
    AgeCategory, RebateRules, Regime, ResultMetadata, TaxInput, TaxResult, TaxRules,
};

/// Resolves a [`TaxInput`] into a complete [`TaxResult`] under its regime.
#[derive(Debug, Clone, Copy)]
pub struct RegimeResolver<'a> {
    rules: &'a TaxRules,
}

/// Rebate eligibility and the amount set against tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rebate {
    eligible: Decimal,
    applied: Decimal,
}

impl<'a> RegimeResolver<'a> {
    pub fn new(rules: &'a TaxRules) -> Self {
        Self { rules }
    }

    /// Computes tax for `input` under `input.regime`.
    ///
    /// Never fails: every subtraction saturates at the `Decimal` bounds and
    /// is clamped at zero, and a zero or negative gross income yields an
    /// effective rate of zero.
    pub fn resolve(
        &self,
        input: &TaxInput,
    ) -> TaxResult {
        if input.gross_income < Decimal::ZERO {
            warn!(gross_income = %input.gross_income, "negative gross income clamped to zero tax");
        }

        let result = match input.regime {
            Regime::New => self.resolve_new(input),
            Regime::Old => self.resolve_old(input),
        };

        debug!(
            regime = %result.regime,
            taxable_income = %result.taxable_income,
            final_tax = %result.final_tax,
            "resolved tax"
        );
        result
    }

    fn resolve_new(
        &self,
        input: &TaxInput,
    ) -> TaxResult {
        let rules = &self.rules.new_regime;

        let standard_deduction = if input.is_salaried {
            rules.standard_deduction
        } else {
            Decimal::ZERO
        };
        let after_standard_deduction = max(
            input.gross_income.saturating_sub(standard_deduction),
            Decimal::ZERO,
        );

        let basic_exemption = SlabTable::new(self.rules).basic_exemption(Regime::New, input.age);
        let taxable_income = max(
            after_standard_deduction.saturating_sub(basic_exemption),
            Decimal::ZERO,
        );

        let slabs = SlabTable::new(self.rules).slabs_for(Regime::New, input.age);
        let slab_tax = ProgressiveTaxCalculator::apply(&slabs, taxable_income);

        let cess = self.cess(slab_tax.total);
        let tax_after_cess = slab_tax.total.saturating_add(cess);
        let rebate = self.rebate(after_standard_deduction, tax_after_cess, &rules.rebate);
        let final_tax = max(tax_after_cess - rebate.applied, Decimal::ZERO);

        TaxResult {
            regime: Regime::New,
            gross_income: input.gross_income,
            standard_deduction,
            total_deductions: Decimal::ZERO,
            basic_exemption,
            taxable_income,
            tax_before_cess: slab_tax.total,
            cess,
            tax_after_cess,
            rebate_87a: rebate.eligible,
            rebate_applied: rebate.applied,
            final_tax,
            effective_rate: self.effective_rate(final_tax, input.gross_income),
            breakdown: slab_tax.breakdown,
            age_category: AgeCategory::from_age(input.age, &self.rules.old_regime),
            metadata: self.metadata(),
        }
    }

    fn resolve_old(
        &self,
        input: &TaxInput,
    ) -> TaxResult {
        let rules = &self.rules.old_regime;

        let basic_exemption = SlabTable::new(self.rules).basic_exemption(Regime::Old, input.age);

        let total_deductions = input
            .deductions_80c
            .saturating_add(input.health_insurance_premium);
        let after_deductions = max(
            input.gross_income.saturating_sub(total_deductions),
            Decimal::ZERO,
        );
        let taxable_income = max(after_deductions.saturating_sub(basic_exemption), Decimal::ZERO);

        let slabs = SlabTable::new(self.rules).slabs_for(Regime::Old, input.age);
        let slab_tax = ProgressiveTaxCalculator::apply(&slabs, taxable_income);

        let cess = self.cess(slab_tax.total);
        let tax_after_cess = slab_tax.total.saturating_add(cess);
        let rebate = self.rebate(after_deductions, tax_after_cess, &rules.rebate);
        let final_tax = max(tax_after_cess - rebate.applied, Decimal::ZERO);

        TaxResult {
            regime: Regime::Old,
            gross_income: input.gross_income,
            standard_deduction: Decimal::ZERO,
            total_deductions,
            basic_exemption,
            taxable_income,
            tax_before_cess: slab_tax.total,
            cess,
            tax_after_cess,
            rebate_87a: rebate.eligible,
            rebate_applied: rebate.applied,
            final_tax,
            effective_rate: self.effective_rate(final_tax, input.gross_income),
            breakdown: slab_tax.breakdown,
            age_category: AgeCategory::from_age(input.age, rules),
            metadata: self.metadata(),
        }
    }

    /// Cess on tax before the rebate.
    fn cess(
        &self,
        tax: Decimal,
    ) -> Decimal {
        tax * self.rules.cess_rate
    }

    /// Section 87A rebate for `income` (after deductions).
    fn rebate(
        &self,
        income: Decimal,
        tax_after_cess: Decimal,
        rules: &RebateRules,
    ) -> Rebate {
        if income <= rules.income_limit {
            Rebate {
                eligible: rules.max_rebate,
                applied: tax_after_cess.min(rules.max_rebate),
            }
        } else {
            Rebate {
                eligible: Decimal::ZERO,
                applied: Decimal::ZERO,
            }
        }
    }

    /// Final tax as a percentage of gross income; zero when income is not positive.
    fn effective_rate(
        &self,
        final_tax: Decimal,
        gross_income: Decimal,
    ) -> Decimal {
        if gross_income > Decimal::ZERO {
            final_tax / gross_income * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }

    fn metadata(&self) -> ResultMetadata {
        ResultMetadata {
            financial_year: self.rules.financial_year.clone(),
            compliance_status: self.rules.compliance_status.clone(),
        }
    }
}
