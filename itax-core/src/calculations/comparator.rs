//! Side-by-side evaluation of both regimes.
//!
//! Savings are `old - new`. The new regime is recommended only when it is
//! strictly cheaper; equal liabilities recommend the old regime.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::RegimeResolver;
use crate::calculations::common::format_amount;
use crate::models::{Regime, RegimeComparison, TaxInput, TaxResult, TaxRules};

/// Runs the resolver under both regimes and recommends the cheaper one.
#[derive(Debug, Clone, Copy)]
pub struct RegimeComparator<'a> {
    rules: &'a TaxRules,
}

impl<'a> RegimeComparator<'a> {
    pub fn new(rules: &'a TaxRules) -> Self {
        Self { rules }
    }

    /// Compares both regimes for one taxpayer.
    ///
    /// The deduction amounts only affect the old regime.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use itax_core::{Regime, TaxRules};
    /// use itax_core::calculations::RegimeComparator;
    ///
    /// let rules = TaxRules::fy2025_26();
    /// let comparison = RegimeComparator::new(&rules)
    ///     .compare(dec!(1800000), 35, true, dec!(150000), dec!(25000));
    ///
    /// assert_eq!(comparison.recommended_regime, Regime::New);
    /// assert!(comparison.savings > dec!(0));
    /// ```
    pub fn compare(
        &self,
        gross_income: Decimal,
        age: u32,
        is_salaried: bool,
        deductions_80c: Decimal,
        health_insurance_premium: Decimal,
    ) -> RegimeComparison {
        let input = TaxInput {
            gross_income,
            age,
            regime: Regime::New,
            is_salaried,
            deductions_80c,
            health_insurance_premium,
        };
        self.compare_input(&input)
    }

    /// Compares both regimes for `input`, ignoring `input.regime`.
    pub fn compare_input(
        &self,
        input: &TaxInput,
    ) -> RegimeComparison {
        let resolver = RegimeResolver::new(self.rules);
        let new_regime = resolver.resolve(&input.clone().with_regime(Regime::New));
        let old_regime = resolver.resolve(&input.clone().with_regime(Regime::Old));

        let savings = old_regime.final_tax - new_regime.final_tax;
        let recommended_regime = if savings > Decimal::ZERO {
            Regime::New
        } else {
            Regime::Old
        };
        let recommendation_reason =
            recommendation_reason(recommended_regime, savings, &new_regime, &old_regime);

        debug!(%savings, recommended = %recommended_regime, "compared regimes");

        RegimeComparison {
            new_regime,
            old_regime,
            savings,
            recommended_regime,
            recommendation_reason,
        }
    }
}

fn recommendation_reason(
    recommended: Regime,
    savings: Decimal,
    new_regime: &TaxResult,
    old_regime: &TaxResult,
) -> String {
    match recommended {
        Regime::New => format!(
            "New regime saves ₹{} (₹{} vs ₹{} under the old regime)",
            format_amount(savings),
            format_amount(new_regime.final_tax),
            format_amount(old_regime.final_tax),
        ),
        Regime::Old if savings.is_zero() => format!(
            "Both regimes result in ₹{} tax; the old regime is kept on a tie",
            format_amount(old_regime.final_tax),
        ),
        Regime::Old => format!(
            "Old regime saves ₹{} (₹{} vs ₹{} under the new regime)",
            format_amount(-savings),
            format_amount(old_regime.final_tax),
            format_amount(new_regime.final_tax),
        ),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn compare(
        gross_income: Decimal,
        age: u32,
        deductions_80c: Decimal,
        health_insurance_premium: Decimal,
    ) -> RegimeComparison {
        RegimeComparator::new(&TaxRules::fy2025_26()).compare(
            gross_income,
            age,
            true,
            deductions_80c,
            health_insurance_premium,
        )
    }

    #[test]
    fn tie_recommends_old_regime() {
        let comparison = compare(dec!(400000), 30, dec!(0), dec!(0));

        assert_eq!(comparison.new_regime.final_tax, dec!(0));
        assert_eq!(comparison.old_regime.final_tax, dec!(0));
        assert_eq!(comparison.savings, dec!(0));
        assert_eq!(comparison.recommended_regime, Regime::Old);
        assert_eq!(
            comparison.recommendation_reason,
            "Both regimes result in ₹0.00 tax; the old regime is kept on a tie"
        );
    }

    #[test]
    fn new_regime_recommended_when_cheaper() {
        let comparison = compare(dec!(1200000), 30, dec!(0), dec!(0));

        // old: taxable 950000 -> 12500 + 100000 + 60000 = 172500, with cess 179400
        assert_eq!(comparison.old_regime.final_tax, dec!(179400));
        assert_eq!(comparison.new_regime.final_tax, dec!(0));
        assert_eq!(comparison.savings, dec!(179400));
        assert_eq!(comparison.recommended_regime, Regime::New);
        assert_eq!(comparison.recommended().regime, Regime::New);
    }

    #[test]
    fn old_regime_recommended_when_cheaper() {
        // Super senior with large deductions: old regime taxable income is zero
        let comparison = compare(dec!(1400000), 85, dec!(900000), dec!(0));

        assert_eq!(comparison.old_regime.final_tax, dec!(0));
        assert!(comparison.new_regime.final_tax > dec!(0));
        assert!(comparison.savings < dec!(0));
        assert_eq!(comparison.recommended_regime, Regime::Old);
        assert!(comparison.recommendation_reason.starts_with("Old regime saves"));
    }

    #[test]
    fn compare_ignores_input_regime() {
        let rules = TaxRules::fy2025_26();
        let comparator = RegimeComparator::new(&rules);
        let input = TaxInput::new(dec!(950000), 40, Regime::Old);

        assert_eq!(
            comparator.compare_input(&input),
            comparator.compare_input(&input.clone().with_regime(Regime::New))
        );
    }

    #[test]
    fn results_carry_their_regime() {
        let comparison = compare(dec!(2500000), 50, dec!(150000), dec!(50000));

        assert_eq!(comparison.new_regime.regime, Regime::New);
        assert_eq!(comparison.old_regime.regime, Regime::Old);
        assert_eq!(comparison.new_regime.total_deductions, dec!(0));
        assert_eq!(comparison.old_regime.total_deductions, dec!(200000));
    }
}
