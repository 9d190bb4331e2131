//! Progressive (marginal-rate) tax over a slab table.
//!
//! Income fills slabs in ascending order. Each slab taxes only the part of
//! income that falls inside it, so no rupee is taxed twice and the marginal
//! rate never decreases as income grows.
//!
//! A taxable income exactly on a boundary is taxed entirely in the lower
//! slab: with slabs of width 400000, an income of 400000 produces a single
//! breakdown line.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itax_core::{Regime, TaxRules};
//! use itax_core::calculations::{ProgressiveTaxCalculator, SlabTable};
//!
//! let rules = TaxRules::fy2025_26();
//! let slabs = SlabTable::new(&rules).slabs_for(Regime::New, 30);
//!
//! let result = ProgressiveTaxCalculator::apply(&slabs, dec!(725000));
//!
//! // 400000 @ 5% + 325000 @ 10%
//! assert_eq!(result.total, dec!(52500));
//! assert_eq!(result.breakdown.len(), 2);
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::models::{SlabApplication, SlabRule};

/// Total tax from a slab walk and the per-slab lines that make it up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlabTax {
    pub total: Decimal,
    pub breakdown: Vec<SlabApplication>,
}

/// Walks a slab table against a taxable income.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressiveTaxCalculator;

impl ProgressiveTaxCalculator {
    /// Applies `slabs` (ascending, last one unbounded) to `taxable_income`.
    ///
    /// Slabs that receive no income are left out of the breakdown. A zero
    /// or negative income yields zero tax and an empty breakdown.
    pub fn apply(
        slabs: &[SlabRule],
        taxable_income: Decimal,
    ) -> SlabTax {
        let mut result = SlabTax::default();
        let mut remaining = taxable_income;

        for slab in slabs {
            if remaining <= Decimal::ZERO {
                break;
            }

            let in_slab = match slab.width {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            if in_slab <= Decimal::ZERO {
                continue;
            }

            let tax = in_slab * slab.rate;
            trace!(slab = %slab.label, amount = %in_slab, %tax, "applied slab");

            result.total = result.total.saturating_add(tax);
            result.breakdown.push(SlabApplication {
                label: slab.label.clone(),
                rate: slab.rate,
                taxable_amount: in_slab,
                tax,
            });
            remaining -= in_slab;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::SlabTable;
    use crate::{Regime, TaxRules};

    fn slab(
        width: Option<Decimal>,
        rate: Decimal,
        label: &str,
    ) -> SlabRule {
        SlabRule {
            width,
            rate,
            label: label.to_string(),
        }
    }

    fn new_regime_slabs() -> Vec<SlabRule> {
        SlabTable::new(&TaxRules::fy2025_26()).slabs_for(Regime::New, 30)
    }

    fn old_regime_slabs() -> Vec<SlabRule> {
        SlabTable::new(&TaxRules::fy2025_26()).slabs_for(Regime::Old, 30)
    }

    #[test]
    fn zero_income_has_no_tax() {
        let result = ProgressiveTaxCalculator::apply(&new_regime_slabs(), dec!(0));

        assert_eq!(result, SlabTax::default());
    }

    #[test]
    fn negative_income_has_no_tax() {
        let result = ProgressiveTaxCalculator::apply(&new_regime_slabs(), dec!(-1000));

        assert_eq!(result.total, Decimal::ZERO);
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn income_within_first_slab() {
        let result = ProgressiveTaxCalculator::apply(&new_regime_slabs(), dec!(75000));

        assert_eq!(result.total, dec!(3750));
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].label, "₹4L - ₹8L");
        assert_eq!(result.breakdown[0].taxable_amount, dec!(75000));
    }

    #[test]
    fn boundary_income_stays_in_lower_slab() {
        let result = ProgressiveTaxCalculator::apply(&new_regime_slabs(), dec!(400000));

        assert_eq!(result.total, dec!(20000));
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].rate, dec!(0.05));
    }

    #[test]
    fn one_rupee_past_boundary_spills_into_next_slab() {
        let result = ProgressiveTaxCalculator::apply(&new_regime_slabs(), dec!(400001));

        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[1].taxable_amount, dec!(1));
        assert_eq!(result.breakdown[1].tax, dec!(0.10));
        assert_eq!(result.total, dec!(20000.10));
    }

    #[test]
    fn new_regime_reaches_25_percent_slab() {
        let result = ProgressiveTaxCalculator::apply(&new_regime_slabs(), dec!(1725000));

        // 20000 + 40000 + 60000 + 80000 + 125000 * 0.25
        assert_eq!(result.total, dec!(231250));
        assert_eq!(result.breakdown.len(), 5);
        assert_eq!(result.breakdown[4].rate, dec!(0.25));
        assert_eq!(result.breakdown[4].taxable_amount, dec!(125000));
    }

    #[test]
    fn new_regime_top_slab_is_unbounded() {
        let result = ProgressiveTaxCalculator::apply(&new_regime_slabs(), dec!(5000000));

        // 400000 * (0.05 + 0.10 + 0.15 + 0.20 + 0.25) + 3000000 * 0.30
        assert_eq!(result.total, dec!(1200000));
        assert_eq!(result.breakdown.len(), 6);
        assert_eq!(result.breakdown[5].label, "Above ₹24L");
        assert_eq!(result.breakdown[5].taxable_amount, dec!(3000000));
    }

    #[test]
    fn old_regime_three_slabs() {
        let result = ProgressiveTaxCalculator::apply(&old_regime_slabs(), dec!(1000000));

        // 250000 * 0.05 + 500000 * 0.20 + 250000 * 0.30
        assert_eq!(result.total, dec!(187500));
        let amounts: Vec<Decimal> = result.breakdown.iter().map(|b| b.taxable_amount).collect();
        assert_eq!(amounts, vec![dec!(250000), dec!(500000), dec!(250000)]);
    }

    #[test]
    fn zero_width_slab_is_skipped() {
        let slabs = vec![
            slab(Some(dec!(0)), dec!(0.05), "empty"),
            slab(Some(dec!(100)), dec!(0.10), "first"),
            slab(None, dec!(0.20), "rest"),
        ];

        let result = ProgressiveTaxCalculator::apply(&slabs, dec!(150));

        let labels: Vec<&str> = result.breakdown.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "rest"]);
        assert_eq!(result.total, dec!(20));
    }

    #[test]
    fn fractional_income_is_taxed_exactly() {
        let result = ProgressiveTaxCalculator::apply(&new_regime_slabs(), dec!(0.5));

        assert_eq!(result.total, dec!(0.025));
    }

    proptest! {
        #[test]
        fn prop_breakdown_sums_to_total(income in 0i64..100_000_000) {
            let result = ProgressiveTaxCalculator::apply(&new_regime_slabs(), Decimal::from(income));

            let sum: Decimal = result.breakdown.iter().map(|b| b.tax).sum();
            prop_assert_eq!(sum, result.total);
        }

        #[test]
        fn prop_slabs_partition_income(income in 0i64..100_000_000) {
            let income = Decimal::from(income);
            let result = ProgressiveTaxCalculator::apply(&old_regime_slabs(), income);

            let covered: Decimal = result.breakdown.iter().map(|b| b.taxable_amount).sum();
            prop_assert_eq!(covered, income);
            prop_assert!(result.breakdown.iter().all(|b| b.taxable_amount > Decimal::ZERO));
        }

        #[test]
        fn prop_rates_ascend_along_breakdown(income in 1i64..100_000_000) {
            let result = ProgressiveTaxCalculator::apply(&new_regime_slabs(), Decimal::from(income));

            prop_assert!(result.breakdown.windows(2).all(|w| w[0].rate < w[1].rate));
        }
    }
}
