//! Statutory constants for the modeled financial year.
//!
//! Every amount the engine uses lives here, versioned by `financial_year`,
//! so that no calculation mixes constants from different budget years.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors found while validating a [`TaxRules`] set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxRulesError {
    /// A slab table has no bands.
    #[error("{regime} regime has no slab bands")]
    EmptySlabTable { regime: &'static str },

    /// A slab rate is outside [0, 1].
    #[error("{regime} regime slab {index} has rate {rate}, expected a value between 0 and 1")]
    InvalidSlabRate {
        regime: &'static str,
        index: usize,
        rate: Decimal,
    },

    /// A bounded slab has a zero or negative width.
    #[error("{regime} regime slab {index} has non-positive width {width}")]
    InvalidSlabWidth {
        regime: &'static str,
        index: usize,
        width: Decimal,
    },

    /// An unbounded band appears before the last position, or the last band is bounded.
    #[error("{regime} regime must end with exactly one unbounded slab")]
    UnboundedSlabMisplaced { regime: &'static str },

    /// The cess rate is outside [0, 1].
    #[error("cess rate must be between 0 and 1, got {0}")]
    InvalidCessRate(Decimal),

    /// A deduction, exemption or rebate amount is negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// The super-senior age threshold is below the senior threshold.
    #[error("super senior age {super_senior} must not be below senior age {senior}")]
    InvalidAgeThresholds { senior: u32, super_senior: u32 },
}

/// One band of a slab table before labels are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabBand {
    /// Width of the band; `None` for the unbounded top band.
    pub width: Option<Decimal>,
    /// Marginal rate as a fraction (0.05 for 5%).
    pub rate: Decimal,
}

impl SlabBand {
    pub fn bounded(
        width: i64,
        rate_percent: i64,
    ) -> Self {
        Self {
            width: Some(Decimal::from(width)),
            rate: Decimal::new(rate_percent, 2),
        }
    }

    pub fn unbounded(rate_percent: i64) -> Self {
        Self {
            width: None,
            rate: Decimal::new(rate_percent, 2),
        }
    }
}

/// Section 87A rebate terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateRules {
    /// Income (after deductions) at or below which the rebate applies.
    pub income_limit: Decimal,
    /// Largest rebate that can be granted.
    pub max_rebate: Decimal,
}

/// Constants for the new regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegimeRules {
    pub standard_deduction: Decimal,
    pub basic_exemption: Decimal,
    pub rebate: RebateRules,
    pub slabs: Vec<SlabBand>,
}

/// Constants for the old regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldRegimeRules {
    pub basic_exemption: Decimal,
    pub senior_age: u32,
    pub senior_exemption: Decimal,
    pub super_senior_age: u32,
    pub super_senior_exemption: Decimal,
    pub rebate: RebateRules,
    pub slabs: Vec<SlabBand>,
}

/// The complete rule set for one financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRules {
    /// e.g. `"2025-26"`.
    pub financial_year: String,
    /// Human-readable label for the budget the rules follow.
    pub compliance_status: String,
    /// Health and education cess, applied to tax before the rebate.
    pub cess_rate: Decimal,
    pub new_regime: NewRegimeRules,
    pub old_regime: OldRegimeRules,
}

impl TaxRules {
    /// The FY 2025-26 rules from Union Budget 2025.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use itax_core::TaxRules;
    ///
    /// let rules = TaxRules::fy2025_26();
    ///
    /// assert_eq!(rules.financial_year, "2025-26");
    /// assert_eq!(rules.new_regime.basic_exemption, dec!(400000));
    /// assert_eq!(rules.new_regime.rebate.max_rebate, dec!(60000));
    /// assert!(rules.validate().is_ok());
    /// ```
    pub fn fy2025_26() -> Self {
        Self {
            financial_year: "2025-26".to_string(),
            compliance_status: "Budget 2025 Compliant".to_string(),
            cess_rate: Decimal::new(4, 2),
            new_regime: NewRegimeRules {
                standard_deduction: Decimal::from(75_000),
                basic_exemption: Decimal::from(400_000),
                rebate: RebateRules {
                    income_limit: Decimal::from(1_200_000),
                    max_rebate: Decimal::from(60_000),
                },
                slabs: vec![
                    SlabBand::bounded(400_000, 5),
                    SlabBand::bounded(400_000, 10),
                    SlabBand::bounded(400_000, 15),
                    SlabBand::bounded(400_000, 20),
                    SlabBand::bounded(400_000, 25),
                    SlabBand::unbounded(30),
                ],
            },
            old_regime: OldRegimeRules {
                basic_exemption: Decimal::from(250_000),
                senior_age: 60,
                senior_exemption: Decimal::from(300_000),
                super_senior_age: 80,
                super_senior_exemption: Decimal::from(500_000),
                rebate: RebateRules {
                    income_limit: Decimal::from(500_000),
                    max_rebate: Decimal::from(12_500),
                },
                slabs: vec![
                    SlabBand::bounded(250_000, 5),
                    SlabBand::bounded(500_000, 20),
                    SlabBand::unbounded(30),
                ],
            },
        }
    }

    /// Checks that the rule set can drive the engine.
    ///
    /// # Errors
    ///
    /// Returns [`TaxRulesError`] if:
    /// - `cess_rate` is not in [0, 1]
    /// - any exemption, deduction or rebate amount is negative
    /// - a slab table is empty, has a rate outside [0, 1], a non-positive
    ///   bounded width, or does not end with exactly one unbounded band
    /// - `super_senior_age` is below `senior_age`
    pub fn validate(&self) -> Result<(), TaxRulesError> {
        if self.cess_rate < Decimal::ZERO || self.cess_rate > Decimal::ONE {
            return Err(TaxRulesError::InvalidCessRate(self.cess_rate));
        }

        let amounts = [
            (
                "new regime standard deduction",
                self.new_regime.standard_deduction,
            ),
            ("new regime basic exemption", self.new_regime.basic_exemption),
            (
                "new regime rebate income limit",
                self.new_regime.rebate.income_limit,
            ),
            ("new regime maximum rebate", self.new_regime.rebate.max_rebate),
            ("old regime basic exemption", self.old_regime.basic_exemption),
            ("old regime senior exemption", self.old_regime.senior_exemption),
            (
                "old regime super senior exemption",
                self.old_regime.super_senior_exemption,
            ),
            (
                "old regime rebate income limit",
                self.old_regime.rebate.income_limit,
            ),
            ("old regime maximum rebate", self.old_regime.rebate.max_rebate),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(TaxRulesError::NegativeAmount { field, value });
            }
        }

        if self.old_regime.super_senior_age < self.old_regime.senior_age {
            return Err(TaxRulesError::InvalidAgeThresholds {
                senior: self.old_regime.senior_age,
                super_senior: self.old_regime.super_senior_age,
            });
        }

        validate_slabs("new", &self.new_regime.slabs)?;
        validate_slabs("old", &self.old_regime.slabs)
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::fy2025_26()
    }
}

fn validate_slabs(
    regime: &'static str,
    slabs: &[SlabBand],
) -> Result<(), TaxRulesError> {
    if slabs.is_empty() {
        return Err(TaxRulesError::EmptySlabTable { regime });
    }

    let last = slabs.len() - 1;
    for (index, band) in slabs.iter().enumerate() {
        if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
            return Err(TaxRulesError::InvalidSlabRate {
                regime,
                index,
                rate: band.rate,
            });
        }
        match band.width {
            Some(width) if width <= Decimal::ZERO => {
                return Err(TaxRulesError::InvalidSlabWidth {
                    regime,
                    index,
                    width,
                });
            }
            Some(_) if index == last => {
                return Err(TaxRulesError::UnboundedSlabMisplaced { regime });
            }
            None if index != last => {
                return Err(TaxRulesError::UnboundedSlabMisplaced { regime });
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn fy2025_26_is_valid() {
        assert_eq!(TaxRules::fy2025_26().validate(), Ok(()));
    }

    #[test]
    fn default_is_fy2025_26() {
        assert_eq!(TaxRules::default(), TaxRules::fy2025_26());
    }

    #[test]
    fn new_regime_has_25_percent_band() {
        let rules = TaxRules::fy2025_26();

        assert!(rules.new_regime.slabs.iter().any(|b| b.rate == dec!(0.25)));
        assert_eq!(rules.new_regime.slabs.len(), 6);
    }

    #[test]
    fn validate_rejects_cess_above_one() {
        let mut rules = TaxRules::fy2025_26();
        rules.cess_rate = dec!(1.5);

        assert_eq!(
            rules.validate(),
            Err(TaxRulesError::InvalidCessRate(dec!(1.5)))
        );
    }

    #[test]
    fn validate_rejects_negative_exemption() {
        let mut rules = TaxRules::fy2025_26();
        rules.old_regime.senior_exemption = dec!(-1);

        assert_eq!(
            rules.validate(),
            Err(TaxRulesError::NegativeAmount {
                field: "old regime senior exemption",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn validate_rejects_bounded_top_slab() {
        let mut rules = TaxRules::fy2025_26();
        rules.old_regime.slabs = vec![SlabBand::bounded(250_000, 5)];

        assert_eq!(
            rules.validate(),
            Err(TaxRulesError::UnboundedSlabMisplaced { regime: "old" })
        );
    }

    #[test]
    fn validate_rejects_unbounded_slab_before_end() {
        let mut rules = TaxRules::fy2025_26();
        rules.new_regime.slabs = vec![SlabBand::unbounded(5), SlabBand::unbounded(30)];

        assert_eq!(
            rules.validate(),
            Err(TaxRulesError::UnboundedSlabMisplaced { regime: "new" })
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut rules = TaxRules::fy2025_26();
        rules.new_regime.slabs[2].rate = dec!(1.01);

        assert_eq!(
            rules.validate(),
            Err(TaxRulesError::InvalidSlabRate {
                regime: "new",
                index: 2,
                rate: dec!(1.01),
            })
        );
    }

    #[test]
    fn validate_rejects_zero_width() {
        let mut rules = TaxRules::fy2025_26();
        rules.old_regime.slabs[0].width = Some(dec!(0));

        assert_eq!(
            rules.validate(),
            Err(TaxRulesError::InvalidSlabWidth {
                regime: "old",
                index: 0,
                width: dec!(0),
            })
        );
    }

    #[test]
    fn validate_rejects_empty_table() {
        let mut rules = TaxRules::fy2025_26();
        rules.new_regime.slabs.clear();

        assert_eq!(
            rules.validate(),
            Err(TaxRulesError::EmptySlabTable { regime: "new" })
        );
    }

    #[test]
    fn validate_rejects_inverted_age_thresholds() {
        let mut rules = TaxRules::fy2025_26();
        rules.old_regime.super_senior_age = 55;

        assert_eq!(
            rules.validate(),
            Err(TaxRulesError::InvalidAgeThresholds {
                senior: 60,
                super_senior: 55,
            })
        );
    }
}
