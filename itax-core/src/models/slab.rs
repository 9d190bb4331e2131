use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AgeCategory, RebateRules, Regime};

/// One income band of a slab table, taxed at a single marginal rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabRule {
    /// Width of the band; `None` for the unbounded top slab.
    pub width: Option<Decimal>,
    /// Marginal rate as a fraction in [0, 1].
    pub rate: Decimal,
    /// Gross-income range the band covers, e.g. `₹4L - ₹8L`.
    pub label: String,
}

impl SlabRule {
    pub fn is_unbounded(&self) -> bool {
        self.width.is_none()
    }

    /// The rate as a percentage, e.g. `25` for 0.25.
    pub fn rate_percent(&self) -> Decimal {
        (self.rate * Decimal::ONE_HUNDRED).normalize()
    }
}

/// One line of a tax breakdown: how much income fell into a slab and the tax on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabApplication {
    pub label: String,
    pub rate: Decimal,
    pub taxable_amount: Decimal,
    pub tax: Decimal,
}

impl SlabApplication {
    pub fn rate_percent(&self) -> Decimal {
        (self.rate * Decimal::ONE_HUNDRED).normalize()
    }
}

/// A regime's slab table described in gross-income terms, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabSchedule {
    pub regime: Regime,
    pub financial_year: String,
    pub age_category: AgeCategory,
    /// Income taxed at 0% before the first slab.
    pub basic_exemption: Decimal,
    pub slabs: Vec<SlabRule>,
    pub cess_rate: Decimal,
    /// `None` when the regime grants no standard deduction.
    pub standard_deduction: Option<Decimal>,
    pub rebate: RebateRules,
}
