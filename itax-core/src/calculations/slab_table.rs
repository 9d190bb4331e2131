//! Slab tables for each regime.
//!
//! Slab widths apply to taxable income, i.e. income left after the basic
//! exemption. Labels are written in gross-income terms, so the old-regime
//! labels shift with the age-based exemption.

use rust_decimal::Decimal;

use crate::TaxEngineError;
use crate::calculations::common::format_lakh;
use crate::models::{AgeCategory, Regime, SlabBand, SlabRule, SlabSchedule, TaxRules};

/// Provides ordered slab tables and exemptions from a [`TaxRules`] set.
#[derive(Debug, Clone, Copy)]
pub struct SlabTable<'a> {
    rules: &'a TaxRules,
}

impl<'a> SlabTable<'a> {
    pub fn new(rules: &'a TaxRules) -> Self {
        Self { rules }
    }

    /// Basic exemption for the regime; only the old regime looks at age.
    pub fn basic_exemption(
        &self,
        regime: Regime,
        age: u32,
    ) -> Decimal {
        match regime {
            Regime::New => self.rules.new_regime.basic_exemption,
            Regime::Old => {
                let old = &self.rules.old_regime;
                match AgeCategory::from_age(age, old) {
                    AgeCategory::SuperSenior => old.super_senior_exemption,
                    AgeCategory::Senior => old.senior_exemption,
                    AgeCategory::Regular => old.basic_exemption,
                }
            }
        }
    }

    /// Ordered slabs for `regime`, ending with the unbounded top slab.
    ///
    /// ```
    /// use itax_core::{Regime, TaxRules};
    /// use itax_core::calculations::SlabTable;
    ///
    /// let rules = TaxRules::fy2025_26();
    /// let slabs = SlabTable::new(&rules).slabs_for(Regime::Old, 35);
    ///
    /// let labels: Vec<_> = slabs.iter().map(|s| s.label.as_str()).collect();
    /// assert_eq!(labels, ["₹2.5L - ₹5L", "₹5L - ₹10L", "Above ₹10L"]);
    /// ```
    pub fn slabs_for(
        &self,
        regime: Regime,
        age: u32,
    ) -> Vec<SlabRule> {
        let bands = match regime {
            Regime::New => &self.rules.new_regime.slabs,
            Regime::Old => &self.rules.old_regime.slabs,
        };
        label_bands(bands, self.basic_exemption(regime, age))
    }

    /// Like [`SlabTable::slabs_for`], taking the regime by name.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError::InvalidRegime`] for anything other than
    /// `new` or `old` (case-insensitive).
    pub fn slabs_for_name(
        &self,
        regime: &str,
        age: u32,
    ) -> Result<Vec<SlabRule>, TaxEngineError> {
        let regime = Regime::parse(regime)?;
        Ok(self.slabs_for(regime, age))
    }

    /// Describes the regime's slabs together with cess and rebate terms.
    pub fn schedule(
        &self,
        regime: Regime,
        age: u32,
    ) -> SlabSchedule {
        let (standard_deduction, rebate) = match regime {
            Regime::New => (
                Some(self.rules.new_regime.standard_deduction),
                self.rules.new_regime.rebate.clone(),
            ),
            Regime::Old => (None, self.rules.old_regime.rebate.clone()),
        };

        SlabSchedule {
            regime,
            financial_year: self.rules.financial_year.clone(),
            age_category: AgeCategory::from_age(age, &self.rules.old_regime),
            basic_exemption: self.basic_exemption(regime, age),
            slabs: self.slabs_for(regime, age),
            cess_rate: self.rules.cess_rate,
            standard_deduction,
            rebate,
        }
    }
}

fn label_bands(
    bands: &[SlabBand],
    offset: Decimal,
) -> Vec<SlabRule> {
    let mut lower = offset;
    bands
        .iter()
        .map(|band| {
            let label = match band.width {
                Some(width) => {
                    let upper = lower + width;
                    let label = format!("{} - {}", format_lakh(lower), format_lakh(upper));
                    lower = upper;
                    label
                }
                None => format!("Above {}", format_lakh(lower)),
            };
            SlabRule {
                width: band.width,
                rate: band.rate,
                label,
            }
        })
        .collect()
}
