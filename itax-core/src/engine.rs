//! Entry point for callers that do not need the individual calculation steps.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itax_core::{Regime, TaxEngine, TaxInput};
//!
//! let engine = TaxEngine::default();
//!
//! let result = engine.resolve(&TaxInput::new(dec!(2200000), 35, Regime::New));
//! assert!(result.has_slab_rate(dec!(0.25)));
//!
//! let comparison = engine.compare(dec!(400000), 30, true, dec!(0), dec!(0));
//! assert_eq!(comparison.recommended_regime, Regime::Old);
//! ```

use rust_decimal::Decimal;

use crate::TaxEngineError;
use crate::calculations::{RegimeComparator, RegimeResolver, SlabTable};
use crate::models::{
    Regime, RegimeComparison, SlabRule, SlabSchedule, TaxInput, TaxResult, TaxRules,
    TaxRulesError,
};

/// Owns a validated rule set and exposes the engine's operations.
///
/// Holds no other state, so one engine can serve any number of callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxEngine {
    rules: TaxRules,
}

impl TaxEngine {
    /// Creates an engine after validating `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxRulesError`] if the rule set is inconsistent.
    pub fn new(rules: TaxRules) -> Result<Self, TaxRulesError> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &TaxRules {
        &self.rules
    }

    pub fn financial_year(&self) -> &str {
        &self.rules.financial_year
    }

    pub fn slabs_for(
        &self,
        regime: Regime,
        age: u32,
    ) -> Vec<SlabRule> {
        SlabTable::new(&self.rules).slabs_for(regime, age)
    }

    /// # Errors
    ///
    /// Returns [`TaxEngineError::InvalidRegime`] for an unrecognized name.
    pub fn slabs_for_name(
        &self,
        regime: &str,
        age: u32,
    ) -> Result<Vec<SlabRule>, TaxEngineError> {
        SlabTable::new(&self.rules).slabs_for_name(regime, age)
    }

    pub fn schedule(
        &self,
        regime: Regime,
        age: u32,
    ) -> SlabSchedule {
        SlabTable::new(&self.rules).schedule(regime, age)
    }

    pub fn resolve(
        &self,
        input: &TaxInput,
    ) -> TaxResult {
        RegimeResolver::new(&self.rules).resolve(input)
    }

    pub fn compare(
        &self,
        gross_income: Decimal,
        age: u32,
        is_salaried: bool,
        deductions_80c: Decimal,
        health_insurance_premium: Decimal,
    ) -> RegimeComparison {
        RegimeComparator::new(&self.rules).compare(
            gross_income,
            age,
            is_salaried,
            deductions_80c,
            health_insurance_premium,
        )
    }

    pub fn compare_input(
        &self,
        input: &TaxInput,
    ) -> RegimeComparison {
        RegimeComparator::new(&self.rules).compare_input(input)
    }
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self {
            rules: TaxRules::fy2025_26(),
        }
    }
}
