use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxEngineError;
use crate::models::Regime;

fn default_salaried() -> bool {
    true
}

/// Taxpayer details for one calculation.
///
/// Deductions only matter under the old regime and are expected to be
/// clamped to their statutory ceilings by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Annual gross income in whole rupees.
    pub gross_income: Decimal,
    pub age: u32,
    pub regime: Regime,
    /// Salaried taxpayers receive the new-regime standard deduction.
    #[serde(default = "default_salaried")]
    pub is_salaried: bool,
    #[serde(default)]
    pub deductions_80c: Decimal,
    #[serde(default)]
    pub health_insurance_premium: Decimal,
}

impl TaxInput {
    /// A salaried taxpayer with no claimed deductions.
    pub fn new(
        gross_income: Decimal,
        age: u32,
        regime: Regime,
    ) -> Self {
        Self {
            gross_income,
            age,
            regime,
            is_salaried: true,
            deductions_80c: Decimal::ZERO,
            health_insurance_premium: Decimal::ZERO,
        }
    }

    pub fn with_regime(
        mut self,
        regime: Regime,
    ) -> Self {
        self.regime = regime;
        self
    }

    pub fn with_salaried(
        mut self,
        is_salaried: bool,
    ) -> Self {
        self.is_salaried = is_salaried;
        self
    }

    pub fn with_deductions_80c(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.deductions_80c = amount;
        self
    }

    pub fn with_health_insurance_premium(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.health_insurance_premium = amount;
        self
    }

    /// Strict range check for callers that want to reject bad input rather
    /// than let the engine clamp it.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError::OutOfRangeInput`] if:
    /// - `gross_income` is zero or negative
    /// - `deductions_80c` or `health_insurance_premium` is negative
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use itax_core::{Regime, TaxEngineError, TaxInput};
    ///
    /// let input = TaxInput::new(dec!(0), 30, Regime::New);
    ///
    /// assert_eq!(
    ///     input.validate(),
    ///     Err(TaxEngineError::OutOfRangeInput { field: "gross_income", value: dec!(0) })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), TaxEngineError> {
        if self.gross_income <= Decimal::ZERO {
            return Err(TaxEngineError::OutOfRangeInput {
                field: "gross_income",
                value: self.gross_income,
            });
        }
        if self.deductions_80c < Decimal::ZERO {
            return Err(TaxEngineError::OutOfRangeInput {
                field: "deductions_80c",
                value: self.deductions_80c,
            });
        }
        if self.health_insurance_premium < Decimal::ZERO {
            return Err(TaxEngineError::OutOfRangeInput {
                field: "health_insurance_premium",
                value: self.health_insurance_premium,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_defaults_to_salaried_without_deductions() {
        let input = TaxInput::new(dec!(1000000), 30, Regime::New);

        assert!(input.is_salaried);
        assert_eq!(input.deductions_80c, Decimal::ZERO);
        assert_eq!(input.health_insurance_premium, Decimal::ZERO);
    }

    #[test]
    fn builders_set_fields() {
        let input = TaxInput::new(dec!(1000000), 45, Regime::New)
            .with_regime(Regime::Old)
            .with_salaried(false)
            .with_deductions_80c(dec!(150000))
            .with_health_insurance_premium(dec!(25000));

        assert_eq!(input.regime, Regime::Old);
        assert!(!input.is_salaried);
        assert_eq!(input.deductions_80c, dec!(150000));
        assert_eq!(input.health_insurance_premium, dec!(25000));
    }

    #[test]
    fn validate_accepts_positive_income() {
        let input = TaxInput::new(dec!(1), 18, Regime::Old);

        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_income() {
        let input = TaxInput::new(dec!(-5), 30, Regime::New);

        assert_eq!(
            input.validate(),
            Err(TaxEngineError::OutOfRangeInput {
                field: "gross_income",
                value: dec!(-5),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_deductions() {
        let input = TaxInput::new(dec!(500000), 30, Regime::Old).with_deductions_80c(dec!(-1));

        assert_eq!(
            input.validate(),
            Err(TaxEngineError::OutOfRangeInput {
                field: "deductions_80c",
                value: dec!(-1),
            })
        );

        let input =
            TaxInput::new(dec!(500000), 30, Regime::Old).with_health_insurance_premium(dec!(-2));

        assert_eq!(
            input.validate(),
            Err(TaxEngineError::OutOfRangeInput {
                field: "health_insurance_premium",
                value: dec!(-2),
            })
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let input: TaxInput =
            serde_json::from_str(r#"{"gross_income":"900000","age":40,"regime":"New"}"#).unwrap();

        assert_eq!(input, TaxInput::new(dec!(900000), 40, Regime::New));
    }
}
