use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::{Regime, TaxResult};

/// Both regimes evaluated for the same taxpayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub new_regime: TaxResult,
    pub old_regime: TaxResult,

    /// `old_regime.final_tax - new_regime.final_tax`; positive when the new regime is cheaper.
    pub savings: Decimal,

    /// `New` only when savings are strictly positive; ties go to `Old`.
    pub recommended_regime: Regime,
    pub recommendation_reason: String,
}

impl RegimeComparison {
    /// Returns a copy with both results and the savings rounded half-up to
    /// two decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            new_regime: self.new_regime.rounded(),
            old_regime: self.old_regime.rounded(),
            savings: round_half_up(self.savings),
            recommended_regime: self.recommended_regime,
            recommendation_reason: self.recommendation_reason.clone(),
        }
    }

    pub fn recommended(&self) -> &TaxResult {
        match self.recommended_regime {
            Regime::New => &self.new_regime,
            Regime::Old => &self.old_regime,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::{Regime, TaxEngine};

    #[test]
    fn rounded_comparison_keeps_two_decimal_places() {
        let comparison = TaxEngine::default().compare(dec!(1275001), 40, true, dec!(0), dec!(0));
        assert_eq!(comparison.new_regime.final_tax, dec!(62400.156));

        let rounded = comparison.rounded();

        assert_eq!(rounded.new_regime.final_tax, dec!(62400.16));
        assert_eq!(rounded.new_regime.effective_rate, dec!(4.89));
        // 12500 + 100000 + 25001 * 0.30, plus 4% cess
        assert_eq!(rounded.old_regime.final_tax, dec!(124800.31));
        assert_eq!(rounded.savings, dec!(62400.16));
        assert_eq!(rounded.recommended_regime, Regime::New);
        assert_eq!(rounded.recommendation_reason, comparison.recommendation_reason);

        let json = serde_json::to_value(&rounded).unwrap();
        assert_eq!(json["new_regime"]["effective_rate"], "4.89");
        assert_eq!(json["savings"], "62400.16");
    }
}
