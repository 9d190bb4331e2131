use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::{format_amount, max};
use crate::models::{Regime, TaxInput, TaxResult};

/// Largest Section 80C deduction a taxpayer can claim.
pub const SECTION_80C_LIMIT: Decimal = Decimal::from_parts(150_000, 0, 0, false, 0);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InsightError {
    #[error("insight provider is not configured")]
    NotConfigured,

    #[error("insight provider denied access")]
    AccessDenied,

    #[error("insight provider is throttling requests")]
    Throttled,

    #[error("insight provider returned no content")]
    EmptyResponse,

    #[error("insight provider timed out after {0:?}")]
    Timeout(Duration),

    #[error("insight provider error: {0}")]
    Provider(String),

    #[error("unknown insight backend '{backend}'; available: {available:?}")]
    UnknownBackend {
        backend: String,
        available: Vec<&'static str>,
    },
}

impl InsightError {
    /// Text shown in place of insights when generation fails.
    pub fn placeholder(&self) -> String {
        match self {
            Self::NotConfigured | Self::UnknownBackend { .. } => {
                "AI insights unavailable - insight provider not configured".to_string()
            }
            Self::AccessDenied => {
                "AI insights unavailable - insufficient provider permissions".to_string()
            }
            Self::Throttled => "AI insights temporarily unavailable - service busy".to_string(),
            Self::EmptyResponse => {
                "AI insights generation failed - no content returned".to_string()
            }
            Self::Timeout(_) | Self::Provider(_) => {
                "AI insights temporarily unavailable".to_string()
            }
        }
    }
}

/// Everything a provider may draw on when writing insights.
#[derive(Debug, Clone)]
pub struct InsightRequest<'a> {
    pub input: &'a TaxInput,
    pub result: &'a TaxResult,
    /// Rendered prompt for language-model backends.
    pub prompt: String,
    pub max_tokens: u32,
}

/// Capability that turns a calculation into advisory text.
///
/// Implementations are constructed once per process and passed to
/// whatever composes them with the engine.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Short identifier reported alongside generated text.
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    async fn generate_insights(
        &self,
        request: &InsightRequest<'_>,
    ) -> Result<String, InsightError>;
}

/// Stand-in used when no provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableInsights;

#[async_trait]
impl InsightProvider for UnavailableInsights {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn generate_insights(
        &self,
        _request: &InsightRequest<'_>,
    ) -> Result<String, InsightError> {
        Err(InsightError::NotConfigured)
    }
}

/// Offline provider that derives advice directly from the numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedInsights;

impl RuleBasedInsights {
    fn strategies(
        input: &TaxInput,
        result: &TaxResult,
    ) -> Vec<String> {
        let mut lines = Vec::new();

        match result.regime {
            Regime::Old => {
                let headroom = max(
                    SECTION_80C_LIMIT.saturating_sub(input.deductions_80c),
                    Decimal::ZERO,
                );
                if headroom > Decimal::ZERO {
                    lines.push(format!(
                        "Invest up to ₹{} more under Section 80C (limit ₹{}) to lower taxable income.",
                        format_amount(headroom),
                        format_amount(SECTION_80C_LIMIT),
                    ));
                } else {
                    lines.push("Section 80C limit is fully used.".to_string());
                }
                if input.health_insurance_premium.is_zero() {
                    lines.push(
                        "A health insurance policy adds a further deduction under the old regime."
                            .to_string(),
                    );
                }
            }
            Regime::New => {
                lines.push(
                    "Deductions such as 80C and health insurance do not reduce tax under the new regime."
                        .to_string(),
                );
                if !input.is_salaried {
                    lines.push(
                        "The ₹75,000 standard deduction is only available to salaried taxpayers."
                            .to_string(),
                    );
                }
            }
        }

        if result.rebate_applied > Decimal::ZERO {
            lines.push(format!(
                "Section 87A rebate of ₹{} applied against ₹{} of tax.",
                format_amount(result.rebate_applied),
                format_amount(result.tax_after_cess),
            ));
        } else if result.rebate_87a.is_zero() && result.final_tax > Decimal::ZERO {
            lines.push("Income is above the Section 87A rebate limit.".to_string());
        }

        lines
    }
}

#[async_trait]
impl InsightProvider for RuleBasedInsights {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn generate_insights(
        &self,
        request: &InsightRequest<'_>,
    ) -> Result<String, InsightError> {
        let result = request.result;
        let mut text = format!(
            "Tax payable under the {} regime for FY {}: ₹{} (effective rate {}%).\n",
            result.regime,
            result.metadata.financial_year,
            format_amount(result.final_tax),
            format_amount(result.effective_rate),
        );

        text.push_str("\nTAX OPTIMIZATION STRATEGIES\n");
        for line in Self::strategies(request.input, result) {
            text.push_str("- ");
            text.push_str(&line);
            text.push('\n');
        }

        text.push_str("\nCOMPLIANCE REMINDERS\n");
        text.push_str(&format!(
            "- File the return for FY {} by 31 July unless an audit applies.\n",
            result.metadata.financial_year
        ));

        Ok(text)
    }
}
