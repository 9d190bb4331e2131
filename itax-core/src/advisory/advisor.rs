use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::prompt::{DEFAULT_MAX_TOKENS, PromptBuilder};
use super::provider::{InsightError, InsightProvider, InsightRequest};
use crate::TaxEngine;
use crate::models::{RegimeComparison, TaxInput, TaxResult};

/// A calculation together with advisory text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxReport {
    pub result: TaxResult,
    pub ai_insights: String,
    /// Name of the provider that produced `ai_insights`.
    pub provider: String,
    pub generated_at: DateTime<Utc>,
}

/// A regime comparison together with advice for the recommended regime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub comparison: RegimeComparison,
    pub ai_insights: String,
    pub provider: String,
    pub generated_at: DateTime<Utc>,
}

/// Composes the engine with an insight provider.
///
/// Insight failures are logged and replaced by a placeholder; they never
/// change the computed figures.
#[derive(Clone)]
pub struct TaxAdvisor {
    engine: TaxEngine,
    provider: Arc<dyn InsightProvider>,
    timeout: Duration,
}

impl TaxAdvisor {
    pub fn new(
        engine: TaxEngine,
        provider: Arc<dyn InsightProvider>,
    ) -> Self {
        Self {
            engine,
            provider,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(
        mut self,
        timeout: Duration,
    ) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn engine(&self) -> &TaxEngine {
        &self.engine
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Resolves `input` under its regime and attaches insights.
    pub async fn advise(
        &self,
        input: &TaxInput,
    ) -> TaxReport {
        let result = self.engine.resolve(input);
        let ai_insights = self.insights_for(input, &result).await;

        TaxReport {
            result,
            ai_insights,
            provider: self.provider.name().to_string(),
            generated_at: Utc::now(),
        }
    }

    /// Compares both regimes and attaches insights for the recommended one.
    pub async fn advise_comparison(
        &self,
        input: &TaxInput,
    ) -> ComparisonReport {
        let comparison = self.engine.compare_input(input);
        let recommended_input = input.clone().with_regime(comparison.recommended_regime);
        let ai_insights = self
            .insights_for(&recommended_input, comparison.recommended())
            .await;

        ComparisonReport {
            comparison,
            ai_insights,
            provider: self.provider.name().to_string(),
            generated_at: Utc::now(),
        }
    }

    async fn insights_for(
        &self,
        input: &TaxInput,
        result: &TaxResult,
    ) -> String {
        if !self.provider.is_available() {
            return InsightError::NotConfigured.placeholder();
        }

        let request = InsightRequest {
            input,
            result,
            prompt: PromptBuilder::new(input, result).build(),
            max_tokens: DEFAULT_MAX_TOKENS,
        };

        let outcome = tokio::time::timeout(self.timeout, self.provider.generate_insights(&request))
            .await
            .unwrap_or(Err(InsightError::Timeout(self.timeout)));

        match outcome {
            Ok(text) if text.trim().is_empty() => {
                warn!(provider = self.provider.name(), "insight provider returned empty text");
                InsightError::EmptyResponse.placeholder()
            }
            Ok(text) => {
                info!(provider = self.provider.name(), "generated insights");
                text
            }
            Err(error) => {
                warn!(provider = self.provider.name(), %error, "insight generation failed");
                error.placeholder()
            }
        }
    }
}

impl std::fmt::Debug for TaxAdvisor {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("TaxAdvisor")
            .field("provider", &self.provider.name())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
