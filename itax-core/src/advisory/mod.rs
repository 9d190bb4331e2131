//! Advisory text layered over the engine.
//!
//! A [`TaxAdvisor`] resolves the numbers with the engine and asks an
//! [`InsightProvider`] for commentary. Providers are built from an
//! [`InsightConfig`] through an [`InsightRegistry`].

pub mod advisor;
pub mod factory;
pub mod prompt;
pub mod provider;

pub use advisor::{ComparisonReport, TaxAdvisor, TaxReport};
pub use factory::{
    InsightConfig, InsightProviderFactory, InsightRegistry, RuleBasedInsightsFactory,
    UnavailableInsightsFactory,
};
pub use prompt::PromptBuilder;
pub use provider::{
    InsightError, InsightProvider, InsightRequest, RuleBasedInsights, UnavailableInsights,
};
