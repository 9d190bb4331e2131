use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{InsightError, InsightProvider, RuleBasedInsights, UnavailableInsights};

/// Backend-agnostic insight provider configuration.
///
/// `backend` must match the [`InsightProviderFactory::backend_name`] of a
/// registered factory. `model_id` and `region` are not read by the built-in
/// backends; they are passed through unchanged to factories registered with
/// [`InsightRegistry::register`] for hosted language-model services.
///
/// | backend | meaning                                  |
/// |---------|------------------------------------------|
/// | `none`  | insights disabled, placeholder text only |
/// | `rules` | offline advice derived from the figures  |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub backend: String,
    /// Model identifier for language-model backends.
    pub model_id: Option<String>,
    pub region: Option<String>,
    /// Upper bound on a single insight call.
    pub timeout_secs: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            backend: "none".to_string(),
            model_id: None,
            region: None,
            timeout_secs: 30,
        }
    }
}

/// One implementation per insight backend, registered with an
/// [`InsightRegistry`] at startup.
#[async_trait]
pub trait InsightProviderFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &InsightConfig,
    ) -> Result<Arc<dyn InsightProvider>, InsightError>;
}

/// Factory for [`UnavailableInsights`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableInsightsFactory;

#[async_trait]
impl InsightProviderFactory for UnavailableInsightsFactory {
    fn backend_name(&self) -> &'static str {
        "none"
    }

    async fn create(
        &self,
        _config: &InsightConfig,
    ) -> Result<Arc<dyn InsightProvider>, InsightError> {
        Ok(Arc::new(UnavailableInsights))
    }
}

/// Factory for [`RuleBasedInsights`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedInsightsFactory;

#[async_trait]
impl InsightProviderFactory for RuleBasedInsightsFactory {
    fn backend_name(&self) -> &'static str {
        "rules"
    }

    async fn create(
        &self,
        _config: &InsightConfig,
    ) -> Result<Arc<dyn InsightProvider>, InsightError> {
        Ok(Arc::new(RuleBasedInsights))
    }
}

/// Registry of [`InsightProviderFactory`] instances, keyed by backend name.
pub struct InsightRegistry {
    factories: HashMap<&'static str, Box<dyn InsightProviderFactory>>,
}

impl InsightRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with the `none` and `rules` backends.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(UnavailableInsightsFactory));
        registry.register(Box::new(RuleBasedInsightsFactory));
        registry
    }

    /// Registers a backend factory, replacing any with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn InsightProviderFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatches to the factory matching `config.backend`.
    ///
    /// # Errors
    ///
    /// * [`InsightError::UnknownBackend`] if no factory is registered for
    ///   the requested backend.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &InsightConfig,
    ) -> Result<Arc<dyn InsightProvider>, InsightError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| InsightError::UnknownBackend {
                backend: config.backend.clone(),
                available: self.available_backends(),
            })?;

        factory.create(config).await
    }
}

impl Default for InsightRegistry {
    fn default() -> Self {
        Self::new()
    }
}
