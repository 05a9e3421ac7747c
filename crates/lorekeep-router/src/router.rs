// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task-type model routing.
//!
//! Narrative requests prefer the local/fast provider, ruling requests prefer
//! the stronger remote one. Either provider may be absent, in which case the
//! other route's provider serves the request. Provider errors surface to the
//! caller unchanged.

use std::sync::Arc;

use tracing::{info, warn};

use lorekeep_core::{GenerateRequest, GenerateResult, LorekeepError, ModelProvider, TaskType};

/// Routes generation requests to a provider by task type.
///
/// Both providers are optional. With neither configured, every request
/// resolves to [`GenerateResult::empty`] so the caller can keep the
/// conversation alive and tell the user no model is reachable.
pub struct ModelRouter {
    narrative: Option<Arc<dyn ModelProvider>>,
    ruling: Option<Arc<dyn ModelProvider>>,
}

impl ModelRouter {
    pub fn new(
        narrative: Option<Arc<dyn ModelProvider>>,
        ruling: Option<Arc<dyn ModelProvider>>,
    ) -> Self {
        Self { narrative, ruling }
    }

    /// Whether at least one provider is configured.
    pub fn has_any_provider(&self) -> bool {
        self.narrative.is_some() || self.ruling.is_some()
    }

    /// Route a request by task type.
    ///
    /// The preferred provider for the task serves the request; if it is not
    /// configured, the other route's provider does. With no provider
    /// configured at all, returns [`GenerateResult::empty`] rather than an
    /// error. A provider failure is the caller's problem and propagates.
    pub async fn generate(
        &self,
        task: TaskType,
        request: GenerateRequest,
    ) -> Result<GenerateResult, LorekeepError> {
        let (preferred, other) = match task {
            TaskType::Narrative => (self.narrative.as_ref(), self.ruling.as_ref()),
            TaskType::Ruling => (self.ruling.as_ref(), self.narrative.as_ref()),
        };

        let Some(provider) = preferred.or(other) else {
            warn!(%task, "no provider configured, returning empty result");
            return Ok(GenerateResult::empty());
        };

        let result = provider.generate(request).await?;
        info!(%task, provider = provider.name(), model = %result.model, "generation complete");
        Ok(result)
    }

    /// Convenience wrapper for [`TaskType::Narrative`].
    pub async fn generate_narrative(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResult, LorekeepError> {
        self.generate(TaskType::Narrative, request).await
    }

    /// Convenience wrapper for [`TaskType::Ruling`].
    pub async fn generate_ruling(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResult, LorekeepError> {
        self.generate(TaskType::Ruling, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorekeep_test_utils::{FailingProvider, MockProvider};

    #[tokio::test]
    async fn narrative_routes_to_narrative_provider() {
        let narrative = Arc::new(MockProvider::with_responses(vec!["tavern scene".into()]));
        let ruling = Arc::new(MockProvider::with_responses(vec!["rules text".into()]));
        let router = ModelRouter::new(Some(narrative), Some(ruling));

        let result = router
            .generate_narrative(GenerateRequest::new("describe the tavern", None))
            .await
            .unwrap();
        assert_eq!(result.text, "tavern scene");
    }

    #[tokio::test]
    async fn ruling_routes_to_ruling_provider() {
        let narrative = Arc::new(MockProvider::with_responses(vec!["tavern scene".into()]));
        let ruling = Arc::new(MockProvider::with_responses(vec!["rules text".into()]));
        let router = ModelRouter::new(Some(narrative), Some(ruling));

        let result = router
            .generate_ruling(GenerateRequest::new("can I grapple?", None))
            .await
            .unwrap();
        assert_eq!(result.text, "rules text");
    }

    #[tokio::test]
    async fn missing_primary_uses_other_provider() {
        let ruling = Arc::new(MockProvider::with_responses(vec!["covered it".into()]));
        let router = ModelRouter::new(None, Some(ruling));

        let result = router
            .generate_narrative(GenerateRequest::new("describe", None))
            .await
            .unwrap();
        assert_eq!(result.text, "covered it");
    }

    #[tokio::test]
    async fn provider_error_surfaces_even_with_other_provider_present() {
        let ruling = Arc::new(MockProvider::with_responses(vec!["rules text".into()]));
        let router = ModelRouter::new(Some(Arc::new(FailingProvider)), Some(ruling));

        let result = router
            .generate_narrative(GenerateRequest::new("describe", None))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn provider_error_surfaces_without_other_provider() {
        let router = ModelRouter::new(Some(Arc::new(FailingProvider)), None);
        let result = router
            .generate_narrative(GenerateRequest::new("describe", None))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn no_providers_yields_empty_result() {
        let router = ModelRouter::new(None, None);
        assert!(!router.has_any_provider());

        let result = router
            .generate(TaskType::Ruling, GenerateRequest::new("anything", None))
            .await
            .unwrap();
        assert!(result.text.is_empty());
        assert_eq!(result.model, "none");
    }
}
