//! Artifact generator: prompt assembly plus one generation call
//!
//! The generator owns no retry policy. It performs exactly one call per
//! invocation and reports failure (including empty output) to the caller,
//! which decides whether another attempt is allowed.

use crate::client::GenerationService;
use crate::prompt::{build_artifact_prompt, build_system_prompt};
use crate::types::{GenerationRequest, Model};
use sitewright_core::{GenerationContext, IconCatalog, Result, SitewrightError};
use std::sync::Arc;

/// Assembles prompts and drives the generation service for one attempt.
pub struct ArtifactGenerator {
    service: Arc<dyn GenerationService>,
    catalog: IconCatalog,
    model: Model,
    max_tokens: usize,
    temperature: f32,
}

impl ArtifactGenerator {
    pub fn new(service: Arc<dyn GenerationService>, catalog: IconCatalog) -> Self {
        Self {
            service,
            catalog,
            model: Model::default(),
            max_tokens: 16000,
            temperature: 0.7,
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Run one generation attempt and return the fully accumulated output.
    ///
    /// Empty output is an error: an artifact either exists in full or the
    /// attempt failed.
    pub async fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        tracing::info!(
            "Generating {} artifact (attempt {})",
            ctx.kind,
            ctx.attempt
        );

        let request = GenerationRequest {
            model: self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system_prompt: build_system_prompt(),
            user_prompt: build_artifact_prompt(ctx, &self.catalog),
        };

        let output = self.service.generate(request).await?;

        if output.trim().is_empty() {
            return Err(SitewrightError::Generation(format!(
                "Empty output for {} on attempt {}",
                ctx.kind, ctx.attempt
            )));
        }

        Ok(output)
    }
}
