//! Strategy planner: vision text to structured design strategy
//!
//! The generation service is asked for one JSON object. Structure is
//! recovered by extracting the first balanced brace-delimited substring from
//! the free-text response and parsing it; any failure along the way degrades
//! to [`crate::fallback_strategy`]. The planner has no other side effects and
//! never raises past this point.

use sitewright_gen::{GenerationRequest, GenerationService, Model};
use sitewright_core::{ComponentKind, DesignStrategy, OrchestrationMode, SiteContext};
use std::sync::Arc;

use crate::fallback::fallback_strategy;

/// Produces the run-wide [`DesignStrategy`].
pub struct StrategyPlanner {
    service: Arc<dyn GenerationService>,
    model: Model,
    max_tokens: usize,
    temperature: f32,
}

impl StrategyPlanner {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self {
            service,
            model: Model::default(),
            max_tokens: 4000,
            temperature: 0.4,
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Plan a design strategy for the given vision and site.
    ///
    /// Infallible by contract: generation errors and unparsable output both
    /// return the fallback strategy.
    pub async fn plan(
        &self,
        vision: &str,
        site: &SiteContext,
        mode: OrchestrationMode,
    ) -> DesignStrategy {
        let request = GenerationRequest {
            model: self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system_prompt: PLANNER_SYSTEM_PROMPT.to_string(),
            user_prompt: build_planner_prompt(vision, site, mode),
        };

        let output = match self.service.generate(request).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Strategy generation failed, using fallback: {}", e);
                return fallback_strategy();
            }
        };

        match extract_json_object(&output).and_then(|json| {
            serde_json::from_str::<DesignStrategy>(json)
                .map_err(|e| tracing::debug!("Strategy parse failed: {}", e))
                .ok()
        }) {
            Some(strategy) => {
                tracing::info!(
                    "Planned strategy with {} component plans",
                    strategy.component_plans.len()
                );
                strategy
            }
            None => {
                tracing::warn!("No parsable strategy in planner output, using fallback");
                fallback_strategy()
            }
        }
    }
}

const PLANNER_SYSTEM_PROMPT: &str =
    "You are a web design strategist. Respond with exactly one JSON object and \
     no surrounding prose.";

fn build_planner_prompt(vision: &str, site: &SiteContext, mode: OrchestrationMode) -> String {
    let kinds: Vec<String> = ComponentKind::ALL.iter().map(|k| k.to_string()).collect();

    let mut prompt = String::new();
    prompt.push_str("## VISION\n\n");
    prompt.push_str(vision);
    prompt.push_str("\n\n## SITE\n\n");
    prompt.push_str(&format!("Name: {}\nIndustry: {}\n", site.name, site.industry));
    if let Some(description) = &site.description {
        prompt.push_str(&format!("Description: {}\n", description));
    }
    if let Some(audience) = &site.audience {
        prompt.push_str(&format!("Audience: {}\n", audience));
    }
    prompt.push_str(&format!("Mode: {}\n", mode));
    prompt.push_str("\n## OUTPUT\n\n");
    prompt.push_str(
        "Produce a JSON object with string fields `approach`, `style_direction`, \
         `color_story`, `design_system`, and a `component_plans` object keyed by \
         component kind. Each plan has `priority` (critical|high|medium|low), \
         `method` (template|hybrid|custom), `customization_level`, \
         `creativity_focus`, `design_intent`, `technical_requirements` (array of \
         strings) and `reason`.\n",
    );
    prompt.push_str(&format!("Component kinds: {}\n", kinds.join(", ")));
    prompt
}

/// Extract the first balanced brace-delimited substring.
///
/// Depth counting only; brace characters inside string literals will confuse
/// it, which the parse step catches by falling back.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;

    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
