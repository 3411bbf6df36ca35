//! Async retry controller driving the pure state machine
//!
//! Stage work happens between events: the controller generates, filters,
//! validates, repairs and scores, feeding each result to
//! [`crate::state::transition`] and executing the actions it returns.
//! Persistence only ever happens through a `PersistArtifact` action.

use sitewright_core::{
    ComponentKind, ComponentOutcome, DesignStrategy, GenerationContext, Result, SiteContext,
};
use sitewright_gen::ArtifactGenerator;
use sitewright_repair::{CommentaryFilter, RepairEngine};
use sitewright_validation::{
    QualityReport, QualityScorer, StructuralValidator, ValidationReport,
};

use crate::state::{transition, Action, Event, RetryPolicy, State};
use crate::store::ArtifactStore;

/// Everything one attempt produced: the repaired artifact, the pre-repair
/// structural report and the post-repair quality report.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub artifact: String,
    pub validation: ValidationReport,
    pub quality: QualityReport,
}

/// Per-component retry loop: Generate -> Filter -> Validate -> Repair ->
/// Score -> Accept/Retry/Exhaust.
pub struct RetryController {
    generator: ArtifactGenerator,
    filter: CommentaryFilter,
    validator: StructuralValidator,
    engine: RepairEngine,
    scorer: QualityScorer,
    policy: RetryPolicy,
}

impl RetryController {
    pub fn new(generator: ArtifactGenerator) -> Self {
        Self {
            generator,
            filter: CommentaryFilter::new(),
            validator: StructuralValidator::new(),
            engine: RepairEngine::default(),
            scorer: QualityScorer::default(),
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_engine(mut self, engine: RepairEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_scorer(mut self, scorer: QualityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run the retry loop for one component kind.
    ///
    /// Returns the terminal outcome; only store failures propagate as errors.
    pub async fn run(
        &self,
        kind: ComponentKind,
        strategy: &DesignStrategy,
        site: &SiteContext,
        store: &dyn ArtifactStore,
    ) -> Result<ComponentOutcome> {
        let mut state = State::Generating { attempt: 1 };
        let mut current: Option<String> = None;
        let mut prior: Option<String> = None;
        let mut validation: Option<ValidationReport> = None;
        let mut last_attempt: Option<AttemptOutcome> = None;

        let outcome = loop {
            // Terminal states resolve the outcome
            match &state {
                State::Accepted {
                    attempt,
                    score,
                    best_effort,
                } => {
                    if *best_effort {
                        tracing::warn!(
                            "{} accepted best-effort at score {:.0} after {} attempts",
                            kind,
                            score,
                            attempt
                        );
                    }
                    break ComponentOutcome {
                        kind,
                        accepted: true,
                        attempts_used: *attempt,
                        final_score: *score,
                        artifact: current.clone(),
                    };
                }
                State::Exhausted { attempts } => {
                    break ComponentOutcome {
                        kind,
                        accepted: false,
                        attempts_used: *attempts,
                        final_score: 0.0,
                        artifact: None,
                    };
                }
                _ => {}
            }

            // Perform this state's stage work and produce the next event
            let event = match &state {
                State::Generating { attempt } => {
                    let ctx = GenerationContext {
                        kind,
                        strategy,
                        site,
                        attempt: *attempt,
                        prior_artifact: prior.as_deref(),
                    };
                    match self.generator.generate(&ctx).await {
                        Ok(text) => {
                            current = Some(text);
                            Event::OutputReceived
                        }
                        Err(e) => Event::GenerationFailed {
                            reason: e.to_string(),
                        },
                    }
                }

                State::Filtering { .. } => {
                    if let Some(text) = current.take() {
                        current = Some(self.filter.filter(&text));
                    }
                    Event::TextFiltered
                }

                State::Validating { .. } => {
                    let report = self
                        .validator
                        .validate(kind, current.as_deref().unwrap_or_default());
                    let is_complete = report.is_complete;
                    validation = Some(report);
                    Event::StructureChecked { is_complete }
                }

                State::Repairing { .. } => {
                    if let Some(text) = current.take() {
                        current = Some(self.engine.repair(kind, &text));
                    }
                    Event::RepairsApplied
                }

                State::Scoring { attempt } => {
                    let score = match (current.as_ref(), validation.take()) {
                        (Some(text), Some(report)) => {
                            let quality = self.scorer.score(text, report.is_complete);
                            let score = quality.score;
                            if score < self.policy.target_score {
                                tracing::debug!(
                                    "{} attempt {} failed checks: {:?}",
                                    kind,
                                    attempt,
                                    quality.failed_checks()
                                );
                            }
                            last_attempt = Some(AttemptOutcome {
                                artifact: text.clone(),
                                validation: report,
                                quality,
                            });
                            score
                        }
                        // Unreachable in valid sequences; scored as zero
                        _ => 0.0,
                    };
                    Event::ScoreComputed { score }
                }

                State::Accepted { .. } | State::Exhausted { .. } => continue,
            };

            let (next, actions) = transition(state, event, &self.policy);
            state = next;

            for action in actions {
                match action {
                    Action::LogActivity { message } => tracing::info!("{}: {}", kind, message),
                    Action::PersistArtifact => {
                        if let Some(text) = current.as_ref() {
                            store.write(kind, text).await?;
                        }
                    }
                    Action::DiscardArtifact => {
                        prior = current.take();
                    }
                }
            }
        };

        if let Some(attempt) = &last_attempt {
            tracing::debug!(
                "{} final attempt: completeness {:.0}, quality {:.0}",
                kind,
                attempt.validation.completeness,
                attempt.quality.score
            );
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryArtifactStore;
    use async_trait::async_trait;
    use sitewright_gen::{GenerationRequest, GenerationService};
    use sitewright_core::{IconCatalog, SitewrightError};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn complete_artifact(kind: ComponentKind) -> String {
        let ident = kind.identifier();
        format!(
            "import React from 'react';\n\n\
             function {ident}() {{\n  return (\n    <section aria-label=\"{ident}\">content</section>\n  );\n}}\n\n\
             export const metadata = {{\n  type: 'component',\n  name: '{ident}',\n  description: 'Generated {ident}',\n  category: '{category}',\n  icon: 'Star',\n}};\n\n\
             export default {ident};\n",
            ident = ident,
            category = kind.category()
        )
    }

    /// Incomplete on every attempt: no render block, metadata or exports.
    fn skeleton_artifact() -> String {
        "import React from 'react';\n\nconst fragments = ['incomplete'];\n".to_string()
    }

    struct StubService {
        body: String,
        calls: AtomicU32,
    }

    impl StubService {
        fn new(body: String) -> Self {
            Self {
                body,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl GenerationService for StubService {
        async fn generate(&self, _request: GenerationRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    struct AlwaysFailing {
        calls: AtomicU32,
    }

    #[async_trait]
    impl GenerationService for AlwaysFailing {
        async fn generate(&self, _request: GenerationRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SitewrightError::Api("unavailable".to_string()))
        }
    }

    fn controller_for(service: Arc<dyn GenerationService>) -> RetryController {
        RetryController::new(ArtifactGenerator::new(service, IconCatalog::default()))
    }

    #[tokio::test]
    async fn test_complete_artifact_accepted_on_first_attempt() {
        let strategy = DesignStrategy::default();
        let site = SiteContext::new("Acme", "software");
        let store = MemoryArtifactStore::new();

        for kind in ComponentKind::ALL {
            let service = Arc::new(StubService::new(complete_artifact(kind)));
            let controller = controller_for(service.clone());

            let outcome = controller
                .run(kind, &strategy, &site, &store)
                .await
                .unwrap();

            assert!(outcome.accepted, "{} not accepted", kind);
            assert_eq!(outcome.attempts_used, 1);
            assert_eq!(outcome.final_score, 100.0);
            assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        }

        assert_eq!(store.len(), ComponentKind::ALL.len());
    }

    #[tokio::test]
    async fn test_low_quality_artifact_accepted_best_effort_on_final_attempt() {
        let strategy = DesignStrategy::default();
        let site = SiteContext::new("Acme", "software");
        let store = MemoryArtifactStore::new();

        let service = Arc::new(StubService::new(skeleton_artifact()));
        let controller = controller_for(service.clone());

        let outcome = controller
            .run(ComponentKind::Hero, &strategy, &site, &store)
            .await
            .unwrap();

        assert!(outcome.accepted);
        assert_eq!(outcome.attempts_used, controller.policy().max_attempts);
        assert!(outcome.final_score < 100.0);
        assert!(outcome.artifact.is_some());
        assert_eq!(
            service.calls.load(Ordering::SeqCst),
            controller.policy().max_attempts
        );
        assert!(store.read(ComponentKind::Hero).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failing_service_exhausts_without_persisting() {
        let strategy = DesignStrategy::default();
        let site = SiteContext::new("Acme", "software");
        let store = MemoryArtifactStore::new();

        let service = Arc::new(AlwaysFailing {
            calls: AtomicU32::new(0),
        });
        let controller = controller_for(service.clone());

        let outcome = controller
            .run(ComponentKind::Header, &strategy, &site, &store)
            .await
            .unwrap();

        assert!(!outcome.accepted);
        assert_eq!(outcome.attempts_used, 3);
        assert!(outcome.artifact.is_none());
        assert_eq!(service.calls.load(Ordering::SeqCst), 3);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_commentary_is_filtered_out_of_accepted_artifact() {
        let strategy = DesignStrategy::default();
        let site = SiteContext::new("Acme", "software");
        let store = MemoryArtifactStore::new();

        let body = format!(
            "I notice that this works. {}",
            complete_artifact(ComponentKind::Hero)
        );
        let controller = controller_for(Arc::new(StubService::new(body)));

        let outcome = controller
            .run(ComponentKind::Hero, &strategy, &site, &store)
            .await
            .unwrap();

        assert!(outcome.accepted);
        let persisted = store.read(ComponentKind::Hero).await.unwrap().unwrap();
        assert!(!persisted.contains("I notice"));
        assert!(persisted.contains("function Hero"));
    }

    #[tokio::test]
    async fn test_footer_spotify_import_repaired_to_music() {
        let strategy = DesignStrategy::default();
        let site = SiteContext::new("Acme", "music");
        let store = MemoryArtifactStore::new();

        let body = complete_artifact(ComponentKind::Footer).replace(
            "import React from 'react';",
            "import React from 'react';\nimport { Spotify } from 'lucide-react';",
        );
        let controller = controller_for(Arc::new(StubService::new(body)));

        let outcome = controller
            .run(ComponentKind::Footer, &strategy, &site, &store)
            .await
            .unwrap();

        assert!(outcome.accepted);
        let persisted = store.read(ComponentKind::Footer).await.unwrap().unwrap();
        assert!(persisted.contains("Music"));
        assert!(!persisted.contains("Spotify"));
    }

    #[tokio::test]
    async fn test_custom_policy_attempt_budget() {
        let strategy = DesignStrategy::default();
        let site = SiteContext::new("Acme", "software");
        let store = MemoryArtifactStore::new();

        let service = Arc::new(AlwaysFailing {
            calls: AtomicU32::new(0),
        });
        let controller = controller_for(service.clone()).with_policy(RetryPolicy {
            max_attempts: 5,
            target_score: 100.0,
        });

        let outcome = controller
            .run(ComponentKind::Cta, &strategy, &site, &store)
            .await
            .unwrap();

        assert_eq!(outcome.attempts_used, 5);
        assert_eq!(service.calls.load(Ordering::SeqCst), 5);
    }
}
