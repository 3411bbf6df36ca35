//! Orchestration driver: the full-site generation run
//!
//! Iterates the fixed component order strictly sequentially (the generation
//! service is a shared, rate-limited resource and metrics must reflect a
//! deterministic ordering), taking one eager snapshot backup before any
//! mutation. A failure on one kind never aborts the run: outcomes are
//! recorded and iteration continues.

use sitewright_core::{ComponentKind, ComponentOutcome, DesignStrategy, Result, SiteContext};
use sitewright_metrics::{MetricsCollector, MetricsSink, RunMetrics, RunSummary, TracingSink};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::controller::RetryController;
use crate::store::{ArtifactStore, BackupHandle};

/// Terminal report for one orchestration run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub backup: BackupHandle,
    pub outcomes: Vec<ComponentOutcome>,
    pub metrics: RunMetrics,
    pub summary: RunSummary,
}

/// Runs the retry controller over every component kind.
pub struct OrchestrationDriver {
    controller: RetryController,
    sink: Arc<dyn MetricsSink>,
}

impl OrchestrationDriver {
    pub fn new(controller: RetryController) -> Self {
        Self {
            controller,
            sink: Arc::new(TracingSink::new()),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Run a full generation pass over [`ComponentKind::ALL`].
    ///
    /// Non-transactional by design: each component's outcome stands alone and
    /// partial success is a normal result.
    pub async fn run(
        &self,
        strategy: &DesignStrategy,
        site: &SiteContext,
        store: &dyn ArtifactStore,
    ) -> Result<RunReport> {
        // One eager snapshot before any mutation; never auto-restored
        let backup = store.snapshot().await?;

        let mut collector = MetricsCollector::new();
        let run_id = collector.run_id();
        tracing::info!(
            "Starting run {} for site '{}' ({} components, backup at {})",
            run_id,
            site.name,
            ComponentKind::ALL.len(),
            backup.location
        );

        let mut outcomes = Vec::with_capacity(ComponentKind::ALL.len());

        for kind in ComponentKind::ALL {
            let started = Instant::now();

            let outcome = match self.controller.run(kind, strategy, site, store).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!("{} failed outside the retry loop: {}", kind, e);
                    ComponentOutcome {
                        kind,
                        accepted: false,
                        attempts_used: 0,
                        final_score: 0.0,
                        artifact: None,
                    }
                }
            };

            let latency_ms = started.elapsed().as_millis() as u64;
            let record = collector.record(&outcome, latency_ms);
            self.sink.record_component(run_id, &record);
            outcomes.push(outcome);
        }

        let metrics = collector.metrics();
        let summary = collector.summary();
        self.sink.record_summary(run_id, &summary);

        tracing::info!(
            "Run {} complete: {}/{} accepted, average quality {:.0}",
            run_id,
            metrics.successful,
            metrics.total_components,
            summary.average_quality
        );

        Ok(RunReport {
            run_id,
            backup,
            outcomes,
            metrics,
            summary,
        })
    }
}
