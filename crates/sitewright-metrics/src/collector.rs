//! Metrics collection for orchestration runs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitewright_core::{ComponentKind, ComponentOutcome};
use uuid::Uuid;

/// Per-component record within a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub kind: ComponentKind,
    pub accepted: bool,
    pub attempts_used: u32,
    pub final_score: f32,
    pub latency_ms: u64,
    pub completed_at: DateTime<Utc>,
}

/// Aggregate metrics for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    pub total_components: usize,
    pub successful: usize,
    pub failed: usize,
    pub average_latency_ms: f64,
    pub quality_scores: Vec<f32>,
}

/// Terminal run summary for the metrics sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub success_rate: f32,
    pub average_quality: f32,
    pub total_components: usize,
}

/// Accumulates per-component outcomes for one orchestration run.
///
/// Runs are strictly sequential, so the collector is plain mutable state.
pub struct MetricsCollector {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    records: Vec<ComponentRecord>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            records: Vec::new(),
        }
    }

    /// Identifier keying this run in the metrics sink.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Record one component outcome.
    pub fn record(&mut self, outcome: &ComponentOutcome, latency_ms: u64) -> ComponentRecord {
        let record = ComponentRecord {
            kind: outcome.kind,
            accepted: outcome.accepted,
            attempts_used: outcome.attempts_used,
            final_score: outcome.final_score,
            latency_ms,
            completed_at: Utc::now(),
        };
        self.records.push(record.clone());
        tracing::debug!(
            "Recorded {}: accepted={} score={:.0} ({} attempts, {}ms)",
            record.kind,
            record.accepted,
            record.final_score,
            record.attempts_used,
            record.latency_ms
        );
        record
    }

    pub fn records(&self) -> &[ComponentRecord] {
        &self.records
    }

    /// Aggregate metrics over everything recorded so far.
    pub fn metrics(&self) -> RunMetrics {
        let total = self.records.len();
        let successful = self.records.iter().filter(|r| r.accepted).count();
        let average_latency_ms = if total == 0 {
            0.0
        } else {
            self.records.iter().map(|r| r.latency_ms as f64).sum::<f64>() / total as f64
        };

        RunMetrics {
            total_components: total,
            successful,
            failed: total - successful,
            average_latency_ms,
            quality_scores: self.records.iter().map(|r| r.final_score).collect(),
        }
    }

    /// Terminal summary for the metrics sink.
    pub fn summary(&self) -> RunSummary {
        let metrics = self.metrics();
        let success_rate = if metrics.total_components == 0 {
            1.0
        } else {
            metrics.successful as f32 / metrics.total_components as f32
        };
        let average_quality = if metrics.quality_scores.is_empty() {
            0.0
        } else {
            metrics.quality_scores.iter().sum::<f32>() / metrics.quality_scores.len() as f32
        };

        RunSummary {
            success_rate,
            average_quality,
            total_components: metrics.total_components,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(kind: ComponentKind, accepted: bool, score: f32) -> ComponentOutcome {
        ComponentOutcome {
            kind,
            accepted,
            attempts_used: 1,
            final_score: score,
            artifact: accepted.then(|| "text".to_string()),
        }
    }

    #[test]
    fn test_empty_run_summary() {
        let collector = MetricsCollector::new();
        let summary = collector.summary();
        assert_eq!(summary.success_rate, 1.0);
        assert_eq!(summary.average_quality, 0.0);
        assert_eq!(summary.total_components, 0);
    }

    #[test]
    fn test_metrics_aggregation() {
        let mut collector = MetricsCollector::new();
        collector.record(&outcome(ComponentKind::Header, true, 100.0), 200);
        collector.record(&outcome(ComponentKind::Footer, true, 90.0), 400);
        collector.record(&outcome(ComponentKind::Hero, false, 0.0), 600);

        let metrics = collector.metrics();
        assert_eq!(metrics.total_components, 3);
        assert_eq!(metrics.successful, 2);
        assert_eq!(metrics.failed, 1);
        assert!((metrics.average_latency_ms - 400.0).abs() < f64::EPSILON);
        assert_eq!(metrics.quality_scores, vec![100.0, 90.0, 0.0]);
    }

    #[test]
    fn test_summary_rates() {
        let mut collector = MetricsCollector::new();
        collector.record(&outcome(ComponentKind::Header, true, 100.0), 100);
        collector.record(&outcome(ComponentKind::Hero, false, 60.0), 100);

        let summary = collector.summary();
        assert!((summary.success_rate - 0.5).abs() < f32::EPSILON);
        assert!((summary.average_quality - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(MetricsCollector::new().run_id(), MetricsCollector::new().run_id());
    }
}
