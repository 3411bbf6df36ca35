//! Append-only metrics sink
//!
//! The sink receives per-component records and a terminal run summary, keyed
//! by run id. The tracing sink emits structured log events; the memory sink
//! keeps events for test assertions.

use std::sync::Mutex;
use uuid::Uuid;

use crate::collector::{ComponentRecord, RunSummary};

/// Append-only destination for run telemetry.
pub trait MetricsSink: Send + Sync {
    fn record_component(&self, run_id: Uuid, record: &ComponentRecord);
    fn record_summary(&self, run_id: Uuid, summary: &RunSummary);
}

/// Sink that emits structured tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsSink for TracingSink {
    fn record_component(&self, run_id: Uuid, record: &ComponentRecord) {
        tracing::info!(
            run = %run_id,
            kind = %record.kind,
            accepted = record.accepted,
            attempts = record.attempts_used,
            score = record.final_score,
            latency_ms = record.latency_ms,
            "component outcome"
        );
    }

    fn record_summary(&self, run_id: Uuid, summary: &RunSummary) {
        tracing::info!(
            run = %run_id,
            success_rate = summary.success_rate,
            average_quality = summary.average_quality,
            total_components = summary.total_components,
            "run summary"
        );
    }
}

/// One appended sink event
#[derive(Debug, Clone)]
pub enum SinkEvent {
    Component(Uuid, ComponentRecord),
    Summary(Uuid, RunSummary),
}

/// In-memory sink for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SinkEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().expect("sink mutex poisoned").clone()
    }
}

impl MetricsSink for MemorySink {
    fn record_component(&self, run_id: Uuid, record: &ComponentRecord) {
        self.events
            .lock()
            .expect("sink mutex poisoned")
            .push(SinkEvent::Component(run_id, record.clone()));
    }

    fn record_summary(&self, run_id: Uuid, summary: &RunSummary) {
        self.events
            .lock()
            .expect("sink mutex poisoned")
            .push(SinkEvent::Summary(run_id, summary.clone()));
    }
}
