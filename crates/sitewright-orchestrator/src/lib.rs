//! # sitewright-orchestrator
//!
//! Retry controller and orchestration driver for Sitewright.
//!
//! The per-component retry loop is a pure state machine
//! (`transition(state, event, policy) -> (state, actions)`) with no I/O;
//! the async [`RetryController`] performs stage work between events and
//! executes the actions each transition emits. The [`OrchestrationDriver`]
//! runs the controller over the fixed component order, strictly sequentially,
//! with partial-success semantics and a one-shot pre-run backup.

mod controller;
mod driver;
mod state;
mod store;

pub use controller::{AttemptOutcome, RetryController};
pub use driver::{OrchestrationDriver, RunReport};
pub use state::{transition, Action, Event, RetryPolicy, State};
pub use store::{ArtifactStore, BackupHandle, FsArtifactStore, MemoryArtifactStore};
