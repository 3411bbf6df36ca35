//! # sitewright-gen
//!
//! Generation service client and prompt assembly for Sitewright.
//!
//! The external text-generation service is reached through the
//! [`GenerationService`] trait so the pipeline can run against stubs in tests.
//! The live implementation talks to the Anthropic API with bounded retry,
//! exponential backoff and a process-wide circuit breaker.
//!
//! ## Key Pattern
//!
//! Every call is fully drained into one string before any downstream stage
//! sees it. No partial-artifact processing is permitted anywhere in the
//! pipeline.

mod auth;
mod circuit_breaker;
mod client;
mod generator;
mod prompt;
mod types;

pub use auth::get_auth_token;
pub use circuit_breaker::{CircuitBreaker, CircuitState};
pub use client::{AnthropicClient, GenerationService};
pub use generator::ArtifactGenerator;
pub use prompt::{build_artifact_prompt, build_system_prompt};
pub use types::*;
