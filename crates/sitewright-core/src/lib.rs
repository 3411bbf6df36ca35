//! # sitewright-core
//!
//! Core types for the Sitewright generation pipeline.
//!
//! Sitewright turns a natural-language design vision into website component
//! source artifacts by driving an external text-generation service through a
//! quality-gated generate → filter → validate → repair → score loop.
//!
//! ## Core Paradigm
//!
//! - Artifacts ARE opaque source text, one per component kind
//! - Acceptance IS a rubric score reaching the configured target
//! - Retry IS the normal response to a validation shortfall
//! - The final attempt is accepted best-effort, availability over strict quality

mod config;
mod error;
mod icons;
mod types;

pub use config::{GenerationDefaults, RepairConfig, SitewrightConfig};
pub use error::{Result, SitewrightError};
pub use icons::IconCatalog;
pub use types::*;
