//! # sitewright-repair
//!
//! Commentary filter and deterministic repair pipeline for Sitewright
//! artifacts.
//!
//! Raw generation output passes through two text-to-text stages:
//!
//! 1. [`CommentaryFilter`] strips conversational prose and markdown fences,
//!    then re-anchors the text at its first code line.
//! 2. [`RepairEngine`] applies a fixed-order table of idempotent transforms
//!    (directive insertion, scoped-style stripping, icon validation, content
//!    padding, hygiene injection, dead-marker stripping, corruption repair,
//!    metadata normalization).
//!
//! Every transform finding nothing to change is a silent no-op. Re-applying
//! either stage to its own output is a no-op.

mod engine;
mod filter;
mod rules;

pub use engine::RepairEngine;
pub use filter::CommentaryFilter;
pub use rules::{RepairContext, RepairRule, REPAIR_RULES};
