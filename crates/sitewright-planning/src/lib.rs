//! # sitewright-planning
//!
//! Design strategy planning for Sitewright runs.
//!
//! The planner turns a free-text vision plus site context into a structured
//! [`sitewright_core::DesignStrategy`] by asking the generation service for a
//! single JSON object and recovering it from the free-text response. Planning
//! never fails: any generation or parse error degrades to a fixed fallback
//! strategy.

mod fallback;
mod planner;

pub use fallback::fallback_strategy;
pub use planner::{extract_json_object, StrategyPlanner};
