//! # sitewright-validation
//!
//! Structural rubric, quality scoring and icon validation for Sitewright
//! artifacts.
//!
//! The rubric is one declarative table of `{name, predicate, weight}` checks.
//! The structural pass turns it into a weighted completeness verdict; the
//! quality pass combines that verdict with eleven independent hygiene checks
//! into a 0-100 score. Both passes are pure functions of the artifact text.

mod icons;
mod quality;
mod rubric;
mod structural;

pub use icons::IconReferenceValidator;
pub use quality::{HygieneResult, QualityParams, QualityReport, QualityScorer};
pub use rubric::{is_conversational_line, ArtifactView, CheckSpec, STRUCTURAL_CHECKS};
pub use structural::{CheckResult, StructuralValidator, ValidationReport};
