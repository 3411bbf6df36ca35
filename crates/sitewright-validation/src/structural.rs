//! Structural validator: weighted completeness verdict over the rubric table

use serde::{Deserialize, Serialize};
use sitewright_core::ComponentKind;

use crate::rubric::{ArtifactView, STRUCTURAL_CHECKS};

/// Result of a single structural check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub weight: f32,
}

/// Full structural validation report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Individual check results, in rubric order
    pub checks: Vec<CheckResult>,
    /// Weighted completeness score, 0-100
    pub completeness: f32,
    /// Whether completeness reached the acceptance threshold
    pub is_complete: bool,
}

impl ValidationReport {
    /// Names of the checks that failed, for logging and prompts.
    pub fn failed_checks(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Runs the full weighted check set against an artifact.
pub struct StructuralValidator {
    threshold: f32,
}

impl StructuralValidator {
    pub fn new() -> Self {
        Self { threshold: 75.0 }
    }

    /// Override the completeness threshold (default 75).
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Validate an artifact's structure and compute its completeness verdict.
    pub fn validate(&self, kind: ComponentKind, text: &str) -> ValidationReport {
        let view = ArtifactView::new(text, kind);

        let checks: Vec<CheckResult> = STRUCTURAL_CHECKS
            .iter()
            .map(|spec| CheckResult {
                name: spec.name.to_string(),
                passed: (spec.predicate)(&view),
                weight: spec.weight,
            })
            .collect();

        let total_weight: f32 = checks.iter().map(|c| c.weight).sum();
        let passed_weight: f32 = checks.iter().filter(|c| c.passed).map(|c| c.weight).sum();
        let completeness = if total_weight > 0.0 {
            100.0 * passed_weight / total_weight
        } else {
            0.0
        };

        let report = ValidationReport {
            checks,
            completeness,
            is_complete: completeness >= self.threshold,
        };

        if !report.is_complete {
            tracing::debug!(
                "{} artifact incomplete ({:.0}): failed {:?}",
                kind,
                report.completeness,
                report.failed_checks()
            );
        }

        report
    }
}

impl Default for StructuralValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_complete_artifact_scores_one_hundred() {
        let validator = StructuralValidator::new();
        for kind in ComponentKind::ALL {
            let report = validator.validate(kind, &complete_artifact(kind));
            assert_eq!(report.completeness, 100.0, "kind {}", kind);
            assert!(report.is_complete);
            assert!(report.failed_checks().is_empty());
        }
    }

    #[test]
    fn test_removing_default_export_strictly_decreases_completeness() {
        let validator = StructuralValidator::new();
        let full = complete_artifact(ComponentKind::Hero);
        let without = full.replace("export default Hero;\n", "");

        let full_report = validator.validate(ComponentKind::Hero, &full);
        let partial_report = validator.validate(ComponentKind::Hero, &without);

        assert!(partial_report.completeness < full_report.completeness);
    }

    #[test]
    fn test_empty_text_is_incomplete() {
        let validator = StructuralValidator::new();
        let report = validator.validate(ComponentKind::Header, "");
        assert!(!report.is_complete);
        assert!(report.completeness < 75.0);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let lenient = StructuralValidator::new().with_threshold(50.0);
        let text = complete_artifact(ComponentKind::Cta).replace("export default Cta;\n", "");
        let report = lenient.validate(ComponentKind::Cta, &text);
        assert!(report.completeness >= 50.0);
        assert!(report.is_complete);
    }

    #[test]
    fn test_checks_preserve_rubric_order() {
        let validator = StructuralValidator::new();
        let report = validator.validate(ComponentKind::Blog, "");
        let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names[0], "import_header");
        assert_eq!(names[names.len() - 1], "not_truncated");
    }
}
