//! Quality scorer: 0-100 rubric combining the completeness verdict with
//! eleven independent hygiene checks
//!
//! The completeness verdict contributes 40 points (full credit when complete,
//! half otherwise); the hygiene checks contribute 60. The verdict is supplied
//! by the caller, which computed it in the validation stage - see DESIGN.md
//! for why the pre-repair snapshot is used.

use serde::{Deserialize, Serialize};

use crate::rubric::is_conversational_line;

/// Points granted for a complete structural verdict
const COMPLETENESS_POINTS: f32 = 40.0;

/// Tunable inputs to the hygiene checks
#[derive(Debug, Clone)]
pub struct QualityParams {
    /// Minimum artifact length for the content-volume check
    pub min_content_len: usize,
}

impl Default for QualityParams {
    fn default() -> Self {
        Self {
            min_content_len: 400,
        }
    }
}

/// One independent hygiene check
struct HygieneCheck {
    name: &'static str,
    points: f32,
    predicate: fn(&str, &QualityParams) -> bool,
}

/// The eleven hygiene checks. Points sum to 60.
const HYGIENE_CHECKS: &[HygieneCheck] = &[
    HygieneCheck {
        name: "theme_variables",
        points: 6.0,
        predicate: |text, _| text.contains("var(--"),
    },
    HygieneCheck {
        name: "responsive_classes",
        points: 6.0,
        predicate: |text, _| {
            text.contains("sm:") || text.contains("md:") || text.contains("lg:")
        },
    },
    HygieneCheck {
        name: "interactive_handler",
        points: 6.0,
        predicate: |text, _| {
            text.contains("onClick") || text.contains("onChange") || text.contains("onSubmit")
        },
    },
    HygieneCheck {
        name: "modern_effects",
        points: 5.0,
        predicate: |text, _| {
            text.contains("transition")
                || text.contains("gradient")
                || text.contains("shadow")
                || text.contains("backdrop-blur")
        },
    },
    HygieneCheck {
        name: "accessibility",
        points: 6.0,
        predicate: |text, _| {
            text.contains("aria-") || text.contains("role=") || text.contains("alt=")
        },
    },
    HygieneCheck {
        name: "sufficient_content",
        points: 6.0,
        predicate: |text, params| text.len() >= params.min_content_len,
    },
    HygieneCheck {
        name: "no_commentary",
        points: 5.0,
        predicate: |text, _| !text.lines().any(is_conversational_line),
    },
    HygieneCheck {
        name: "no_fences",
        points: 5.0,
        predicate: |text, _| !text.contains("```"),
    },
    HygieneCheck {
        name: "no_dead_markers",
        points: 5.0,
        predicate: |text, _| {
            !text.contains("TODO") && !text.contains("FIXME") && !text.contains("PLACEHOLDER")
        },
    },
    HygieneCheck {
        name: "single_default_export",
        points: 5.0,
        predicate: |text, _| text.matches("export default").count() == 1,
    },
    HygieneCheck {
        name: "balanced_delimiters",
        points: 5.0,
        predicate: |text, _| {
            text.matches('{').count() == text.matches('}').count()
                && text.matches('(').count() == text.matches(')').count()
        },
    },
];

/// Result of one hygiene check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HygieneResult {
    pub name: String,
    pub passed: bool,
    pub points: f32,
}

/// Full quality report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Final rubric score, 0-100
    pub score: f32,
    /// Points granted for the completeness verdict (40 or 20)
    pub completeness_credit: f32,
    /// Individual hygiene results, in table order
    pub hygiene: Vec<HygieneResult>,
}

impl QualityReport {
    /// Names of the hygiene checks that failed.
    pub fn failed_checks(&self) -> Vec<&str> {
        self.hygiene
            .iter()
            .filter(|h| !h.passed)
            .map(|h| h.name.as_str())
            .collect()
    }
}

/// Computes the 0-100 quality score for a repaired artifact.
pub struct QualityScorer {
    params: QualityParams,
}

impl QualityScorer {
    pub fn new(params: QualityParams) -> Self {
        Self { params }
    }

    /// Score an artifact.
    ///
    /// `is_complete` is the structural verdict from the validation stage;
    /// `text` is the post-repair artifact.
    pub fn score(&self, text: &str, is_complete: bool) -> QualityReport {
        let completeness_credit = if is_complete {
            COMPLETENESS_POINTS
        } else {
            COMPLETENESS_POINTS / 2.0
        };

        let hygiene: Vec<HygieneResult> = HYGIENE_CHECKS
            .iter()
            .map(|check| HygieneResult {
                name: check.name.to_string(),
                passed: (check.predicate)(text, &self.params),
                points: check.points,
            })
            .collect();

        let hygiene_points: f32 = hygiene.iter().filter(|h| h.passed).map(|h| h.points).sum();

        QualityReport {
            score: completeness_credit + hygiene_points,
            completeness_credit,
            hygiene,
        }
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new(QualityParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pristine_artifact() -> String {
        let body = r#"import React from 'react';

function Hero() {
  return (
    <section aria-label="Hero" className="md:flex shadow-lg" style={{ color: 'var(--text)' }}>
      <button onClick={() => {}} className="transition">Go</button>
    </section>
  );
}

export const metadata = {
  type: 'component',
  name: 'Hero',
  description: 'Hero section',
  category: 'marketing',
  icon: 'Star',
};

export default Hero;
"#;
        // Pad past the content-volume threshold without touching hygiene
        format!("{}\n// {}\n", body.trim_end(), "n".repeat(400))
    }

    #[test]
    fn test_hygiene_points_sum_to_sixty() {
        let total: f32 = HYGIENE_CHECKS.iter().map(|c| c.points).sum();
        assert!((total - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_eleven_checks() {
        assert_eq!(HYGIENE_CHECKS.len(), 11);
    }

    #[test]
    fn test_pristine_complete_artifact_scores_one_hundred() {
        let scorer = QualityScorer::default();
        let report = scorer.score(&pristine_artifact(), true);
        assert_eq!(report.score, 100.0, "failed: {:?}", report.failed_checks());
    }

    #[test]
    fn test_incomplete_verdict_caps_score_at_eighty() {
        let scorer = QualityScorer::default();
        let report = scorer.score(&pristine_artifact(), false);
        assert_eq!(report.completeness_credit, 20.0);
        assert_eq!(report.score, 80.0);
    }

    #[test]
    fn test_commentary_costs_points() {
        let scorer = QualityScorer::default();
        let text = format!("I notice this is a component.\n{}", pristine_artifact());
        let report = scorer.score(&text, true);
        assert!(report.score < 100.0);
        assert!(report.failed_checks().contains(&"no_commentary"));
    }

    #[test]
    fn test_duplicate_default_export_costs_points() {
        let scorer = QualityScorer::default();
        let text = format!("{}export default Hero;\n", pristine_artifact());
        let report = scorer.score(&text, true);
        assert!(report.failed_checks().contains(&"single_default_export"));
    }

    #[test]
    fn test_short_artifact_fails_content_check() {
        let scorer = QualityScorer::default();
        let report = scorer.score("import React from 'react';", true);
        assert!(report.failed_checks().contains(&"sufficient_content"));
    }
}
