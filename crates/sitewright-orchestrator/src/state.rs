//! Pure state machine for the per-component retry loop
//!
//! This module implements a pure functional state machine with NO I/O.
//! All state transitions are deterministic and testable.
//!
//! Key design principles:
//! - Pure function: transition(state, event, policy) -> (state, actions)
//! - No async, no I/O, no dependencies on other sitewright crates
//! - Invalid transitions exhaust the component (never panic)
//! - The controller performs stage work between events and executes actions

/// Bounded retry policy for one component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Attempts allowed before best-effort acceptance or exhaustion
    pub max_attempts: u32,
    /// Rubric score required for early acceptance
    pub target_score: f32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            target_score: 100.0,
        }
    }
}

/// Retry loop state
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    /// Waiting on the generation service
    Generating { attempt: u32 },
    /// Stripping commentary and fences from raw output
    Filtering { attempt: u32 },
    /// Computing the structural completeness verdict
    Validating { attempt: u32 },
    /// Applying the repair rule table
    Repairing { attempt: u32 },
    /// Computing the rubric score over the repaired text
    Scoring { attempt: u32 },
    /// Terminal: artifact accepted and persisted
    Accepted {
        attempt: u32,
        score: f32,
        /// True when acceptance came from the final-attempt policy rather
        /// than reaching the target score
        best_effort: bool,
    },
    /// Terminal: every attempt failed to produce output; nothing persisted
    Exhausted { attempts: u32 },
}

impl State {
    fn attempt(&self) -> u32 {
        match self {
            State::Generating { attempt }
            | State::Filtering { attempt }
            | State::Validating { attempt }
            | State::Repairing { attempt }
            | State::Scoring { attempt }
            | State::Accepted { attempt, .. } => *attempt,
            State::Exhausted { attempts } => *attempts,
        }
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The generation service returned complete, non-empty output
    OutputReceived,
    /// The generation call errored or returned empty output
    GenerationFailed { reason: String },
    /// The commentary filter finished (best effort, never fails)
    TextFiltered,
    /// The structural validator produced its verdict
    StructureChecked { is_complete: bool },
    /// The repair engine finished its pass
    RepairsApplied,
    /// The quality scorer produced the rubric score
    ScoreComputed { score: f32 },
}

/// Actions to execute as side effects of transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Log activity
    LogActivity { message: String },
    /// Persist the current artifact to the store
    PersistArtifact,
    /// Discard the current artifact, carrying it as prior context for the
    /// next generation attempt
    DiscardArtifact,
}

/// Pure state transition function
///
/// Takes current state, event and policy; returns new state and actions to
/// execute. Completely deterministic, no side effects, never panics.
///
/// # Invalid Transitions
/// Any invalid (state, event) pair exhausts the component with a descriptive
/// log action. The controller only produces valid sequences, so this is a
/// defect signal, not a recovery path.
pub fn transition(state: State, event: Event, policy: &RetryPolicy) -> (State, Vec<Action>) {
    match (state, event) {
        (State::Generating { attempt }, Event::OutputReceived) => {
            (State::Filtering { attempt }, vec![])
        }

        (State::Generating { attempt }, Event::GenerationFailed { reason }) => {
            if attempt < policy.max_attempts {
                let actions = vec![Action::LogActivity {
                    message: format!(
                        "Generation attempt {} failed ({}), retrying",
                        attempt, reason
                    ),
                }];
                (
                    State::Generating {
                        attempt: attempt + 1,
                    },
                    actions,
                )
            } else {
                let actions = vec![Action::LogActivity {
                    message: format!(
                        "Generation attempt {} failed ({}), attempts exhausted",
                        attempt, reason
                    ),
                }];
                (State::Exhausted { attempts: attempt }, actions)
            }
        }

        (State::Filtering { attempt }, Event::TextFiltered) => {
            (State::Validating { attempt }, vec![])
        }

        (State::Validating { attempt }, Event::StructureChecked { is_complete }) => {
            let actions = if is_complete {
                vec![]
            } else {
                vec![Action::LogActivity {
                    message: format!("Attempt {} structurally incomplete", attempt),
                }]
            };
            (State::Repairing { attempt }, actions)
        }

        (State::Repairing { attempt }, Event::RepairsApplied) => {
            (State::Scoring { attempt }, vec![])
        }

        (State::Scoring { attempt }, Event::ScoreComputed { score }) => {
            if score >= policy.target_score {
                let actions = vec![
                    Action::LogActivity {
                        message: format!("Attempt {} accepted with score {:.0}", attempt, score),
                    },
                    Action::PersistArtifact,
                ];
                (
                    State::Accepted {
                        attempt,
                        score,
                        best_effort: false,
                    },
                    actions,
                )
            } else if attempt < policy.max_attempts {
                let actions = vec![
                    Action::LogActivity {
                        message: format!(
                            "Attempt {} scored {:.0} (target {:.0}), retrying",
                            attempt, score, policy.target_score
                        ),
                    },
                    Action::DiscardArtifact,
                ];
                (
                    State::Generating {
                        attempt: attempt + 1,
                    },
                    actions,
                )
            } else {
                // Final attempt: accept best effort, availability over quality
                let actions = vec![
                    Action::LogActivity {
                        message: format!(
                            "Final attempt scored {:.0}, accepting best effort",
                            score
                        ),
                    },
                    Action::PersistArtifact,
                ];
                (
                    State::Accepted {
                        attempt,
                        score,
                        best_effort: true,
                    },
                    actions,
                )
            }
        }

        // All other (state, event) pairs are invalid
        (state, event) => {
            let attempts = state.attempt();
            let actions = vec![Action::LogActivity {
                message: format!(
                    "Invalid state transition: {:?} cannot handle event {:?}",
                    state, event
                ),
            }];
            (State::Exhausted { attempts }, actions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy::default()
    }

    #[test]
    fn test_happy_path_accepts_on_first_attempt() {
        let p = policy();

        let (state, actions) = transition(
            State::Generating { attempt: 1 },
            Event::OutputReceived,
            &p,
        );
        assert_eq!(state, State::Filtering { attempt: 1 });
        assert!(actions.is_empty());

        let (state, _) = transition(state, Event::TextFiltered, &p);
        assert_eq!(state, State::Validating { attempt: 1 });

        let (state, _) = transition(state, Event::StructureChecked { is_complete: true }, &p);
        assert_eq!(state, State::Repairing { attempt: 1 });

        let (state, _) = transition(state, Event::RepairsApplied, &p);
        assert_eq!(state, State::Scoring { attempt: 1 });

        let (state, actions) = transition(state, Event::ScoreComputed { score: 100.0 }, &p);
        assert_eq!(
            state,
            State::Accepted {
                attempt: 1,
                score: 100.0,
                best_effort: false
            }
        );
        assert!(actions.contains(&Action::PersistArtifact));
    }

    #[test]
    fn test_low_score_retries_and_discards() {
        let p = policy();

        let (state, actions) = transition(
            State::Scoring { attempt: 1 },
            Event::ScoreComputed { score: 80.0 },
            &p,
        );
        assert_eq!(state, State::Generating { attempt: 2 });
        assert!(actions.contains(&Action::DiscardArtifact));
        assert!(!actions.contains(&Action::PersistArtifact));
    }

    #[test]
    fn test_final_attempt_accepts_best_effort() {
        let p = policy();

        let (state, actions) = transition(
            State::Scoring { attempt: 3 },
            Event::ScoreComputed { score: 60.0 },
            &p,
        );
        assert_eq!(
            state,
            State::Accepted {
                attempt: 3,
                score: 60.0,
                best_effort: true
            }
        );
        assert!(actions.contains(&Action::PersistArtifact));
    }

    #[test]
    fn test_generation_failure_retries_then_exhausts() {
        let p = policy();

        let (state, _) = transition(
            State::Generating { attempt: 1 },
            Event::GenerationFailed {
                reason: "timeout".to_string(),
            },
            &p,
        );
        assert_eq!(state, State::Generating { attempt: 2 });

        let (state, _) = transition(
            State::Generating { attempt: 2 },
            Event::GenerationFailed {
                reason: "timeout".to_string(),
            },
            &p,
        );
        assert_eq!(state, State::Generating { attempt: 3 });

        let (state, actions) = transition(
            State::Generating { attempt: 3 },
            Event::GenerationFailed {
                reason: "timeout".to_string(),
            },
            &p,
        );
        assert_eq!(state, State::Exhausted { attempts: 3 });
        assert!(!actions.contains(&Action::PersistArtifact));
    }

    #[test]
    fn test_incomplete_verdict_still_proceeds_to_repair() {
        let p = policy();
        let (state, actions) = transition(
            State::Validating { attempt: 2 },
            Event::StructureChecked { is_complete: false },
            &p,
        );
        assert_eq!(state, State::Repairing { attempt: 2 });
        assert!(matches!(actions[0], Action::LogActivity { .. }));
    }

    #[test]
    fn test_custom_policy_changes_acceptance() {
        let p = RetryPolicy {
            max_attempts: 2,
            target_score: 90.0,
        };

        let (state, _) = transition(
            State::Scoring { attempt: 1 },
            Event::ScoreComputed { score: 92.0 },
            &p,
        );
        assert!(matches!(
            state,
            State::Accepted {
                best_effort: false,
                ..
            }
        ));

        let (state, _) = transition(
            State::Scoring { attempt: 2 },
            Event::ScoreComputed { score: 50.0 },
            &p,
        );
        assert!(matches!(state, State::Accepted { best_effort: true, .. }));
    }

    #[test]
    fn test_invalid_transition_never_panics() {
        let p = policy();

        let (state, _) = transition(
            State::Filtering { attempt: 1 },
            Event::ScoreComputed { score: 100.0 },
            &p,
        );
        assert!(matches!(state, State::Exhausted { .. }));

        let (state, _) = transition(
            State::Accepted {
                attempt: 1,
                score: 100.0,
                best_effort: false,
            },
            Event::OutputReceived,
            &p,
        );
        assert!(matches!(state, State::Exhausted { .. }));

        let (state, _) = transition(
            State::Exhausted { attempts: 3 },
            Event::TextFiltered,
            &p,
        );
        assert!(matches!(state, State::Exhausted { .. }));
    }
}
