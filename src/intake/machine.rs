//! The intake transition function.
//!
//! One normalized utterance plus the current state produces the next state
//! and an explicit event describing what happened. The function is pure:
//! persistence and the client-creation side effect belong to the service.

use crate::clients::model::NewClient;
use crate::config::IntakeConfig;

use super::normalize::{Utterance, spell_out, title_case};
use super::state::{IntakeField, IntakeState, IntakeStep};

/// What a transition did, for the formatter to phrase.
#[derive(Debug, Clone)]
pub enum IntakeEvent {
    /// A cancellation keyword aborted the flow (from any step).
    Cancelled,
    /// Trigger mode: the flow started, now prompting for the last name.
    Started,
    /// Trigger mode: an idle utterance without a trigger phrase.
    NotRecognized,
    /// A last name was captured (or corrected) and awaits confirmation.
    /// `repeat` is true on a correction re-prompt.
    SpellingRequested {
        name: String,
        spelled: String,
        repeat: bool,
    },
    /// The previous step completed; now prompting for `next`.
    /// `noted` carries the just-captured value, if one was captured.
    FieldPrompt {
        noted: Option<String>,
        next: IntakeStep,
    },
    /// All five fields are collected; the caller should create the client.
    ReadyToCommit { client: NewClient },
}

/// Result of one transition.
///
/// `state` is the state to persist. For `ReadyToCommit` it is already
/// reset to idle; the caller must only persist it if the client creation
/// succeeds, so a failed commit leaves the pre-commit state in place.
#[derive(Debug)]
pub struct Outcome {
    pub state: IntakeState,
    pub event: IntakeEvent,
}

/// Apply one utterance to the dialogue.
pub fn advance(state: &IntakeState, utterance: &Utterance, config: &IntakeConfig) -> Outcome {
    // Cancellation wins over everything, including idle.
    if utterance.wants_cancel() {
        return Outcome {
            state: IntakeState::default(),
            event: IntakeEvent::Cancelled,
        };
    }

    let mut next = state.clone();
    match state.step {
        IntakeStep::Idle => {
            if config.require_trigger {
                if utterance.matches_any(&config.trigger_phrases) {
                    next.step = IntakeStep::LastName;
                    Outcome {
                        state: next,
                        event: IntakeEvent::Started,
                    }
                } else {
                    Outcome {
                        state: next,
                        event: IntakeEvent::NotRecognized,
                    }
                }
            } else {
                // Implicit start: the first utterance is the last name.
                capture_last_name(next, utterance, false)
            }
        }

        IntakeStep::LastName => capture_last_name(next, utterance, false),

        IntakeStep::ConfirmLastName => {
            if utterance.is_affirmative() {
                next.step = IntakeStep::FirstName;
                Outcome {
                    state: next,
                    event: IntakeEvent::FieldPrompt {
                        noted: None,
                        next: IntakeStep::FirstName,
                    },
                }
            } else {
                // Anything else is a corrected last name; re-confirm.
                capture_last_name(next, utterance, true)
            }
        }

        IntakeStep::FirstName => capture_field(next, IntakeField::FirstName, utterance),
        IntakeStep::Address => capture_field(next, IntakeField::Address, utterance),
        IntakeStep::Phone => capture_field(next, IntakeField::Phone, utterance),

        IntakeStep::Email => {
            let email = utterance.text.clone();
            let first = state.field(IntakeField::FirstName).unwrap_or_default();
            let last = state.field(IntakeField::LastName).unwrap_or_default();
            let client = NewClient {
                name: format!("{first} {last}"),
                address: state.field(IntakeField::Address).map(str::to_string),
                phone: state.field(IntakeField::Phone).map(str::to_string),
                email: Some(email),
                notes: None,
            };
            Outcome {
                state: IntakeState::default(),
                event: IntakeEvent::ReadyToCommit { client },
            }
        }
    }
}

fn capture_last_name(mut state: IntakeState, utterance: &Utterance, repeat: bool) -> Outcome {
    let name = title_case(&utterance.text);
    let spelled = spell_out(&name);
    state.capture(IntakeField::LastName, name.clone());
    state.step = IntakeStep::ConfirmLastName;
    Outcome {
        state,
        event: IntakeEvent::SpellingRequested {
            name,
            spelled,
            repeat,
        },
    }
}

fn capture_field(mut state: IntakeState, field: IntakeField, utterance: &Utterance) -> Outcome {
    let value = utterance.text.clone();
    state.capture(field, value.clone());
    let next_step = state.step.next().unwrap_or(IntakeStep::Idle);
    state.step = next_step;
    Outcome {
        state,
        event: IntakeEvent::FieldPrompt {
            noted: Some(value),
            next: next_step,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> IntakeConfig {
        IntakeConfig::default()
    }

    fn trigger_config() -> IntakeConfig {
        IntakeConfig {
            require_trigger: true,
            ..IntakeConfig::default()
        }
    }

    fn step(state: &IntakeState, text: &str) -> Outcome {
        advance(state, &Utterance::parse(text), &config())
    }

    #[test]
    fn idle_utterance_becomes_title_cased_last_name() {
        let out = step(&IntakeState::default(), "smith");
        assert_eq!(out.state.step, IntakeStep::ConfirmLastName);
        assert_eq!(out.state.field(IntakeField::LastName), Some("Smith"));
        match out.event {
            IntakeEvent::SpellingRequested {
                name,
                spelled,
                repeat,
            } => {
                assert_eq!(name, "Smith");
                assert_eq!(spelled, "S-M-I-T-H");
                assert!(!repeat);
            }
            other => panic!("expected SpellingRequested, got {other:?}"),
        }
    }

    #[test]
    fn affirmative_confirms_and_asks_first_name() {
        let out = step(&IntakeState::default(), "Smith");
        let out = step(&out.state, "yes");
        assert_eq!(out.state.step, IntakeStep::FirstName);
        assert!(matches!(
            out.event,
            IntakeEvent::FieldPrompt {
                noted: None,
                next: IntakeStep::FirstName
            }
        ));
    }

    #[test]
    fn correction_self_loops_with_new_spelling() {
        let out = step(&IntakeState::default(), "Smith");
        let out = step(&out.state, "Smyth");
        assert_eq!(out.state.step, IntakeStep::ConfirmLastName);
        assert_eq!(out.state.field(IntakeField::LastName), Some("Smyth"));
        match out.event {
            IntakeEvent::SpellingRequested {
                spelled, repeat, ..
            } => {
                assert_eq!(spelled, "S-M-Y-T-H");
                assert!(repeat);
            }
            other => panic!("expected SpellingRequested, got {other:?}"),
        }
    }

    #[test]
    fn repeated_correction_is_idempotent() {
        let out = step(&IntakeState::default(), "Smith");
        let out = step(&out.state, "Smyth");
        let out = step(&out.state, "Smyth");
        assert_eq!(out.state.field(IntakeField::LastName), Some("Smyth"));
        assert_eq!(out.state.fields.len(), 1);
    }

    #[test]
    fn full_happy_path_collects_everything() {
        let out = step(&IntakeState::default(), "Smith");
        let out = step(&out.state, "yes");
        let out = step(&out.state, "John");
        assert_eq!(out.state.step, IntakeStep::Address);
        let out = step(&out.state, "123 Main St, Springfield, IL 62704");
        assert_eq!(out.state.step, IntakeStep::Phone);
        let out = step(&out.state, "555-123-4567");
        assert_eq!(out.state.step, IntakeStep::Email);
        let out = step(&out.state, "john@example.com");

        match out.event {
            IntakeEvent::ReadyToCommit { client } => {
                assert_eq!(client.name, "John Smith");
                assert_eq!(
                    client.address.as_deref(),
                    Some("123 Main St, Springfield, IL 62704")
                );
                assert_eq!(client.phone.as_deref(), Some("555-123-4567"));
                assert_eq!(client.email.as_deref(), Some("john@example.com"));
            }
            other => panic!("expected ReadyToCommit, got {other:?}"),
        }
        // Commit resets the persisted state.
        assert_eq!(out.state.step, IntakeStep::Idle);
        assert!(out.state.fields.is_empty());
    }

    #[test]
    fn every_intermediate_state_is_consistent() {
        let mut out = step(&IntakeState::default(), "Smith");
        assert!(out.state.is_consistent());
        for text in ["yes", "John", "123 Main St", "555-123-4567"] {
            out = step(&out.state, text);
            assert!(out.state.is_consistent(), "after {text:?}");
        }
    }

    #[test]
    fn cancel_resets_from_any_step() {
        let mut out = step(&IntakeState::default(), "Smith");
        for text in ["yes", "John", "123 Main St"] {
            out = step(&out.state, text);
        }
        let out = step(&out.state, "never mind");
        assert!(matches!(out.event, IntakeEvent::Cancelled));
        assert_eq!(out.state.step, IntakeStep::Idle);
        assert!(out.state.fields.is_empty());
    }

    #[test]
    fn cancel_while_idle_stays_idle() {
        let out = step(&IntakeState::default(), "cancel");
        assert!(matches!(out.event, IntakeEvent::Cancelled));
        assert_eq!(out.state.step, IntakeStep::Idle);
    }

    #[test]
    fn trigger_mode_requires_a_trigger_phrase() {
        let cfg = trigger_config();
        let idle = IntakeState::default();

        let out = advance(&idle, &Utterance::parse("Smith"), &cfg);
        assert!(matches!(out.event, IntakeEvent::NotRecognized));
        assert_eq!(out.state.step, IntakeStep::Idle);

        let out = advance(&idle, &Utterance::parse("create a new client"), &cfg);
        assert!(matches!(out.event, IntakeEvent::Started));
        assert_eq!(out.state.step, IntakeStep::LastName);
        assert!(out.state.fields.is_empty());

        // The next utterance is the last name.
        let out = advance(&out.state, &Utterance::parse("smith"), &cfg);
        assert_eq!(out.state.step, IntakeStep::ConfirmLastName);
        assert_eq!(out.state.field(IntakeField::LastName), Some("Smith"));
    }
}
