//! Intake dialogue state — tracks which step the conversation is at and
//! which fields have been captured so far.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The steps of the client-intake conversation.
///
/// Progresses linearly: Idle → (LastName →) ConfirmLastName → FirstName →
/// Address → Phone → Email → back to Idle on commit. `LastName` only
/// occurs in trigger mode, where the starting utterance is a trigger
/// phrase rather than the last name itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStep {
    Idle,
    LastName,
    ConfirmLastName,
    FirstName,
    Address,
    Phone,
    Email,
}

impl IntakeStep {
    /// The step that follows this one in the linear progression, if any.
    /// `Email` wraps to `Idle` via the commit, not via `next()`.
    pub fn next(&self) -> Option<IntakeStep> {
        use IntakeStep::*;
        match self {
            Idle => Some(ConfirmLastName),
            LastName => Some(ConfirmLastName),
            ConfirmLastName => Some(FirstName),
            FirstName => Some(Address),
            Address => Some(Phone),
            Phone => Some(Email),
            Email => None,
        }
    }

    /// The field this step captures, if any. `ConfirmLastName` re-captures
    /// `LastName` on correction.
    pub fn captures(&self) -> Option<IntakeField> {
        use IntakeStep::*;
        match self {
            Idle | LastName => None,
            ConfirmLastName => Some(IntakeField::LastName),
            FirstName => Some(IntakeField::FirstName),
            Address => Some(IntakeField::Address),
            Phone => Some(IntakeField::Phone),
            Email => Some(IntakeField::Email),
        }
    }
}

impl Default for IntakeStep {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for IntakeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::LastName => "last_name",
            Self::ConfirmLastName => "confirm_last_name",
            Self::FirstName => "first_name",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Email => "email",
        };
        write!(f, "{s}")
    }
}

/// A field captured during intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeField {
    LastName,
    FirstName,
    Address,
    Phone,
    Email,
}

/// One in-progress (or idle) intake dialogue for a single session.
///
/// Serialized as JSON into the session store between requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeState {
    /// Current step.
    pub step: IntakeStep,
    /// Fields captured so far.
    pub fields: HashMap<IntakeField, String>,
}

impl IntakeState {
    /// Get a captured field value.
    pub fn field(&self, field: IntakeField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Store a captured field value, replacing any previous capture.
    pub fn capture(&mut self, field: IntakeField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    /// Reset to idle with no captured fields.
    pub fn reset(&mut self) {
        self.step = IntakeStep::Idle;
        self.fields.clear();
    }

    /// The fields that must already be captured at this step.
    fn expected_fields(&self) -> &'static [IntakeField] {
        use IntakeField::*;
        match self.step {
            IntakeStep::Idle | IntakeStep::LastName => &[],
            IntakeStep::ConfirmLastName => &[LastName],
            IntakeStep::FirstName => &[LastName],
            IntakeStep::Address => &[LastName, FirstName],
            IntakeStep::Phone => &[LastName, FirstName, Address],
            IntakeStep::Email => &[LastName, FirstName, Address, Phone],
        }
    }

    /// Check the structural invariant: `Idle` (and the pre-capture
    /// `LastName` step) hold no fields, and every later step holds exactly
    /// the fields captured on the way to it.
    pub fn is_consistent(&self) -> bool {
        let expected = self.expected_fields();
        self.fields.len() == expected.len()
            && expected.iter().all(|f| self.fields.contains_key(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_the_happy_path() {
        use IntakeStep::*;
        let expected = [ConfirmLastName, FirstName, Address, Phone, Email];
        let mut current = Idle;
        for expected_next in expected {
            let next = current.next().unwrap();
            assert_eq!(next, expected_next);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn trigger_step_joins_at_confirm() {
        assert_eq!(
            IntakeStep::LastName.next(),
            Some(IntakeStep::ConfirmLastName)
        );
    }

    #[test]
    fn default_state_is_idle_and_empty() {
        let state = IntakeState::default();
        assert_eq!(state.step, IntakeStep::Idle);
        assert!(state.fields.is_empty());
        assert!(state.is_consistent());
    }

    #[test]
    fn consistency_tracks_captured_fields() {
        let mut state = IntakeState::default();
        state.step = IntakeStep::ConfirmLastName;
        assert!(!state.is_consistent(), "confirm step requires a last name");

        state.capture(IntakeField::LastName, "Smith");
        assert!(state.is_consistent());

        // A field from a future step breaks the invariant.
        state.capture(IntakeField::Phone, "555-0000");
        assert!(!state.is_consistent());
    }

    #[test]
    fn idle_with_fields_is_inconsistent() {
        let mut state = IntakeState::default();
        state.capture(IntakeField::LastName, "Smith");
        assert!(!state.is_consistent());
        state.reset();
        assert!(state.is_consistent());
    }

    #[test]
    fn capture_replaces_previous_value() {
        let mut state = IntakeState::default();
        state.capture(IntakeField::LastName, "Smith");
        state.capture(IntakeField::LastName, "Smyth");
        assert_eq!(state.field(IntakeField::LastName), Some("Smyth"));
        assert_eq!(state.fields.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let mut state = IntakeState::default();
        state.step = IntakeStep::Phone;
        state.capture(IntakeField::LastName, "Smith");
        state.capture(IntakeField::FirstName, "John");
        state.capture(IntakeField::Address, "123 Main St");

        let json = serde_json::to_string(&state).unwrap();
        let parsed: IntakeState = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.step, IntakeStep::Phone);
        assert_eq!(parsed.field(IntakeField::FirstName), Some("John"));
        assert!(parsed.is_consistent());
    }
}
