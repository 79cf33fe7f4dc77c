//! Prompt/response phrasing for the intake dialogue.
//!
//! Each transition produces a `display_message` for the UI log and a
//! terser `spoken_message` for audio playback. Both always name the same
//! next required action.

use serde::Serialize;

use super::machine::IntakeEvent;
use super::state::IntakeStep;

/// Result of one utterance, returned to the HTTP caller.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReply {
    pub success: bool,
    pub display_message: String,
    pub spoken_message: String,
    /// True when the dialogue returned to idle (cancellation or commit).
    pub reset: bool,
    /// Set only on successful completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
}

impl IntakeReply {
    fn ok(display: impl Into<String>, spoken: impl Into<String>) -> Self {
        Self {
            success: true,
            display_message: display.into(),
            spoken_message: spoken.into(),
            reset: false,
            client_id: None,
        }
    }

    fn failure(display: impl Into<String>, spoken: impl Into<String>) -> Self {
        Self {
            success: false,
            display_message: display.into(),
            spoken_message: spoken.into(),
            reset: false,
            client_id: None,
        }
    }
}

/// The question asked at each capturing step.
pub fn prompt_for(step: IntakeStep) -> &'static str {
    match step {
        IntakeStep::Idle => "What would you like to do?",
        IntakeStep::LastName | IntakeStep::ConfirmLastName => "Last name?",
        IntakeStep::FirstName => "First name?",
        IntakeStep::Address => "Address, including street, city, state, and zip?",
        IntakeStep::Phone => "Phone number?",
        IntakeStep::Email => "Email address?",
    }
}

/// Phrase a machine event (everything except the commit, which the
/// service phrases once the repository call has settled).
pub fn render(event: &IntakeEvent) -> IntakeReply {
    match event {
        IntakeEvent::Cancelled => IntakeReply {
            reset: true,
            ..IntakeReply::ok(
                "Client creation cancelled. What else can I help with?",
                "Cancelled. What else can I help with?",
            )
        },

        IntakeEvent::Started => IntakeReply::ok(
            format!("Starting a new client profile. {}", prompt_for(IntakeStep::LastName)),
            format!(
                "Absolutely, let's start a new client profile. {}",
                prompt_for(IntakeStep::LastName)
            ),
        ),

        IntakeEvent::NotRecognized => IntakeReply::failure(
            "Try: 'create new client profile' to start.",
            "Say 'create new client profile' to start.",
        ),

        IntakeEvent::SpellingRequested {
            name,
            spelled,
            repeat: false,
        } => IntakeReply::ok(
            format!(
                "You said {name}. Confirm spelling: {spelled}. Is that correct? Say 'yes' or correct it."
            ),
            format!("You said {name}, spelled {spelled}. Is that correct?"),
        ),

        IntakeEvent::SpellingRequested {
            name,
            spelled,
            repeat: true,
        } => IntakeReply::ok(
            format!("Got it, {name}. Spelling: {spelled}. Correct now?"),
            format!("Got it. Confirm spelling: {spelled}. Is that correct?"),
        ),

        IntakeEvent::FieldPrompt { noted: None, next } => IntakeReply::ok(
            format!("Great! Now, {}", prompt_for(*next)),
            format!("Perfect. {}", prompt_for(*next)),
        ),

        IntakeEvent::FieldPrompt {
            noted: Some(value),
            next,
        } => IntakeReply::ok(
            format!("Noted: {value}. Now, {}", prompt_for(*next)),
            prompt_for(*next),
        ),

        // The service intercepts this before rendering.
        IntakeEvent::ReadyToCommit { .. } => IntakeReply::ok("", ""),
    }
}

/// Successful completion: the client record exists.
pub fn completed(full_name: &str, client_id: i64) -> IntakeReply {
    IntakeReply {
        reset: true,
        client_id: Some(client_id),
        ..IntakeReply::ok(
            format!(
                "Client profile created for {full_name}. ID: {client_id}. Ready for an estimate?"
            ),
            format!("Client profile created for {full_name}. What would you like to do next?"),
        )
    }
}

/// Client creation failed; the collected fields are still in place.
pub fn commit_failed() -> IntakeReply {
    IntakeReply::failure(
        "Error creating the client record. Say the email address again to retry.",
        "Something went wrong saving the profile. Say the email address again to retry.",
    )
}

/// Caller is not an authenticated staff session.
pub fn unauthorized() -> IntakeReply {
    IntakeReply::failure("Login required.", "Please log in first.")
}

/// Empty or whitespace-only utterance.
pub fn empty_input() -> IntakeReply {
    IntakeReply::failure("No input received.", "I didn't catch that. Please repeat.")
}

/// Stored state was malformed; the dialogue restarted from idle.
pub fn recovered() -> IntakeReply {
    IntakeReply {
        reset: true,
        ..IntakeReply::failure(
            "Something went wrong with the current profile. Let's start over.",
            "Sorry, let's start that profile over.",
        )
    }
}
