//! Utterance normalization for voice-transcribed input.
//!
//! Transcribed text arrives with uneven whitespace and arbitrary casing.
//! Captured values keep the speaker's casing; keyword matching (cancel,
//! confirmation, trigger phrases) runs on a lowercased shadow copy.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Keywords that abort the intake flow from any step.
const CANCEL_WORDS: &[&str] = &["cancel", "stop", "never mind"];

/// Keywords that confirm the spelled-out last name.
const AFFIRM_WORDS: &[&str] = &["yes", "correct"];

/// One normalized unit of user input.
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Trimmed, whitespace-collapsed text in the speaker's casing.
    pub text: String,
    lowered: String,
}

impl Utterance {
    /// Normalize raw transcribed text.
    pub fn parse(raw: &str) -> Self {
        let text = WHITESPACE.replace_all(raw.trim(), " ").into_owned();
        let lowered = text.to_lowercase();
        Self { text, lowered }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the utterance contains a cancellation keyword.
    pub fn wants_cancel(&self) -> bool {
        CANCEL_WORDS.iter().any(|w| self.lowered.contains(w))
    }

    /// Whether the utterance confirms the current spelling.
    pub fn is_affirmative(&self) -> bool {
        AFFIRM_WORDS.iter().any(|w| self.lowered.contains(w))
    }

    /// Whether the utterance contains any of the given phrases
    /// (case-insensitive substring match).
    pub fn matches_any(&self, phrases: &[String]) -> bool {
        phrases
            .iter()
            .any(|p| self.lowered.contains(&p.to_lowercase()))
    }
}

/// Title-case a name: first letter of each word uppercased, rest lowered.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Letter-by-letter spelling for voice read-back: uppercase letters joined
/// with "-", spaces skipped ("Smith" → "S-M-I-T-H").
pub fn spell_out(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_uppercase().to_string())
        .collect::<Vec<_>>()
        .join("-")
}
