//! Voice-guided client intake.
//!
//! A staff member dictates a new client profile field by field; the
//! dialogue confirms the last name letter by letter, walks through first
//! name, address, phone, and email, and creates the client record on the
//! final step. Each HTTP request carries one utterance; the session store
//! is the only memory between requests.

pub mod machine;
pub mod normalize;
pub mod prompts;
pub mod routes;
pub mod service;
pub mod session;
pub mod state;

pub use machine::{IntakeEvent, Outcome};
pub use normalize::Utterance;
pub use prompts::IntakeReply;
pub use routes::{IntakeRouteState, intake_routes};
pub use service::IntakeService;
pub use session::{MemorySessionStore, SessionStore};
pub use state::{IntakeField, IntakeState, IntakeStep};
