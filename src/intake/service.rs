//! Intake service — the `handle_utterance` boundary.
//!
//! Owns the full cycle for one utterance: authentication guard, empty-input
//! guard, session-state load (with recovery from malformed state), the
//! transition itself, the client-creation commit, and the state write-back.

use std::sync::Arc;

use crate::auth::StaffAuth;
use crate::clients::ClientRepository;
use crate::config::IntakeConfig;

use super::machine::{self, IntakeEvent, Outcome};
use super::normalize::Utterance;
use super::prompts::{self, IntakeReply};
use super::session::{SessionLocks, SessionStore};
use super::state::IntakeState;

/// Coordinates the intake dialogue across stateless requests.
pub struct IntakeService {
    sessions: Arc<dyn SessionStore>,
    clients: Arc<dyn ClientRepository>,
    auth: Arc<dyn StaffAuth>,
    config: IntakeConfig,
    locks: SessionLocks,
}

impl IntakeService {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        clients: Arc<dyn ClientRepository>,
        auth: Arc<dyn StaffAuth>,
        config: IntakeConfig,
    ) -> Self {
        Self {
            sessions,
            clients,
            auth,
            config,
            locks: SessionLocks::new(),
        }
    }

    /// Process one utterance for one session.
    ///
    /// Every failure is folded into the returned reply; this never
    /// propagates an error to the HTTP layer.
    pub async fn handle_utterance(&self, session_id: &str, raw_text: &str) -> IntakeReply {
        if !self.auth.is_staff(session_id).await {
            return prompts::unauthorized();
        }

        let utterance = Utterance::parse(raw_text);
        if utterance.is_empty() {
            return prompts::empty_input();
        }

        // The load → transition → save cycle is a per-session critical
        // section; concurrent requests for one session would lose updates.
        let _guard = self.locks.acquire(session_id).await;

        let state = match self.load_state(session_id).await {
            Some(state) => state,
            None => {
                // Malformed stored state: reset and report starting over.
                self.sessions.clear(session_id).await;
                return prompts::recovered();
            }
        };

        let Outcome { state: next, event } = machine::advance(&state, &utterance, &self.config);

        match event {
            IntakeEvent::ReadyToCommit { client } => {
                let full_name = client.name.clone();
                match self.clients.create(client).await {
                    Ok(client_id) => {
                        self.save_state(session_id, &next).await;
                        prompts::completed(&full_name, client_id)
                    }
                    Err(e) => {
                        // Leave the pre-commit state untouched so the user
                        // can retry by repeating the email.
                        tracing::warn!(session_id, "Client creation failed: {e}");
                        prompts::commit_failed()
                    }
                }
            }
            event => {
                self.save_state(session_id, &next).await;
                prompts::render(&event)
            }
        }
    }

    /// Load and validate the session's state. `None` means the stored
    /// value was malformed or structurally inconsistent.
    async fn load_state(&self, session_id: &str) -> Option<IntakeState> {
        let value = match self.sessions.load(session_id).await {
            Some(value) => value,
            None => return Some(IntakeState::default()),
        };
        match serde_json::from_value::<IntakeState>(value) {
            Ok(state) if state.is_consistent() => Some(state),
            Ok(state) => {
                tracing::warn!(session_id, step = %state.step, "Inconsistent intake state");
                None
            }
            Err(e) => {
                tracing::warn!(session_id, "Malformed intake state: {e}");
                None
            }
        }
    }

    async fn save_state(&self, session_id: &str, state: &IntakeState) {
        match serde_json::to_value(state) {
            Ok(value) => self.sessions.save(session_id, value).await,
            Err(e) => tracing::warn!(session_id, "Failed to serialize intake state: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

    use async_trait::async_trait;

    use crate::clients::NewClient;
    use crate::error::DatabaseError;
    use crate::intake::session::MemorySessionStore;

    use super::*;

    /// Repository stub: counts creations, optionally fails.
    #[derive(Default)]
    struct StubRepo {
        fail: AtomicBool,
        created: AtomicI64,
        last_name: std::sync::Mutex<Option<String>>,
    }

    #[async_trait]
    impl ClientRepository for StubRepo {
        async fn create(&self, client: NewClient) -> Result<i64, DatabaseError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(DatabaseError::Query("disk full".into()));
            }
            *self.last_name.lock().unwrap() = Some(client.name);
            Ok(self.created.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    struct StubAuth {
        staff: bool,
    }

    #[async_trait]
    impl StaffAuth for StubAuth {
        async fn is_staff(&self, _session_token: &str) -> bool {
            self.staff
        }
    }

    struct Harness {
        service: IntakeService,
        sessions: Arc<MemorySessionStore>,
        repo: Arc<StubRepo>,
    }

    fn harness(staff: bool) -> Harness {
        let sessions = Arc::new(MemorySessionStore::new());
        let repo = Arc::new(StubRepo::default());
        let service = IntakeService::new(
            Arc::clone(&sessions) as Arc<dyn SessionStore>,
            Arc::clone(&repo) as Arc<dyn ClientRepository>,
            Arc::new(StubAuth { staff }),
            IntakeConfig::default(),
        );
        Harness {
            service,
            sessions,
            repo,
        }
    }

    const SESSION: &str = "sess-1";

    #[tokio::test]
    async fn full_happy_path_creates_one_client() {
        let h = harness(true);
        let utterances = [
            "Smith",
            "yes",
            "John",
            "123 Main St, Springfield, IL 62704",
            "555-123-4567",
        ];
        for text in utterances {
            let reply = h.service.handle_utterance(SESSION, text).await;
            assert!(reply.success, "failed at {text:?}: {}", reply.display_message);
            assert!(!reply.reset);
        }

        let reply = h.service.handle_utterance(SESSION, "john@example.com").await;
        assert!(reply.success);
        assert!(reply.reset);
        assert_eq!(reply.client_id, Some(1));
        assert_eq!(h.repo.created.load(Ordering::SeqCst), 1);
        assert_eq!(
            h.repo.last_name.lock().unwrap().as_deref(),
            Some("John Smith")
        );

        // The stored state is back to idle and empty.
        let stored: IntakeState =
            serde_json::from_value(h.sessions.load(SESSION).await.unwrap()).unwrap();
        assert!(stored.is_consistent());
        assert!(stored.fields.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_never_mutates_state() {
        let h = harness(false);
        let reply = h.service.handle_utterance(SESSION, "Smith").await;
        assert!(!reply.success);
        assert!(h.sessions.load(SESSION).await.is_none());
        assert_eq!(h.repo.created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_input_is_rejected_without_transition() {
        let h = harness(true);
        let reply = h.service.handle_utterance(SESSION, "   ").await;
        assert!(!reply.success);
        assert!(h.sessions.load(SESSION).await.is_none());
    }

    #[tokio::test]
    async fn cancellation_resets_mid_flow() {
        let h = harness(true);
        h.service.handle_utterance(SESSION, "Smith").await;
        h.service.handle_utterance(SESSION, "yes").await;
        let reply = h.service.handle_utterance(SESSION, "stop").await;
        assert!(reply.success);
        assert!(reply.reset);

        let stored: IntakeState =
            serde_json::from_value(h.sessions.load(SESSION).await.unwrap()).unwrap();
        assert!(stored.fields.is_empty());
    }

    #[tokio::test]
    async fn commit_failure_preserves_state_and_allows_retry() {
        let h = harness(true);
        for text in ["Smith", "yes", "John", "123 Main St", "555-123-4567"] {
            h.service.handle_utterance(SESSION, text).await;
        }

        h.repo.fail.store(true, Ordering::SeqCst);
        let reply = h.service.handle_utterance(SESSION, "john@example.com").await;
        assert!(!reply.success);
        assert!(!reply.reset);
        assert!(reply.client_id.is_none());

        // Retry with the same email once the repository recovers.
        h.repo.fail.store(false, Ordering::SeqCst);
        let reply = h.service.handle_utterance(SESSION, "john@example.com").await;
        assert!(reply.success);
        assert!(reply.reset);
        assert_eq!(reply.client_id, Some(1));
        assert_eq!(h.repo.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_state_recovers_to_idle() {
        let h = harness(true);
        h.sessions
            .save(SESSION, serde_json::json!({"step": "what", "bogus": true}))
            .await;

        let reply = h.service.handle_utterance(SESSION, "Smith").await;
        assert!(!reply.success);
        assert!(reply.reset);
        assert!(h.sessions.load(SESSION).await.is_none());

        // The next utterance starts a fresh dialogue.
        let reply = h.service.handle_utterance(SESSION, "Smith").await;
        assert!(reply.success);
        assert!(reply.display_message.contains("S-M-I-T-H"));
    }

    #[tokio::test]
    async fn inconsistent_state_recovers_to_idle() {
        let h = harness(true);
        // Step says email but nothing was ever captured.
        h.sessions
            .save(SESSION, serde_json::json!({"step": "email", "fields": {}}))
            .await;

        let reply = h.service.handle_utterance(SESSION, "john@example.com").await;
        assert!(!reply.success);
        assert!(reply.reset);
        assert_eq!(h.repo.created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sessions_do_not_share_dialogues() {
        let h = harness(true);
        h.service.handle_utterance("a", "Smith").await;
        let reply = h.service.handle_utterance("b", "Jones").await;
        // Session b is its own fresh capture, not a correction of a's.
        assert!(reply.display_message.contains("Jones"));

        let a: IntakeState = serde_json::from_value(h.sessions.load("a").await.unwrap()).unwrap();
        assert_eq!(
            a.field(crate::intake::state::IntakeField::LastName),
            Some("Smith")
        );
    }
}
