use crate::models::{EMPTY_TOPIC_MESSAGE, SearchQuery};
use crate::services::study_api::StudyApi;
use crate::state::StateManager;
use crate::store::PreferenceStore;
use std::sync::{Arc, Mutex};

/// Orchestrates the study request lifecycle.
///
/// Owns the request state machine exclusively (via [`StateManager`]) and
/// appends to the history store on applied successes. Every failure mode -
/// validation, request, transport, contract - is converted into the
/// `Error(message)` request state here; nothing escapes to crash the
/// process.
pub struct StudyWorkflow {
    state: StateManager,
    store: Arc<Mutex<PreferenceStore>>,
    api: Arc<dyn StudyApi>,
}

impl StudyWorkflow {
    pub fn new(
        state: StateManager,
        store: Arc<Mutex<PreferenceStore>>,
        api: Arc<dyn StudyApi>,
    ) -> Self {
        Self { state, store, api }
    }

    /// Submit a search query.
    ///
    /// An all-whitespace topic is rejected synchronously with a fixed
    /// message and no network call. Otherwise the state enters `Loading`,
    /// one request goes out, and the resolution - success or error - is
    /// applied only if no newer submission has superseded it
    /// (last-write-wins). The topic is recorded in the history exactly once
    /// per applied success, never on any error.
    pub async fn submit(&self, query: SearchQuery) {
        if query.is_empty() {
            tracing::debug!("Rejected submission with empty topic");
            self.state.reject_submission(EMPTY_TOPIC_MESSAGE);
            return;
        }

        let seq = self.state.begin_submission(&query.topic);
        tracing::info!(topic = %query.topic, math_mode = query.math_mode, seq, "Submitting study request");

        match self.api.fetch_study(&query.topic, query.math_mode).await {
            Ok(result) => {
                if self.state.resolve_success(seq, result) {
                    let mut store = self.store.lock().unwrap();
                    if let Err(e) = store.record_topic(&query.topic) {
                        // History persistence is best-effort; the result
                        // itself is already applied.
                        tracing::warn!("Failed to persist search history: {:#}", e);
                    }
                }
            }
            Err(e) => {
                self.state.resolve_error(seq, e.to_string());
            }
        }
    }
}
