use crate::models::study::StudyResult;

/// Maximum number of entries kept in the search history.
///
/// The history is most-recent-first; inserting an eleventh entry drops the
/// oldest. This is the only shrink mechanism - individual entries are never
/// deleted.
pub const HISTORY_CAP: usize = 10;

/// Fixed message shown when a submission is rejected before any network call.
pub const EMPTY_TOPIC_MESSAGE: &str = "Please enter a topic";

/// Fallback message when an error response carries no `error` field.
pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch study materials";

/// Lifecycle of the single outstanding study request.
///
/// Exactly one variant is active at a time:
/// `Idle -> Loading -> {Success | Error}`, and a new submission from any
/// terminal state re-enters `Loading`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(StudyResult),
    Error(String),
}

impl RequestState {
    /// True while a request is outstanding and the submit control is disabled.
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

/// Single source of truth for the request lifecycle.
///
/// `AppState` is wrapped in `Arc<RwLock<AppState>>` by
/// [`crate::state::StateManager`]; mutate it only through the manager so
/// change events fire. The history and preferences live in
/// [`crate::store::PreferenceStore`], not here - the UI reads both but
/// mutates neither directly.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Current request lifecycle state.
    pub request: RequestState,

    /// Topic of the submission that produced the current `request` value.
    pub current_topic: Option<String>,

    /// Monotonically increasing submission counter.
    ///
    /// Each submission (including rejected ones) bumps this; a resolution
    /// carrying a stale number is ignored, which gives last-write-wins
    /// semantics for superseded in-flight responses without cancellation.
    pub submission_seq: u64,
}

impl AppState {
    /// Begin a new submission: enters `Loading`, clears any prior result or
    /// error, and returns the sequence number the resolution must present.
    pub fn begin_submission(&mut self, topic: &str) -> u64 {
        self.submission_seq += 1;
        self.current_topic = Some(topic.to_string());
        self.request = RequestState::Loading;
        self.submission_seq
    }

    /// Reject a submission synchronously (no network call was made).
    pub fn reject_submission(&mut self, message: &str) -> u64 {
        self.submission_seq += 1;
        self.current_topic = None;
        self.request = RequestState::Error(message.to_string());
        self.submission_seq
    }

    /// Resolve the submission identified by `seq` with a result.
    ///
    /// Returns false (and leaves state untouched) when `seq` is stale,
    /// i.e. a newer submission has already taken over.
    pub fn resolve_success(&mut self, seq: u64, result: StudyResult) -> bool {
        if seq != self.submission_seq {
            return false;
        }
        self.request = RequestState::Success(result);
        true
    }

    /// Resolve the submission identified by `seq` with an error message.
    pub fn resolve_error(&mut self, seq: u64, message: String) -> bool {
        if seq != self.submission_seq {
            return false;
        }
        self.request = RequestState::Error(message);
        true
    }
}
