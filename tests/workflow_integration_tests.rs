//! Integration tests for the study request workflow
//!
//! These tests drive the workflow end to end against hand-rolled StudyApi
//! stubs: a counting stub for call-accounting properties, a failing stub for
//! the error paths, and a gated stub that holds its first response open to
//! exercise last-write-wins supersession.

use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use study_assistant::models::{
    EMPTY_TOPIC_MESSAGE, RequestState, SearchQuery, StudyMaterials, StudyResult,
};
use study_assistant::services::{ApiError, StudyApi};
use study_assistant::{PreferenceStore, StateManager, StudyWorkflow};
use tempfile::TempDir;
use tokio::sync::Notify;

fn result_for(topic: &str) -> StudyResult {
    StudyResult::Normal(StudyMaterials {
        summary: vec![format!("{} is a topic", topic)],
        quiz: vec![],
        study_tip: format!("study {}", topic),
        source: Some("Wikipedia + Gemini AI".to_string()),
    })
}

/// Stub that counts calls and succeeds with a canned result.
#[derive(Default)]
struct CountingApi {
    calls: AtomicUsize,
}

#[async_trait]
impl StudyApi for CountingApi {
    async fn fetch_study(&self, topic: &str, _math_mode: bool) -> Result<StudyResult, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(result_for(topic))
    }
}

/// Stub that always fails with a structured request error.
struct FailingApi;

#[async_trait]
impl StudyApi for FailingApi {
    async fn fetch_study(&self, _topic: &str, _math_mode: bool) -> Result<StudyResult, ApiError> {
        Err(ApiError::Request(
            "Wikipedia page not found\n\nTry a more general topic".to_string(),
        ))
    }
}

/// Stub whose first call blocks until released; later calls return at once.
struct GatedApi {
    first_started: Notify,
    first_release: Notify,
    calls: AtomicUsize,
}

impl GatedApi {
    fn new() -> Self {
        Self {
            first_started: Notify::new(),
            first_release: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StudyApi for GatedApi {
    async fn fetch_study(&self, topic: &str, _math_mode: bool) -> Result<StudyResult, ApiError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.first_started.notify_one();
            self.first_release.notified().await;
        }
        Ok(result_for(topic))
    }
}

struct Harness {
    state: StateManager,
    store: Arc<Mutex<PreferenceStore>>,
    workflow: Arc<StudyWorkflow>,
    _temp_dir: TempDir,
}

fn harness(api: Arc<dyn StudyApi>) -> Harness {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let store = Arc::new(Mutex::new(PreferenceStore::open(&data_dir).unwrap()));
    let state = StateManager::new();
    let workflow = Arc::new(StudyWorkflow::new(state.clone(), store.clone(), api));
    Harness {
        state,
        store,
        workflow,
        _temp_dir: temp_dir,
    }
}

#[tokio::test]
async fn test_successful_submission_end_to_end() {
    let api = Arc::new(CountingApi::default());
    let h = harness(api.clone());

    h.workflow
        .submit(SearchQuery::new("Photosynthesis", false))
        .await;

    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    assert!(matches!(
        h.state.snapshot().request,
        RequestState::Success(_)
    ));

    let store = h.store.lock().unwrap();
    assert_eq!(store.history().len(), 1);
    assert_eq!(store.history()[0].topic, "Photosynthesis");
}

#[tokio::test]
async fn test_validation_error_issues_no_call_and_records_nothing() {
    let api = Arc::new(CountingApi::default());
    let h = harness(api.clone());

    h.workflow.submit(SearchQuery::new("   ", true)).await;

    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        h.state.snapshot().request,
        RequestState::Error(EMPTY_TOPIC_MESSAGE.to_string())
    );
    assert!(h.store.lock().unwrap().history().is_empty());
}

#[tokio::test]
async fn test_request_error_message_reaches_state_verbatim() {
    let h = harness(Arc::new(FailingApi));

    h.workflow.submit(SearchQuery::new("Qwzx", false)).await;

    assert_eq!(
        h.state.snapshot().request,
        RequestState::Error("Wikipedia page not found\n\nTry a more general topic".to_string())
    );
    assert!(h.store.lock().unwrap().history().is_empty());
}

#[tokio::test]
async fn test_record_topic_called_once_per_success() {
    let api = Arc::new(CountingApi::default());
    let h = harness(api.clone());

    for topic in ["Algebra", "Calculus", "Entropy"] {
        h.workflow.submit(SearchQuery::new(topic, false)).await;
    }

    assert_eq!(api.calls.load(Ordering::SeqCst), 3);
    let store = h.store.lock().unwrap();
    assert_eq!(store.history().len(), 3);
    let topics: Vec<&str> = store.history().iter().map(|e| e.topic.as_str()).collect();
    assert_eq!(topics, vec!["Entropy", "Calculus", "Algebra"]);
}

#[tokio::test]
async fn test_superseded_response_does_not_overwrite_newer_result() {
    let api = Arc::new(GatedApi::new());
    let h = harness(api.clone());

    // First submission parks inside the stub
    let first = {
        let workflow = h.workflow.clone();
        tokio::spawn(async move {
            workflow.submit(SearchQuery::new("first", false)).await;
        })
    };
    api.first_started.notified().await;

    // Second submission supersedes it and completes immediately
    h.workflow.submit(SearchQuery::new("second", false)).await;
    let RequestState::Success(result) = h.state.snapshot().request else {
        panic!("expected success from the second submission");
    };

    // Release the stale response; it must not update state or history
    api.first_release.notify_one();
    first.await.unwrap();

    assert_eq!(h.state.snapshot().request, RequestState::Success(result));
    let store = h.store.lock().unwrap();
    let topics: Vec<&str> = store.history().iter().map(|e| e.topic.as_str()).collect();
    assert_eq!(topics, vec!["second"], "stale success must not be recorded");
}
