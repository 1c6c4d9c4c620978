// State management module
//
// This module provides the StateManager which wraps AppState with thread-safe
// access using Arc<RwLock<T>> and emits change events for UI updates.

use crate::models::{AppState, DisplayMode, RequestState, StudyResult};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when the request lifecycle moves.
///
/// These events notify interested parties (primarily the UI) about state
/// changes without requiring them to poll the state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// A submission was accepted and a request is now in flight
    RequestStarted { topic: String },

    /// The in-flight request resolved successfully
    RequestSucceeded { display: DisplayMode },

    /// The submission failed (validation, request, or transport error)
    RequestFailed { message: String },

    /// The request state was cleared back to idle
    RequestCleared,
}

/// Thread-safe state manager with event emission.
///
/// The central state component for the request workflow:
/// - Provides thread-safe access to [`AppState`] via `Arc<RwLock<T>>`
/// - Detects request-state transitions and emits [`StateChange`] events
/// - Enforces last-write-wins for superseded in-flight responses via the
///   submission sequence number
///
/// Always use `StateManager` instead of touching [`AppState`] directly:
/// [`read()`](Self::read) for reads, the submission/resolution methods for
/// mutations, [`subscribe()`](Self::subscribe) to listen for changes.
pub struct StateManager {
    /// The application state protected by RwLock for thread-safe access
    state: Arc<RwLock<AppState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with idle default state.
    pub fn new() -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            state_tx,
        }
    }

    /// Get a read-only snapshot of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.read().unwrap().clone()
    }

    /// Execute a function with read access to the state.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.state.read().unwrap();
        f(&state)
    }

    /// Subscribe to state change events.
    ///
    /// Returns a receiver that will get notified of all future state
    /// changes. Multiple subscribers can listen simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    /// Begin a submission: transition to `Loading` and return the sequence
    /// number that the eventual resolution must present.
    pub fn begin_submission(&self, topic: &str) -> u64 {
        let seq = {
            let mut state = self.state.write().unwrap();
            state.begin_submission(topic)
        };
        self.emit(StateChange::RequestStarted {
            topic: topic.to_string(),
        });
        seq
    }

    /// Reject a submission without a network call (synchronous validation).
    pub fn reject_submission(&self, message: &str) -> u64 {
        let seq = {
            let mut state = self.state.write().unwrap();
            state.reject_submission(message)
        };
        self.emit(StateChange::RequestFailed {
            message: message.to_string(),
        });
        seq
    }

    /// Resolve the submission `seq` with a successful result.
    ///
    /// Returns true when the resolution applied; false when it was stale
    /// (a newer submission superseded it) and no event was emitted.
    pub fn resolve_success(&self, seq: u64, result: StudyResult) -> bool {
        let display = result.display_mode();
        let applied = {
            let mut state = self.state.write().unwrap();
            state.resolve_success(seq, result)
        };
        if applied {
            self.emit(StateChange::RequestSucceeded { display });
        } else {
            tracing::debug!(seq, "Ignoring stale success resolution");
        }
        applied
    }

    /// Resolve the submission `seq` with an error message.
    ///
    /// Same staleness contract as [`resolve_success`](Self::resolve_success).
    pub fn resolve_error(&self, seq: u64, message: String) -> bool {
        let applied = {
            let mut state = self.state.write().unwrap();
            state.resolve_error(seq, message.clone())
        };
        if applied {
            self.emit(StateChange::RequestFailed { message });
        } else {
            tracing::debug!(seq, "Ignoring stale error resolution");
        }
        applied
    }

    /// Clear a terminal state back to `Idle`.
    pub fn clear(&self) {
        let changed = {
            let mut state = self.state.write().unwrap();
            let was_terminal = !matches!(state.request, RequestState::Idle);
            state.request = RequestState::Idle;
            state.current_topic = None;
            was_terminal
        };
        if changed {
            self.emit(StateChange::RequestCleared);
        }
    }

    fn emit(&self, change: StateChange) {
        // Ignore send errors - it's OK if no one is listening
        let _ = self.state_tx.send(change);
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Make StateManager cloneable for sharing across tasks
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}
