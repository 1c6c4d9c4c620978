//! Data models for the Smart Study Assistant.
//!
//! This module contains the core data structures used throughout the
//! application:
//! - [`AppState`]: the request-lifecycle state container wrapped by
//!   [`StateManager`](crate::state::StateManager)
//! - [`RequestState`]: the `Idle -> Loading -> {Success | Error}` machine
//! - [`StudyResult`]: the discriminated success response (normal vs math)
//! - [`SearchQuery`] / [`QuizItem`] / [`MathQuestion`]: form input and quiz
//!   content
//! - [`AppSettings`]: environment-supplied configuration
//!
//! # Architecture Note
//!
//! Wire-facing structs derive `Deserialize` only; nothing here is written
//! back to the API. State updates go through
//! [`StateManager`](crate::state::StateManager) so change events fire.

pub mod app_state;
pub mod settings;
pub mod study;

pub use app_state::{
    AppState, EMPTY_TOPIC_MESSAGE, GENERIC_FETCH_ERROR, HISTORY_CAP, RequestState,
};
pub use settings::AppSettings;
pub use study::{
    ApiErrorBody, DisplayMode, MathMaterials, MathQuestion, QuizItem, RawStudyResponse,
    SearchQuery, StudyMaterials, StudyResult,
};
