//! Services module - business logic for the study request workflow.
//!
//! The services are **framework-agnostic** and have no dependencies on the
//! UI layer, making them testable and reusable.
//!
//! # Components
//!
//! - [`StudyApi`] / [`HttpStudyApi`]: the seam to the external study API and
//!   its reqwest implementation. Handles:
//!   - the single GET to `/study` with `topic` and `mode` parameters
//!   - building user-facing messages from structured error bodies
//!   - validating the `mode` discriminant and per-variant field contract
//!
//! - [`StudyWorkflow`]: the submission state machine. Validation errors stop
//!   before the network; request, transport, and contract errors all land in
//!   the `Error(message)` request state; applied successes append to the
//!   history store exactly once.
//!
//! # Design Philosophy
//!
//! - **Async**: the only suspension points are the HTTP send and body decode
//! - **Testable**: the workflow takes the API as a trait object; unit tests
//!   run against a mock, integration tests against hand-rolled stubs
//! - **Non-fatal**: no error escapes the workflow boundary

pub mod study_api;
pub mod workflow;

pub use study_api::{ApiError, HttpStudyApi, StudyApi, parse_study_response, request_error_message};
pub use workflow::StudyWorkflow;
