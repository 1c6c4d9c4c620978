// Smart Study Assistant - console client for the study-content API
//
// This is the library crate containing the core business logic and data
// structures. The binary crate (main.rs) provides the console entry point.

pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod ui;

// Re-export commonly used types for convenience
pub use models::{AppSettings, AppState, RequestState, SearchQuery, StudyResult};
pub use services::{HttpStudyApi, StudyApi, StudyWorkflow};
pub use state::{StateChange, StateManager};
pub use store::{HistoryEntry, PreferenceStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
