//! Smart Study Assistant - console client for the study-content API
//!
//! Main entry point. Initializes:
//! - Logging infrastructure (daily file rotation + console output)
//! - Tokio async runtime (the outbound API call is the only real async work)
//! - Environment-supplied settings (API base URL, data directory)
//! - The preference/history store (loaded once, survives across sessions)
//! - The console controller (wires input to the study workflow)
//!
//! # Execution Flow
//!
//! 1. Initialize logging → logs/study-assistant.<date>
//! 2. Read settings from the environment
//! 3. Create the tokio runtime
//! 4. Open the preference store under the data directory
//! 5. Build the HTTP study API client and the workflow
//! 6. Run the console input loop (blocks until :quit or end of input)
//! 7. Shut the runtime down with a timeout

use anyhow::Result;
use std::sync::{Arc, Mutex};
use study_assistant::services::HttpStudyApi;
use study_assistant::ui::ConsoleController;
use study_assistant::{
    APP_NAME, AppSettings, PreferenceStore, StateManager, StudyWorkflow, VERSION,
};

fn main() -> Result<()> {
    let settings = AppSettings::from_env();

    let _guard = study_assistant::logging::setup_logging(
        "logs",
        "study-assistant",
        settings.debug_mode,
        false, // console stays clean for the interactive prompt
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::info!(
        api_base_url = %settings.api_base_url,
        data_dir = %settings.data_dir,
        "Settings loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("study-worker")
        .build()?;

    let store = PreferenceStore::open(&settings.data_dir)?;
    tracing::info!(entries = store.history().len(), "Preference store opened");
    let store = Arc::new(Mutex::new(store));

    let state = StateManager::new();
    let api = Arc::new(HttpStudyApi::new(settings.api_base_url.clone()));
    let workflow = StudyWorkflow::new(state.clone(), store.clone(), api);

    let mut controller = ConsoleController::new(state, store, workflow);
    let result = runtime.block_on(controller.run());

    tracing::info!("Shutting down");
    runtime.shutdown_timeout(std::time::Duration::from_secs(5));

    result
}
