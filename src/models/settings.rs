use camino::Utf8PathBuf;
use std::env;

/// Default study API base URL when `STUDY_API_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5001";

/// Default data directory (relative to the working directory) when
/// `STUDY_DATA_DIR` is unset.
pub const DEFAULT_DATA_DIR: &str = "Study Assistant Data";

/// Environment-supplied application settings.
///
/// There is no settings file; the original artifact's only configuration
/// surface is the API base URL, so everything is read from the environment
/// once at startup.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Base URL of the study API (no trailing slash expected).
    pub api_base_url: String,

    /// Directory holding the persisted history and preference files.
    pub data_dir: Utf8PathBuf,

    /// Debug-level logging when set.
    pub debug_mode: bool,
}

impl AppSettings {
    /// Read settings from the process environment, applying defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        let api_base_url = env::var("STUDY_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let data_dir = env::var("STUDY_DATA_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(Utf8PathBuf::from)
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));

        let debug_mode = env::var("STUDY_DEBUG")
            .map(|v| {
                let v = v.trim().to_ascii_lowercase();
                v == "1" || v == "true"
            })
            .unwrap_or(false);

        Self {
            api_base_url,
            data_dir,
            debug_mode,
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: Utf8PathBuf::from(DEFAULT_DATA_DIR),
            debug_mode: false,
        }
    }
}
