use std::path::PathBuf;

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalog site origin, e.g. `https://spareto.com`.
    pub base_url: String,
    /// Per-request timeout; clamped to the 15–25 second window the catalog
    /// tolerates.
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    /// Directory holding the worksheet CSV files.
    pub data_dir: PathBuf,
    /// Optional YAML brand table; built-in defaults apply when unset.
    pub brands_path: Option<PathBuf>,
}
