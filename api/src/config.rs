use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Deadline applied to every aggregation and export call when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Directory exported report files are written to
    pub reports_dir: PathBuf,
    /// Public URL prefix under which `reports_dir` is served
    pub reports_base_url: String,
    /// Upper bound for a single aggregation or export call
    pub analytics_timeout: Duration,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            reports_dir: env::var("REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("reports")),
            reports_base_url: env::var("REPORTS_BASE_URL")
                .unwrap_or_else(|_| "/reports/files".to_string()),
            analytics_timeout: Duration::from_secs(
                env::var("ANALYTICS_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}
