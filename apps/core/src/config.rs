//! Runtime configuration from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::chat::DEFAULT_TYPING_DELAY;
use crate::error::AppError;

const DATA_DIR_VAR: &str = "WELLNESS_DATA_DIR";
const TYPING_DELAY_VAR: &str = "WELLNESS_TYPING_DELAY_MS";
const LOG_JSON_VAR: &str = "WELLNESS_LOG_JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellnessConfig {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    pub typing_delay: Duration,
    /// Emit logs as JSON lines instead of human-readable text
    pub json_logs: bool,
}

impl Default for WellnessConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            typing_delay: DEFAULT_TYPING_DELAY,
            json_logs: false,
        }
    }
}

impl WellnessConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Reads the process environment only; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Ok(dir) = env::var(DATA_DIR_VAR) {
            if dir.trim().is_empty() {
                return Err(AppError::Config(format!("{} is empty", DATA_DIR_VAR)));
            }
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(raw) = env::var(TYPING_DELAY_VAR) {
            let ms = raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("{}='{}': {}", TYPING_DELAY_VAR, raw, e))
            })?;
            config.typing_delay = Duration::from_millis(ms);
        }

        if let Ok(raw) = env::var(LOG_JSON_VAR) {
            config.json_logs = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(AppError::Config(format!(
                        "{} must be a boolean, got '{}'",
                        LOG_JSON_VAR, raw
                    )))
                }
            };
        }

        Ok(config)
    }
}
