use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::masking::DEFAULT_COUNTRY_CODE;

// constants (used as defaults)
pub const DB_PATH: &str = "user_db.csv";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const CHANNEL_BUFFER_SIZE: usize = 32;

/// Settings shared by every command. Each flag falls back to an environment variable.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Path of the user table file
    #[arg(long, env = "USER_DB_PATH", default_value = DB_PATH, global = true)]
    pub db_path: PathBuf,

    /// Country code used when rendering masked phone numbers
    #[arg(long, env = "USER_DB_COUNTRY_CODE", default_value = DEFAULT_COUNTRY_CODE, global = true)]
    pub country_code: String,

    /// Seconds a request may take before the caller gives up
    #[arg(long, env = "USER_DB_TIMEOUT_SECS", default_value_t = REQUEST_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Capacity of the service request queue
    #[arg(long, env = "USER_DB_BUFFER_SIZE", default_value_t = CHANNEL_BUFFER_SIZE, global = true)]
    pub buffer_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_PATH),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
            buffer_size: CHANNEL_BUFFER_SIZE,
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
