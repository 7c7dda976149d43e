//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Values in the config file override these.

/// Default VirusTotal API base URL
pub const DEFAULT_VT_API_URL: &str = "https://www.virustotal.com/api/v3";

/// Default GreyNoise community API base URL
pub const DEFAULT_GREYNOISE_API_URL: &str = "https://api.greynoise.io/v3/community";

/// Malicious votes at or above this count raise an ALERT
pub const DEFAULT_MALICIOUS_THRESHOLD: u64 = 10;

/// Default HTTP timeout per lookup (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Config file name, looked up beside the executable and in the user config dir
pub const CONFIG_FILE_NAME: &str = "minirep.json";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "MINIREP_CONFIG";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "minirep";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get config path override from environment (empty values are ignored)
pub fn get_config_path_override() -> Option<String> {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// User-Agent sent with every lookup
pub fn user_agent() -> String {
    format!("{}/{}", APP_NAME, APP_VERSION)
}
