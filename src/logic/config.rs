//! Application Configuration
//!
//! API credentials and endpoints, read once from a JSON file at startup
//! and passed explicitly to everything that needs them.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    self, CONFIG_FILE_NAME, DEFAULT_GREYNOISE_API_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_VT_API_URL,
};
use crate::logic::policy::PolicyConfig;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Failed to load config file from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config file {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

// ============================================================================
// APP CONFIG
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub vt_api_key: String,
    #[serde(default = "default_vt_api_url")]
    pub vt_api_url: String,
    #[serde(default)]
    pub greynoise_api_key: Option<String>,
    #[serde(default = "default_greynoise_api_url")]
    pub greynoise_api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(flatten)]
    pub policy: PolicyConfig,
}

fn default_vt_api_url() -> String {
    DEFAULT_VT_API_URL.to_string()
}

fn default_greynoise_api_url() -> String {
    DEFAULT_GREYNOISE_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl AppConfig {
    /// Read, parse and validate the config file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigLoadError::Read { path: path.to_path_buf(), source })?;

        let config = Self::parse(&content, path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigLoadError> {
        let config: AppConfig = serde_json::from_str(content)
            .map_err(|source| ConfigLoadError::Parse { path: path.to_path_buf(), source })?;

        config.validate().map_err(|reason| ConfigLoadError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.vt_api_key.trim().is_empty() {
            return Err("vt_api_key is empty".to_string());
        }

        for (key, url) in [
            ("vt_api_url", &self.vt_api_url),
            ("greynoise_api_url", &self.greynoise_api_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("{} must be an http(s) URL, got '{}'", key, url));
            }
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }

        Ok(())
    }
}

// ============================================================================
// PATH RESOLUTION
// ============================================================================

/// Pick the config file: `--config`, then `MINIREP_CONFIG`, then the
/// default locations.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    resolve_config_path_from(
        explicit,
        constants::get_config_path_override(),
        default_candidates(),
    )
}

fn resolve_config_path_from(
    explicit: Option<&Path>,
    env_override: Option<String>,
    candidates: Vec<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(path) = env_override {
        return PathBuf::from(path);
    }

    // First existing candidate; report the primary one when none exist
    candidates
        .iter()
        .find(|p| p.is_file())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Beside the executable, then `<config dir>/minirep/minirep.json`
fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(dir.join(CONFIG_FILE_NAME));
    }

    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(constants::APP_NAME).join(CONFIG_FILE_NAME));
    }

    candidates
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(r#"{
            "vt_api_key": "vt-key",
            "vt_api_url": "https://vt.example/api/v3",
            "greynoise_api_key": "gn-key",
            "greynoise_api_url": "https://gn.example/v3/community",
            "malicious_threshold": 4,
            "timeout_secs": 7
        }"#);

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.vt_api_key, "vt-key");
        assert_eq!(config.vt_api_url, "https://vt.example/api/v3");
        assert_eq!(config.greynoise_api_key.as_deref(), Some("gn-key"));
        assert_eq!(config.greynoise_api_url, "https://gn.example/v3/community");
        assert_eq!(config.policy.malicious_threshold, 4);
        assert_eq!(config.timeout_secs, 7);
    }

    #[test]
    fn test_defaults_applied() {
        let file = write_config(r#"{"vt_api_key": "vt-key"}"#);

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.vt_api_url, DEFAULT_VT_API_URL);
        assert_eq!(config.greynoise_api_url, DEFAULT_GREYNOISE_API_URL);
        assert!(config.greynoise_api_key.is_none());
        assert_eq!(config.policy, PolicyConfig::default());
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("minirep.json");

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Read { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_config("vt_api_key = nope");

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn test_missing_api_key() {
        let file = write_config(r#"{"vt_api_url": "https://vt.example"}"#);

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let file = write_config(r#"{"vt_api_key": "  "}"#);

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid { .. }));
    }

    #[test]
    fn test_non_http_url_rejected() {
        let file = write_config(r#"{"vt_api_key": "k", "greynoise_api_url": "ftp://gn.example"}"#);

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("greynoise_api_url"));
    }

    #[test]
    fn test_resolve_prefers_explicit_then_env() {
        let explicit = PathBuf::from("/etc/minirep/explicit.json");
        let resolved = resolve_config_path_from(
            Some(&explicit),
            Some("/tmp/env.json".to_string()),
            vec![],
        );
        assert_eq!(resolved, explicit);

        let resolved = resolve_config_path_from(None, Some("/tmp/env.json".to_string()), vec![]);
        assert_eq!(resolved, PathBuf::from("/tmp/env.json"));
    }

    #[test]
    fn test_resolve_first_existing_candidate() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let present = dir.path().join("present.json");
        std::fs::write(&present, "{}").unwrap();

        let resolved = resolve_config_path_from(None, None, vec![missing.clone(), present.clone()]);
        assert_eq!(resolved, present);

        std::fs::remove_file(&present).unwrap();
        let resolved = resolve_config_path_from(None, None, vec![missing.clone(), present]);
        assert_eq!(resolved, missing);
    }
}
