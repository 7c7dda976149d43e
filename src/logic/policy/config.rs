//! Policy Configuration
//!
//! Read from the `malicious_threshold` key of the config file,
//! optionally overridden on the command line.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MALICIOUS_THRESHOLD;

// ============================================================================
// POLICY CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// ALERT when malicious votes reach this count (inclusive)
    pub malicious_threshold: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            malicious_threshold: DEFAULT_MALICIOUS_THRESHOLD,
        }
    }
}

impl PolicyConfig {
    pub fn with_threshold(self, malicious_threshold: u64) -> Self {
        Self { malicious_threshold }
    }
}

// ============================================================================
// TESTS
// ============================================================================
