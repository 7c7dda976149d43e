//! Policy Types
//!
//! Inputs and outputs of the reputation decision.
//! No logic here - data structures only.

use serde::{Deserialize, Serialize};

// ============================================================================
// INPUTS
// ============================================================================

/// Community vote counts for an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub harmless_votes: u64,
    pub malicious_votes: u64,
}

impl VoteTally {
    pub fn new(harmless_votes: u64, malicious_votes: u64) -> Self {
        Self { harmless_votes, malicious_votes }
    }

    /// Strictly more malicious than harmless votes
    pub fn leans_malicious(&self) -> bool {
        self.malicious_votes > self.harmless_votes
    }
}

/// Categorical classification of an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Malicious,
    Benign,
    Unknown,
}

impl Classification {
    /// Parse a service label. Unrecognized labels return `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "malicious" => Some(Classification::Malicious),
            "benign" => Some(Classification::Benign),
            "unknown" => Some(Classification::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Malicious => "malicious",
            Classification::Benign => "benign",
            Classification::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// VERDICT
// ============================================================================

/// Advisory action for traffic to/from the address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Drop,
    Alert,
    Pass,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Drop => "DROP",
            Verdict::Alert => "ALERT",
            Verdict::Pass => "PASS",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// POLICY RESULT
// ============================================================================

/// Verdict plus the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyResult {
    pub verdict: Verdict,
    pub reason: String,
    pub threshold: u64,
}
