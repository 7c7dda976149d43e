//! External Intelligence Types

use serde::Deserialize;
use std::net::IpAddr;
use thiserror::Error;

use crate::logic::policy::{Classification, VoteTally};

// ============================================================================
// SOURCES
// ============================================================================

/// Reputation service queried by a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    VirusTotal,
    GreyNoise,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::VirusTotal => "VirusTotal",
            Service::GreyNoise => "GreyNoise",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vote-based reputation lookup
pub trait VoteSource {
    fn fetch_votes(&self, address: IpAddr) -> Result<VoteReport, LookupError>;
}

/// Classification-based reputation lookup
pub trait ClassificationSource {
    fn fetch_classification(&self, address: IpAddr) -> Result<ClassificationReport, LookupError>;
}

// ============================================================================
// REPORTS
// ============================================================================

/// Vote data for an address (VirusTotal)
#[derive(Debug, Clone, PartialEq)]
pub struct VoteReport {
    pub tally: VoteTally,
    /// Community reputation score, negative is bad
    pub reputation: i64,
    pub as_owner: Option<String>,
    pub country: Option<String>,
    /// Unix timestamp of the last engine analysis
    pub last_analysis_date: Option<i64>,
}

/// Classification data for an address (GreyNoise)
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classification: Classification,
    /// False when the service has never seen the address
    pub observed: bool,
    /// Actor or organisation behind the address
    pub name: Option<String>,
    pub last_seen: Option<chrono::NaiveDate>,
}

impl ClassificationReport {
    pub fn not_observed() -> Self {
        Self {
            classification: Classification::Unknown,
            observed: false,
            name: None,
            last_seen: None,
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// A reputation lookup that did not produce usable data.
///
/// Never downgraded to an `Unknown` classification.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Failed {service} lookup for {address}. Status code: {status}. Message: {body}")]
    Status {
        service: Service,
        address: IpAddr,
        status: u16,
        body: String,
    },

    #[error("Failed {service} lookup for {address}: {message}")]
    Network {
        service: Service,
        address: IpAddr,
        message: String,
    },

    #[error("Malformed {service} response for {address}: {message}")]
    Malformed {
        service: Service,
        address: IpAddr,
        message: String,
    },
}

impl LookupError {
    pub fn service(&self) -> Service {
        match self {
            LookupError::Status { service, .. }
            | LookupError::Network { service, .. }
            | LookupError::Malformed { service, .. } => *service,
        }
    }
}

// ============================================================================
// API RESPONSE TYPES
// ============================================================================

/// VirusTotal `/ip_addresses/{ip}` response
#[derive(Debug, Deserialize)]
pub struct VTIpResponse {
    pub data: VTIpData,
}

#[derive(Debug, Deserialize)]
pub struct VTIpData {
    pub attributes: VTIpAttributes,
}

#[derive(Debug, Deserialize)]
pub struct VTIpAttributes {
    #[serde(default)]
    pub reputation: i64,
    pub total_votes: VTTotalVotes,
    pub as_owner: Option<String>,
    pub country: Option<String>,
    pub last_analysis_date: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct VTTotalVotes {
    pub harmless: u64,
    pub malicious: u64,
}

/// GreyNoise community `/{ip}` response
#[derive(Debug, Deserialize)]
pub struct GreyNoiseApiResponse {
    pub ip: Option<String>,
    #[serde(default)]
    pub noise: bool,
    #[serde(default)]
    pub riot: bool,
    pub classification: Option<String>,
    pub name: Option<String>,
    pub last_seen: Option<String>,
    pub message: Option<String>,
}
