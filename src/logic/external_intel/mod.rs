//! External Intelligence Module - IP Reputation Lookups
//!
//! # Components
//! - `virustotal.rs`: VirusTotal IP report (community votes)
//! - `greynoise.rs`: GreyNoise community classification
//! - `types.rs`: Lookup traits, reports, errors, API payloads

use std::time::Duration;

pub mod virustotal;
pub mod greynoise;
pub mod types;


pub use types::{
    ClassificationReport, ClassificationSource,
    LookupError, Service,
    VoteReport, VoteSource,
};

pub use virustotal::VTClient;
pub use greynoise::GreyNoiseClient;

/// Shared blocking HTTP agent for both lookups
pub fn build_agent(timeout_secs: u64) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(&crate::constants::user_agent())
        .build()
}
