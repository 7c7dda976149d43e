//! Reputation Check
//!
//! Vote lookup, classification lookup, then policy. The first failed
//! lookup ends the check; the policy only ever sees complete data.

use std::net::IpAddr;

use super::external_intel::{
    ClassificationReport, ClassificationSource, LookupError, VoteReport, VoteSource,
};
use super::policy::{decide_with_config, PolicyConfig, PolicyResult};

/// Everything the report needs for one address
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub address: IpAddr,
    pub votes: VoteReport,
    pub classification: ClassificationReport,
    pub policy: PolicyResult,
}

pub fn run_check(
    address: IpAddr,
    votes: &dyn VoteSource,
    classifier: &dyn ClassificationSource,
    config: &PolicyConfig,
) -> Result<CheckOutcome, LookupError> {
    log::info!("Checking reputation of {}", address);

    let vote_report = votes.fetch_votes(address).map_err(log_failure)?;
    log::debug!(
        "Votes for {}: harmless={} malicious={}",
        address, vote_report.tally.harmless_votes, vote_report.tally.malicious_votes
    );

    let class_report = classifier.fetch_classification(address).map_err(log_failure)?;
    log::debug!("Classification for {}: {}", address, class_report.classification);

    let policy = decide_with_config(&vote_report.tally, class_report.classification, config);
    log::info!(
        "Verdict for {}: {} ({}, threshold {})",
        address, policy.verdict, policy.reason, policy.threshold
    );

    Ok(CheckOutcome {
        address,
        votes: vote_report,
        classification: class_report,
        policy,
    })
}

fn log_failure(err: LookupError) -> LookupError {
    log::error!("{} lookup failed, no verdict will be given", err.service());
    err
}

// ============================================================================
// TESTS
// ============================================================================
