//! Policy Engine
//!
//! Decision logic only - types live in `types`.
//! Input: VoteTally + Classification + PolicyConfig
//! Output: PolicyResult

use super::config::PolicyConfig;
use super::types::*;

// ============================================================================
// MAIN DECISION FUNCTION
// ============================================================================

/// Policy decision; `PolicyConfig::default()` gives the threshold of 10
pub fn decide_with_config(
    tally: &VoteTally,
    classification: Classification,
    config: &PolicyConfig,
) -> PolicyResult {
    let threshold = config.malicious_threshold;
    let verdict = verdict_for(tally, classification, threshold);

    let reason = match (classification, verdict) {
        (Classification::Malicious, _) => "Classified as malicious".to_string(),
        (Classification::Unknown, Verdict::Drop) => format!(
            "Unclassified, malicious votes {} > harmless votes {}",
            tally.malicious_votes, tally.harmless_votes
        ),
        (_, Verdict::Alert) => format!(
            "Classified as {}, malicious votes {} >= threshold {}",
            classification, tally.malicious_votes, threshold
        ),
        _ => format!(
            "Classified as {}, malicious votes {} below threshold {}",
            classification, tally.malicious_votes, threshold
        ),
    };

    PolicyResult { verdict, reason, threshold }
}

/// First matching rule wins. Ties under `Unknown` fall through to the threshold.
pub fn verdict_for(tally: &VoteTally, classification: Classification, threshold: u64) -> Verdict {
    let over_threshold = tally.malicious_votes >= threshold;

    match classification {
        Classification::Malicious => Verdict::Drop,
        Classification::Benign if over_threshold => Verdict::Alert,
        Classification::Benign => Verdict::Pass,
        Classification::Unknown if tally.leans_malicious() => Verdict::Drop,
        Classification::Unknown if over_threshold => Verdict::Alert,
        Classification::Unknown => Verdict::Pass,
    }
}

// ============================================================================
// TESTS
// ============================================================================
