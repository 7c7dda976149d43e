//! Human-readable report for one check

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::logic::check::CheckOutcome;
use crate::logic::policy::{Classification, Verdict};

const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";
const RULE: &str = "----------------------------";

/// Write vote data, classification and verdict
pub fn render<W: Write>(out: &mut W, outcome: &CheckOutcome, color: bool) -> io::Result<()> {
    banner(out, "VIRUS TOTAL REPUTATION DATA", color)?;
    let votes = &outcome.votes;
    writeln!(out, "Address: {}", outcome.address)?;
    writeln!(out, "Reputation Score: {}", votes.reputation)?;
    writeln!(out, "Harmless Votes: {}", votes.tally.harmless_votes)?;
    writeln!(out, "Malicious Votes: {}", votes.tally.malicious_votes)?;
    if let Some(owner) = &votes.as_owner {
        writeln!(out, "Owner: {}", owner)?;
    }
    if let Some(country) = &votes.country {
        writeln!(out, "Country: {}", country)?;
    }
    if let Some(analysed) = votes.last_analysis_date.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)) {
        writeln!(out, "Last Analysis: {}", analysed.format("%Y-%m-%d %H:%M UTC"))?;
    }

    banner(out, "GREYNOISE CLASSIFICATION", color)?;
    let class = &outcome.classification;
    writeln!(out, "{}", classification_line(class.classification))?;
    if !class.observed {
        writeln!(out, "Not observed scanning the internet")?;
    }
    if let Some(name) = &class.name {
        writeln!(out, "Name: {}", name)?;
    }
    if let Some(last_seen) = class.last_seen {
        writeln!(out, "Last Seen: {}", last_seen)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", verdict_line(outcome.policy.verdict))?;
    Ok(())
}

fn banner<W: Write>(out: &mut W, title: &str, color: bool) -> io::Result<()> {
    let text = format!("\n{}\n{}\n{}", RULE, title, RULE);
    if color {
        writeln!(out, "{}{}{}", GREEN, text, RESET)
    } else {
        writeln!(out, "{}", text)
    }
}

pub fn classification_line(classification: Classification) -> &'static str {
    match classification {
        Classification::Malicious => "This is known to be a malicious IP address",
        Classification::Benign => "This IP address might be harmless",
        Classification::Unknown => {
            "This IP address does not have a known classification in the GreyNoise database"
        }
    }
}

pub fn verdict_line(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Drop => "DROP",
        Verdict::Alert => "ALERT, this IP address has a concerning number of malicious votes",
        Verdict::Pass => "PASS",
    }
}
