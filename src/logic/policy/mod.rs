//! Policy Module
//!
//! Turns a vote tally and a classification into a DROP / ALERT / PASS verdict.
//!
//! ## Structure
//! - `types`: VoteTally, Classification, Verdict, PolicyResult
//! - `config`: Policy configuration (malicious-vote threshold)
//! - `engine`: Decision logic
//!
//! ## Usage
//! ```ignore
//! use crate::logic::policy::{decide_with_config, PolicyConfig};
//!
//! let result = decide_with_config(&tally, classification, &PolicyConfig::default());
//! match result.verdict {
//!     Verdict::Drop => ...,
//!     Verdict::Alert => ...,
//!     Verdict::Pass => ...,
//! }
//! ```

pub mod types;
pub mod config;
pub mod engine;

pub use types::{
    Classification,
    PolicyResult,
    Verdict,
    VoteTally,
};

pub use config::PolicyConfig;

pub use engine::decide_with_config;
