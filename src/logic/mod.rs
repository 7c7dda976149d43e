//! Logic Module - Configuration, Lookups & Decision
//!
//! - `config` - Config file loading and path resolution
//! - `external_intel/` - VirusTotal and GreyNoise lookups
//! - `policy/` - DROP / ALERT / PASS decision
//! - `check` - Runs one address through lookups and policy

pub mod config;
pub mod external_intel;
pub mod policy;
pub mod check;
