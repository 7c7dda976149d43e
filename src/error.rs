//! Error handling

use thiserror::Error;

use crate::logic::config::ConfigLoadError;
use crate::logic::external_intel::LookupError;

pub type AppResult<T> = Result<T, AppError>;

/// Anything that ends a run without a verdict
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("'{input}' is not a valid IPv4 or IPv6 address")]
    InvalidAddress { input: String },

    #[error("Failed to read address from standard input: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Failed to write report: {0}")]
    Output(#[source] std::io::Error),
}
