//! Adapter setup errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}
