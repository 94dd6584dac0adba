//! Errors for the few fallible entry points.
//!
//! Bound components never fail: a missing element simply disables the
//! feature. Only configuration decoding and validation can be rejected.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to decode configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SiteError>;
