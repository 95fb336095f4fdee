//! Error types for loading rate data and quoting stays
//!
//! Rate calculation itself never fails: unavailable stays and invalid
//! ranges are ordinary results. These errors cover the edges of the crate
//! (files, wire formats, catalog lookups).

use crate::rates::ValidationIssue;
use thiserror::Error;

/// Errors raised while loading configurations or resolving stay requests
#[derive(Error, Debug)]
pub enum RatesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid rate configuration: {}", join_issues(.0))]
    InvalidConfig(Vec<ValidationIssue>),

    #[error("hotel {hotel_id} has no rate configuration")]
    UnknownHotel { hotel_id: String },

    #[error("invalid stay {stay_id}: {reason}")]
    InvalidStay { stay_id: String, reason: String },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, RatesError>;
