//! Advisory validation of rate configurations
//!
//! Errors make a configuration unusable; warnings never block it. Nothing
//! here panics or short-circuits: every issue found is reported.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

use super::input::RateConfigInput;
use super::types::RateConfiguration;

/// A single validation finding
///
/// Indexes are zero-based positions in the configuration lists; messages
/// number them from one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    InvalidDefaultRate,
    SeasonalMissingDates { index: usize },
    SeasonalDateOrder { index: usize },
    SeasonalInvalidBaseRate { index: usize },
    BlackoutMissingDates { index: usize },
    BlackoutDateOrder { index: usize },
    WeekendBelowDefault,
    SeasonalOverlap { first: usize, second: usize },
    BlackoutMissingReason { index: usize },
}

impl ValidationIssue {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationIssue::InvalidDefaultRate => "invalid-default-rate",
            ValidationIssue::SeasonalMissingDates { .. } => "seasonal-missing-dates",
            ValidationIssue::SeasonalDateOrder { .. } => "seasonal-date-order",
            ValidationIssue::SeasonalInvalidBaseRate { .. } => "seasonal-invalid-base-rate",
            ValidationIssue::BlackoutMissingDates { .. } => "blackout-missing-dates",
            ValidationIssue::BlackoutDateOrder { .. } => "blackout-date-order",
            ValidationIssue::WeekendBelowDefault => "weekend-below-default",
            ValidationIssue::SeasonalOverlap { .. } => "seasonal-overlap",
            ValidationIssue::BlackoutMissingReason { .. } => "blackout-missing-reason",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::InvalidDefaultRate => {
                write!(f, "Default rate must be greater than 0")
            }
            ValidationIssue::SeasonalMissingDates { index } => {
                write!(f, "Seasonal rate {}: start and end dates are required", index + 1)
            }
            ValidationIssue::SeasonalDateOrder { index } => {
                write!(f, "Seasonal rate {}: start date must be before end date", index + 1)
            }
            ValidationIssue::SeasonalInvalidBaseRate { index } => {
                write!(f, "Seasonal rate {}: base rate must be greater than 0", index + 1)
            }
            ValidationIssue::BlackoutMissingDates { index } => {
                write!(f, "Blackout period {}: start and end dates are required", index + 1)
            }
            ValidationIssue::BlackoutDateOrder { index } => {
                write!(f, "Blackout period {}: start date must be before end date", index + 1)
            }
            ValidationIssue::WeekendBelowDefault => {
                write!(f, "Weekend rate is lower than the default rate")
            }
            ValidationIssue::SeasonalOverlap { first, second } => write!(
                f,
                "Seasonal rates {} and {} have overlapping dates",
                first + 1,
                second + 1
            ),
            ValidationIssue::BlackoutMissingReason { index } => {
                write!(f, "Blackout period {}: no reason given", index + 1)
            }
        }
    }
}

impl Serialize for ValidationIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationIssue", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Outcome of validating a configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

fn is_positive(rate: Option<f64>) -> bool {
    matches!(rate, Some(value) if value.is_finite() && value > 0.0)
}

/// Validate a configuration draft
pub fn validate_rate_config(config: &RateConfigInput) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !is_positive(config.default_rate) {
        errors.push(ValidationIssue::InvalidDefaultRate);
    }

    if let (Some(weekend), Some(default)) = (config.default_weekend_rate, config.default_rate) {
        if weekend < default {
            warnings.push(ValidationIssue::WeekendBelowDefault);
        }
    }

    for (index, rate) in config.seasonal_rates.iter().enumerate() {
        match (rate.start_date, rate.end_date) {
            (Some(start), Some(end)) if start >= end => {
                errors.push(ValidationIssue::SeasonalDateOrder { index });
            }
            (Some(_), Some(_)) => {}
            _ => errors.push(ValidationIssue::SeasonalMissingDates { index }),
        }

        if !is_positive(rate.base_rate) {
            errors.push(ValidationIssue::SeasonalInvalidBaseRate { index });
        }
    }

    // Pairwise; windows without both dates were already reported above
    for (first, a) in config.seasonal_rates.iter().enumerate() {
        for (offset, b) in config.seasonal_rates[first + 1..].iter().enumerate() {
            if let (Some(start1), Some(end1), Some(start2), Some(end2)) =
                (a.start_date, a.end_date, b.start_date, b.end_date)
            {
                if start1 <= end2 && end1 >= start2 {
                    warnings.push(ValidationIssue::SeasonalOverlap {
                        first,
                        second: first + 1 + offset,
                    });
                }
            }
        }
    }

    for (index, blackout) in config.blackout_dates.iter().enumerate() {
        match (blackout.start_date, blackout.end_date) {
            (Some(start), Some(end)) if start >= end => {
                errors.push(ValidationIssue::BlackoutDateOrder { index });
            }
            (Some(_), Some(_)) => {}
            _ => errors.push(ValidationIssue::BlackoutMissingDates { index }),
        }

        let has_reason = blackout
            .reason
            .as_deref()
            .is_some_and(|reason| !reason.trim().is_empty());
        if !has_reason {
            warnings.push(ValidationIssue::BlackoutMissingReason { index });
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

impl RateConfiguration {
    /// Validate an already-built configuration, e.g. one assembled in code
    pub fn validate(&self) -> ValidationReport {
        validate_rate_config(&RateConfigInput::from(self.clone()))
    }
}
