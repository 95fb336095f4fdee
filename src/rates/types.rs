//! Rate configuration types: seasons, seasonal windows, blackout periods

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::input::RateConfigInput;

/// Named pricing tier applied over a date window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Peak,
    High,
    #[default]
    Regular,
    Low,
}

impl Season {
    /// Tag used in rate types (`seasonal-<tag>`) and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Peak => "peak",
            Season::High => "high",
            Season::Regular => "regular",
            Season::Low => "low",
        }
    }

    /// Display label used when a seasonal rate carries no description
    pub fn label(&self) -> &'static str {
        match self {
            Season::Peak => "Peak Season",
            Season::High => "High Season",
            Season::Regular => "Regular Season",
            Season::Low => "Low Season",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "peak" => Some(Season::Peak),
            "high" => Some(Season::High),
            "regular" => Some(Season::Regular),
            "low" => Some(Season::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rate window for a season, inclusive on both ends
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalRate {
    pub season: Season,

    /// Free-text description, preferred over the season label when present
    pub description: Option<String>,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Sunday through Thursday nightly rate
    pub base_rate: f64,

    /// Friday and Saturday nightly rate, resolved to `base_rate` when unset
    pub weekend_rate: f64,
}

impl SeasonalRate {
    /// Create a seasonal rate whose weekend rate equals the base rate
    pub fn new(season: Season, start_date: NaiveDate, end_date: NaiveDate, base_rate: f64) -> Self {
        Self {
            season,
            description: None,
            start_date,
            end_date,
            base_rate,
            weekend_rate: base_rate,
        }
    }

    /// Set the weekend rate; absent, non-finite or non-positive values fall back to the base rate
    pub fn with_weekend_rate(mut self, weekend_rate: Option<f64>) -> Self {
        self.weekend_rate = resolve_rate(weekend_rate, self.base_rate);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// Check whether the window covers a date
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Check whether two windows share at least one date
    pub fn overlaps(&self, other: &SeasonalRate) -> bool {
        self.start_date <= other.end_date && self.end_date >= other.start_date
    }

    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| self.season.label())
    }
}

/// Period during which the hotel cannot be booked, inclusive on both ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackoutPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl BlackoutPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        self.reason = if reason.trim().is_empty() { None } else { Some(reason) };
        self
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Pricing configuration attached to a hotel record
///
/// Serializes to the persisted `hotelRates` JSON shape. Deserializing runs
/// validation, so a decoded configuration is always usable by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RateConfigInput", try_from = "RateConfigInput")]
pub struct RateConfiguration {
    /// Weekday nightly rate
    pub default_rate: f64,

    /// Weekend nightly rate as configured, see [`RateConfiguration::weekend_rate`]
    pub default_weekend_rate: Option<f64>,

    /// Seasonal windows, matched first-to-last
    pub seasonal_rates: Vec<SeasonalRate>,

    /// Blackout periods, matched first-to-last
    pub blackout_dates: Vec<BlackoutPeriod>,
}

impl RateConfiguration {
    /// Create a configuration with only a weekday rate
    pub fn new(default_rate: f64) -> Self {
        Self {
            default_rate,
            default_weekend_rate: None,
            seasonal_rates: Vec::new(),
            blackout_dates: Vec::new(),
        }
    }

    pub fn with_weekend_rate(mut self, weekend_rate: f64) -> Self {
        self.default_weekend_rate = Some(weekend_rate);
        self
    }

    pub fn with_seasonal_rate(mut self, rate: SeasonalRate) -> Self {
        self.seasonal_rates.push(rate);
        self
    }

    pub fn with_blackout(mut self, period: BlackoutPeriod) -> Self {
        self.blackout_dates.push(period);
        self
    }

    /// Effective weekend rate outside any seasonal window
    ///
    /// Falls back to `default_rate` when the configured value is absent,
    /// unusable, or below the weekday rate.
    pub fn weekend_rate(&self) -> f64 {
        match self.default_weekend_rate {
            Some(value) if value.is_finite() && value > 0.0 && value >= self.default_rate => value,
            _ => self.default_rate,
        }
    }
}

/// Use `rate` when it is a usable price, otherwise `fallback`
fn resolve_rate(rate: Option<f64>, fallback: f64) -> f64 {
    match rate {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => fallback,
    }
}
