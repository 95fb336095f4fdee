//! Wire shape of a hotel's rate configuration
//!
//! The editor posts drafts that may be incomplete, so every field here is
//! optional. Conversion into [`RateConfiguration`] validates first and
//! applies the defaulting rules once, at construction.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::types::{BlackoutPeriod, RateConfiguration, Season, SeasonalRate};
use super::validation::{validate_rate_config, ValidationIssue};
use crate::error::RatesError;

/// Rate configuration exactly as persisted on the hotel record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfigInput {
    #[serde(default)]
    pub default_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_weekend_rate: Option<f64>,

    #[serde(default)]
    pub seasonal_rates: Vec<SeasonalRateInput>,

    #[serde(default)]
    pub blackout_dates: Vec<BlackoutInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalRateInput {
    #[serde(default)]
    pub season: Season,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub base_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackoutInput {
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Accept `YYYY-MM-DD` or a full ISO-8601 timestamp; empty strings read as missing
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_date(text).map(Some).map_err(serde::de::Error::custom),
    }
}

/// Parse a calendar date, taking the date component of timestamps as written
pub fn parse_date(text: &str) -> Result<NaiveDate, String> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(text)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", text))
}

impl TryFrom<RateConfigInput> for RateConfiguration {
    type Error = RatesError;

    fn try_from(input: RateConfigInput) -> Result<Self, Self::Error> {
        let report = validate_rate_config(&input);
        if !report.valid {
            return Err(RatesError::InvalidConfig(report.errors));
        }

        let default_rate = input
            .default_rate
            .ok_or_else(|| RatesError::InvalidConfig(vec![ValidationIssue::InvalidDefaultRate]))?;

        let mut config = RateConfiguration::new(default_rate);
        config.default_weekend_rate = input.default_weekend_rate;

        for (index, rate) in input.seasonal_rates.into_iter().enumerate() {
            let (Some(start), Some(end), Some(base_rate)) =
                (rate.start_date, rate.end_date, rate.base_rate)
            else {
                return Err(RatesError::InvalidConfig(vec![
                    ValidationIssue::SeasonalMissingDates { index },
                ]));
            };

            let mut seasonal = SeasonalRate::new(rate.season, start, end, base_rate)
                .with_weekend_rate(rate.weekend_rate);
            if let Some(description) = rate.description {
                seasonal = seasonal.with_description(description);
            }
            config.seasonal_rates.push(seasonal);
        }

        for (index, blackout) in input.blackout_dates.into_iter().enumerate() {
            let (Some(start), Some(end)) = (blackout.start_date, blackout.end_date) else {
                return Err(RatesError::InvalidConfig(vec![
                    ValidationIssue::BlackoutMissingDates { index },
                ]));
            };

            let mut period = BlackoutPeriod::new(start, end);
            if let Some(reason) = blackout.reason {
                period = period.with_reason(reason);
            }
            config.blackout_dates.push(period);
        }

        Ok(config)
    }
}

impl From<RateConfiguration> for RateConfigInput {
    fn from(config: RateConfiguration) -> Self {
        Self {
            default_rate: Some(config.default_rate),
            default_weekend_rate: config.default_weekend_rate,
            seasonal_rates: config
                .seasonal_rates
                .into_iter()
                .map(|rate| SeasonalRateInput {
                    season: rate.season,
                    description: rate.description,
                    start_date: Some(rate.start_date),
                    end_date: Some(rate.end_date),
                    base_rate: Some(rate.base_rate),
                    weekend_rate: Some(rate.weekend_rate),
                })
                .collect(),
            blackout_dates: config
                .blackout_dates
                .into_iter()
                .map(|period| BlackoutInput {
                    start_date: Some(period.start_date),
                    end_date: Some(period.end_date),
                    reason: period.reason,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOTEL_RATES: &str = r#"{
        "defaultRate": 2000,
        "defaultWeekendRate": 2500,
        "seasonalRates": [
            {
                "season": "peak",
                "description": "Diwali Peak",
                "startDate": "2024-10-28",
                "endDate": "2024-11-05T00:00:00.000Z",
                "baseRate": 4000,
                "weekendRate": 4500
            },
            {
                "season": "low",
                "startDate": "2024-07-01",
                "endDate": "2024-08-31",
                "baseRate": 1500
            }
        ],
        "blackoutDates": [
            { "startDate": "2024-12-24", "endDate": "2024-12-26", "reason": "Private event" }
        ]
    }"#;

    #[test]
    fn test_parse_hotel_rates() {
        let config: RateConfiguration = serde_json::from_str(HOTEL_RATES).expect("valid config");

        assert_eq!(config.default_rate, 2000.0);
        assert_eq!(config.weekend_rate(), 2500.0);
        assert_eq!(config.seasonal_rates.len(), 2);

        let peak = &config.seasonal_rates[0];
        assert_eq!(peak.season, Season::Peak);
        assert_eq!(peak.end_date, NaiveDate::from_ymd_opt(2024, 11, 5).unwrap());
        assert_eq!(peak.label(), "Diwali Peak");

        let low = &config.seasonal_rates[1];
        assert_eq!(low.weekend_rate, 1500.0);
        assert_eq!(low.label(), "Low Season");

        assert_eq!(config.blackout_dates[0].reason.as_deref(), Some("Private event"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let json = r#"{
            "defaultRate": 0,
            "seasonalRates": [
                { "season": "high", "startDate": "2024-05-10", "endDate": "2024-05-01", "baseRate": 3000 }
            ]
        }"#;

        let err = serde_json::from_str::<RateConfiguration>(json).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Default rate"), "{}", message);
        assert!(message.contains("Seasonal rate 1"), "{}", message);
    }

    #[test]
    fn test_non_numeric_rate_is_rejected() {
        let json = r#"{ "defaultRate": "two thousand" }"#;
        assert!(serde_json::from_str::<RateConfigInput>(json).is_err());
    }

    #[test]
    fn test_missing_season_reads_as_regular() {
        let json = r#"{ "startDate": "2024-03-01", "endDate": "2024-03-31", "baseRate": 1800 }"#;
        let rate: SeasonalRateInput = serde_json::from_str(json).unwrap();
        assert_eq!(rate.season, Season::Regular);
    }

    #[test]
    fn test_empty_dates_read_as_missing() {
        let json = r#"{ "startDate": "", "endDate": null, "reason": "Renovation" }"#;
        let blackout: BlackoutInput = serde_json::from_str(json).unwrap();
        assert_eq!(blackout.start_date, None);
        assert_eq!(blackout.end_date, None);
    }

    #[test]
    fn test_serialize_keeps_wire_shape() {
        let config: RateConfiguration = serde_json::from_str(HOTEL_RATES).unwrap();
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["defaultRate"], 2000.0);
        assert_eq!(value["seasonalRates"][0]["startDate"], "2024-10-28");
        assert_eq!(value["seasonalRates"][1]["weekendRate"], 1500.0);
        assert_eq!(value["blackoutDates"][0]["reason"], "Private event");

        let decoded: RateConfiguration = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        assert_eq!(parse_date("2024-07-15"), Ok(expected));
        assert_eq!(parse_date("2024-07-15T18:30:00+05:30"), Ok(expected));
        assert!(parse_date("15/07/2024").is_err());
    }
}
