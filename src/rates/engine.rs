//! Nightly rate calculation
//!
//! Maps a date to a [`DayRate`] and a stay to a [`StaySummary`]. All lookups
//! are linear scans in list order and the first matching window wins, so
//! overlapping seasonal windows resolve to whichever is listed first.
//!
//! Precedence for a single night:
//! 1. Blackout: unavailable, rate 0
//! 2. Seasonal window: weekend or base rate of the season
//! 3. Defaults: weekend or weekday default rate

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::types::{BlackoutPeriod, RateConfiguration, Season, SeasonalRate};

/// Which pricing rule produced a night's rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateType {
    Default,
    DefaultWeekend,
    Seasonal(Season),
    Blackout,
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateType::Default => f.write_str("default"),
            RateType::DefaultWeekend => f.write_str("default-weekend"),
            RateType::Seasonal(season) => write!(f, "seasonal-{}", season),
            RateType::Blackout => f.write_str("blackout"),
        }
    }
}

impl FromStr for RateType {
    type Err = String;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "default" => Ok(RateType::Default),
            "default-weekend" => Ok(RateType::DefaultWeekend),
            "blackout" => Ok(RateType::Blackout),
            other => other
                .strip_prefix("seasonal-")
                .and_then(Season::from_tag)
                .map(RateType::Seasonal)
                .ok_or_else(|| format!("unknown rate type '{}'", other)),
        }
    }
}

impl Serialize for RateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RateType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(de::Error::custom)
    }
}

/// Price of a single night
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRate {
    pub date: NaiveDate,
    pub available: bool,
    pub rate: f64,
    pub rate_type: RateType,
    pub is_weekend: bool,
    pub blackout: Option<BlackoutPeriod>,
    #[serde(serialize_with = "serialize_seasonal")]
    pub seasonal_rate: Option<SeasonalRate>,
}

fn serialize_seasonal<S: Serializer>(
    rate: &Option<SeasonalRate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct SeasonalRef<'a> {
        season: Season,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<&'a str>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        base_rate: f64,
        weekend_rate: f64,
    }

    rate.as_ref()
        .map(|rate| SeasonalRef {
            season: rate.season,
            description: rate.description.as_deref(),
            start_date: rate.start_date,
            end_date: rate.end_date,
            base_rate: rate.base_rate,
            weekend_rate: rate.weekend_rate,
        })
        .serialize(serializer)
}

/// Why a stay cannot be booked as requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnavailableReason {
    /// Check-out is not after check-in
    InvalidRange,
    /// At least one night falls in a blackout period
    Blackout,
}

/// Nights and revenue attributed to one rate type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateBreakdown {
    pub rate_type: RateType,
    pub nights: u32,
    pub total_rate: f64,
}

/// Priced stay: every night plus aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaySummary {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
    pub total_rate: f64,
    pub average_rate: f64,
    pub available: bool,
    pub unavailable_reason: Option<UnavailableReason>,
    pub daily_rates: Vec<DayRate>,
    pub unavailable_dates: Vec<DayRate>,
    /// Available nights grouped by rate type, in order of first appearance
    pub rate_breakdown: Vec<RateBreakdown>,
}

impl StaySummary {
    fn invalid_range(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
            nights: 0,
            total_rate: 0.0,
            average_rate: 0.0,
            available: false,
            unavailable_reason: Some(UnavailableReason::InvalidRange),
            daily_rates: Vec::new(),
            unavailable_dates: Vec::new(),
            rate_breakdown: Vec::new(),
        }
    }

    pub fn weekend_nights(&self) -> u32 {
        self.daily_rates.iter().filter(|day| day.is_weekend).count() as u32
    }

    pub fn weekday_nights(&self) -> u32 {
        self.nights - self.weekend_nights()
    }
}

/// Find the first blackout period covering `date`
pub fn find_blackout(date: NaiveDate, blackout_dates: &[BlackoutPeriod]) -> Option<&BlackoutPeriod> {
    blackout_dates.iter().find(|period| period.contains(date))
}

/// Find the first seasonal window covering `date`
pub fn find_seasonal_rate(date: NaiveDate, seasonal_rates: &[SeasonalRate]) -> Option<&SeasonalRate> {
    seasonal_rates.iter().find(|rate| rate.contains(date))
}

/// Friday and Saturday nights are weekend nights
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
}

/// Rate engine bound to one hotel's configuration
///
/// Stateless between calls; safe to share across threads.
#[derive(Debug, Clone)]
pub struct RateEngine {
    config: RateConfiguration,
}

impl RateEngine {
    pub fn new(config: RateConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RateConfiguration {
        &self.config
    }

    /// Price a single night
    pub fn day_rate(&self, date: NaiveDate) -> DayRate {
        calculate_day_rate(date, &self.config)
    }

    /// Price every night from `check_in` up to, not including, `check_out`
    pub fn stay_rates(&self, check_in: NaiveDate, check_out: NaiveDate) -> StaySummary {
        calculate_stay_rates(check_in, check_out, &self.config)
    }
}

/// Price a single night against a configuration
pub fn calculate_day_rate(date: NaiveDate, config: &RateConfiguration) -> DayRate {
    let is_weekend = is_weekend(date);

    if let Some(blackout) = find_blackout(date, &config.blackout_dates) {
        return DayRate {
            date,
            available: false,
            rate: 0.0,
            rate_type: RateType::Blackout,
            is_weekend,
            blackout: Some(blackout.clone()),
            seasonal_rate: None,
        };
    }

    if let Some(seasonal) = find_seasonal_rate(date, &config.seasonal_rates) {
        let rate = if is_weekend {
            seasonal.weekend_rate
        } else {
            seasonal.base_rate
        };
        return DayRate {
            date,
            available: true,
            rate,
            rate_type: RateType::Seasonal(seasonal.season),
            is_weekend,
            blackout: None,
            seasonal_rate: Some(seasonal.clone()),
        };
    }

    let (rate, rate_type) = if is_weekend {
        (config.weekend_rate(), RateType::DefaultWeekend)
    } else {
        (config.default_rate, RateType::Default)
    };

    DayRate {
        date,
        available: true,
        rate,
        rate_type,
        is_weekend,
        blackout: None,
        seasonal_rate: None,
    }
}

/// Price a stay; a single unavailable night makes the whole stay unavailable
pub fn calculate_stay_rates(
    check_in: NaiveDate,
    check_out: NaiveDate,
    config: &RateConfiguration,
) -> StaySummary {
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return StaySummary::invalid_range(check_in, check_out);
    }

    let mut daily_rates = Vec::with_capacity(nights as usize);
    let mut unavailable_dates = Vec::new();
    let mut rate_breakdown: Vec<RateBreakdown> = Vec::new();
    let mut total_rate = 0.0;

    for offset in 0..nights {
        let day = calculate_day_rate(check_in + Duration::days(offset), config);

        if day.available {
            total_rate += day.rate;
            match rate_breakdown.iter_mut().find(|entry| entry.rate_type == day.rate_type) {
                Some(entry) => {
                    entry.nights += 1;
                    entry.total_rate += day.rate;
                }
                None => rate_breakdown.push(RateBreakdown {
                    rate_type: day.rate_type,
                    nights: 1,
                    total_rate: day.rate,
                }),
            }
        } else {
            unavailable_dates.push(day.clone());
        }

        daily_rates.push(day);
    }

    let available = unavailable_dates.is_empty();
    let average_rate = if available {
        total_rate / nights as f64
    } else {
        0.0
    };

    StaySummary {
        check_in,
        check_out,
        nights: nights as u32,
        total_rate,
        average_rate,
        available,
        unavailable_reason: if available {
            None
        } else {
            Some(UnavailableReason::Blackout)
        },
        daily_rates,
        unavailable_dates,
        rate_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base_config() -> RateConfiguration {
        RateConfiguration::new(2000.0).with_weekend_rate(2500.0)
    }

    fn seasonal_config() -> RateConfiguration {
        base_config()
            .with_seasonal_rate(
                SeasonalRate::new(Season::Peak, date(2024, 12, 20), date(2025, 1, 5), 4000.0)
                    .with_weekend_rate(Some(4800.0)),
            )
            .with_seasonal_rate(SeasonalRate::new(Season::Low, date(2024, 7, 1), date(2024, 8, 31), 1500.0))
            .with_blackout(BlackoutPeriod::new(date(2024, 12, 24), date(2024, 12, 26)).with_reason("Private event"))
    }

    #[test]
    fn test_is_weekend_friday_saturday() {
        // 2024-07-14 is a Sunday
        assert!(!is_weekend(date(2024, 7, 14)));
        assert!(!is_weekend(date(2024, 7, 15)));
        assert!(!is_weekend(date(2024, 7, 18)));
        assert!(is_weekend(date(2024, 7, 19)));
        assert!(is_weekend(date(2024, 7, 20)));
    }

    #[test]
    fn test_first_matching_window_wins() {
        let first = SeasonalRate::new(Season::High, date(2024, 1, 1), date(2024, 1, 10), 3000.0);
        let second = SeasonalRate::new(Season::Peak, date(2024, 1, 5), date(2024, 1, 15), 5000.0);
        let rates = vec![first.clone(), second.clone()];

        assert_eq!(find_seasonal_rate(date(2024, 1, 7), &rates), Some(&first));
        assert_eq!(find_seasonal_rate(date(2024, 1, 12), &rates), Some(&second));
        assert_eq!(find_seasonal_rate(date(2024, 1, 16), &rates), None);

        let reversed = vec![second.clone(), first];
        assert_eq!(find_seasonal_rate(date(2024, 1, 7), &reversed), Some(&second));
    }

    #[test]
    fn test_blackout_lookup_is_inclusive() {
        let periods = vec![
            BlackoutPeriod::new(date(2024, 7, 15), date(2024, 7, 20)).with_reason("Festival"),
            BlackoutPeriod::new(date(2024, 7, 18), date(2024, 7, 25)).with_reason("Maintenance"),
        ];

        assert_eq!(find_blackout(date(2024, 7, 14), &periods), None);
        assert_eq!(find_blackout(date(2024, 7, 15), &periods), Some(&periods[0]));
        assert_eq!(find_blackout(date(2024, 7, 20), &periods), Some(&periods[0]));
        assert_eq!(find_blackout(date(2024, 7, 21), &periods), Some(&periods[1]));
    }

    #[test]
    fn test_blackout_takes_precedence() {
        let config = seasonal_config();
        let day = calculate_day_rate(date(2024, 12, 25), &config);

        assert!(!day.available);
        assert_eq!(day.rate, 0.0);
        assert_eq!(day.rate_type, RateType::Blackout);
        assert!(day.seasonal_rate.is_none());
        assert_eq!(
            day.blackout.and_then(|period| period.reason),
            Some("Private event".to_string())
        );
    }

    #[test]
    fn test_seasonal_rates_by_weekday() {
        let config = seasonal_config();

        // 2024-12-27 is a Friday, 2024-12-30 a Monday
        let friday = calculate_day_rate(date(2024, 12, 27), &config);
        assert_eq!(friday.rate, 4800.0);
        assert_eq!(friday.rate_type, RateType::Seasonal(Season::Peak));
        assert!(friday.is_weekend);

        let monday = calculate_day_rate(date(2024, 12, 30), &config);
        assert_eq!(monday.rate, 4000.0);
        assert!(!monday.is_weekend);

        // Low season has no weekend rate
        let saturday = calculate_day_rate(date(2024, 7, 20), &config);
        assert_eq!(saturday.rate, 1500.0);
        assert_eq!(saturday.rate_type, RateType::Seasonal(Season::Low));
    }

    #[test]
    fn test_default_rates() {
        let config = seasonal_config();

        let thursday = calculate_day_rate(date(2024, 6, 13), &config);
        assert_eq!(thursday.rate, 2000.0);
        assert_eq!(thursday.rate_type, RateType::Default);

        let friday = calculate_day_rate(date(2024, 6, 14), &config);
        assert_eq!(friday.rate, 2500.0);
        assert_eq!(friday.rate_type, RateType::DefaultWeekend);

        let no_weekend = RateConfiguration::new(2000.0);
        let friday = calculate_day_rate(date(2024, 6, 14), &no_weekend);
        assert_eq!(friday.rate, 2000.0);
        assert_eq!(friday.rate_type, RateType::DefaultWeekend);
    }

    #[test]
    fn test_weekend_rate_below_default_prices_friday_at_default() {
        let config = RateConfiguration::new(2000.0).with_weekend_rate(1800.0);
        // 2024-07-19 is a Friday
        let friday = calculate_day_rate(date(2024, 7, 19), &config);

        assert!(friday.is_weekend);
        assert_eq!(friday.rate_type, RateType::DefaultWeekend);
        assert_eq!(friday.rate, 2000.0);
    }

    #[test]
    fn test_seasonal_description_serialized_as_configured() {
        let config = seasonal_config();

        let low = serde_json::to_value(calculate_day_rate(date(2024, 7, 16), &config)).unwrap();
        assert_eq!(low["seasonalRate"]["season"], "low");
        assert!(low["seasonalRate"].get("description").is_none());

        let described = base_config().with_seasonal_rate(
            SeasonalRate::new(Season::Peak, date(2024, 12, 1), date(2024, 12, 10), 4000.0)
                .with_description("Wedding Season"),
        );
        let peak = serde_json::to_value(calculate_day_rate(date(2024, 12, 2), &described)).unwrap();
        assert_eq!(peak["seasonalRate"]["description"], "Wedding Season");

        let plain = serde_json::to_value(calculate_day_rate(date(2024, 6, 3), &config)).unwrap();
        assert!(plain["seasonalRate"].is_null());
    }

    #[test]
    fn test_weekday_stay() {
        let engine = RateEngine::new(base_config());
        // Monday to Wednesday
        let summary = engine.stay_rates(date(2024, 7, 15), date(2024, 7, 17));

        assert_eq!(summary.nights, 2);
        assert!(summary.available);
        assert_eq!(summary.unavailable_reason, None);
        assert_relative_eq!(summary.total_rate, 4000.0);
        assert_relative_eq!(summary.average_rate, 2000.0);
        assert_eq!(summary.weekend_nights(), 0);
        assert_eq!(summary.weekday_nights(), 2);
    }

    #[test]
    fn test_stay_over_weekend() {
        let engine = RateEngine::new(base_config());
        // Thursday to Sunday
        let summary = engine.stay_rates(date(2024, 7, 18), date(2024, 7, 21));

        assert_eq!(summary.nights, 3);
        assert_relative_eq!(summary.total_rate, 7000.0);
        assert_relative_eq!(summary.average_rate, 7000.0 / 3.0);
        assert_eq!(summary.weekend_nights(), 2);
        assert_eq!(
            summary.rate_breakdown,
            vec![
                RateBreakdown { rate_type: RateType::Default, nights: 1, total_rate: 2000.0 },
                RateBreakdown { rate_type: RateType::DefaultWeekend, nights: 2, total_rate: 5000.0 },
            ]
        );
    }

    #[test]
    fn test_blackout_inside_stay() {
        let config = base_config()
            .with_blackout(BlackoutPeriod::new(date(2024, 7, 15), date(2024, 7, 20)).with_reason("Festival"));
        let summary = calculate_stay_rates(date(2024, 7, 10), date(2024, 7, 25), &config);

        assert_eq!(summary.nights, 15);
        assert!(!summary.available);
        assert_eq!(summary.unavailable_reason, Some(UnavailableReason::Blackout));
        assert_eq!(summary.unavailable_dates.len(), 6);
        assert_eq!(summary.unavailable_dates[0].date, date(2024, 7, 15));
        assert_eq!(summary.unavailable_dates[5].date, date(2024, 7, 20));
        assert_eq!(summary.average_rate, 0.0);

        let available_total: f64 = summary
            .daily_rates
            .iter()
            .filter(|day| day.available)
            .map(|day| day.rate)
            .sum();
        assert_relative_eq!(summary.total_rate, available_total);
    }

    #[test]
    fn test_zero_and_negative_ranges() {
        let config = base_config();

        let same_day = calculate_stay_rates(date(2024, 7, 15), date(2024, 7, 15), &config);
        assert_eq!(same_day.nights, 0);
        assert!(!same_day.available);
        assert_eq!(same_day.unavailable_reason, Some(UnavailableReason::InvalidRange));
        assert!(same_day.unavailable_dates.is_empty());
        assert!(same_day.rate_breakdown.is_empty());
        assert_eq!(same_day.total_rate, 0.0);

        let reversed = calculate_stay_rates(date(2024, 7, 20), date(2024, 7, 15), &config);
        assert_eq!(reversed.nights, 0);
        assert_eq!(reversed.unavailable_reason, Some(UnavailableReason::InvalidRange));
    }

    #[test]
    fn test_stay_rates_are_deterministic() {
        let config = seasonal_config();
        let first = calculate_stay_rates(date(2024, 12, 15), date(2025, 1, 10), &config);
        let second = calculate_stay_rates(date(2024, 12, 15), date(2025, 1, 10), &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sum_law_across_seasons() {
        let config = seasonal_config();
        // Crosses default pricing into the peak window, clear of the blackout
        let summary = calculate_stay_rates(date(2024, 12, 16), date(2024, 12, 24), &config);

        assert!(summary.available);
        let sum: f64 = summary.daily_rates.iter().map(|day| day.rate).sum();
        assert_relative_eq!(summary.total_rate, sum);
        assert_relative_eq!(summary.average_rate, sum / summary.nights as f64);

        let breakdown_total: f64 = summary.rate_breakdown.iter().map(|entry| entry.total_rate).sum();
        assert_relative_eq!(breakdown_total, summary.total_rate);
        let breakdown_nights: u32 = summary.rate_breakdown.iter().map(|entry| entry.nights).sum();
        assert_eq!(breakdown_nights, summary.nights);
    }

    #[test]
    fn test_rate_type_tags() {
        assert_eq!(RateType::Default.to_string(), "default");
        assert_eq!(RateType::DefaultWeekend.to_string(), "default-weekend");
        assert_eq!(RateType::Seasonal(Season::Peak).to_string(), "seasonal-peak");
        assert_eq!(RateType::Blackout.to_string(), "blackout");

        assert_eq!("seasonal-low".parse::<RateType>(), Ok(RateType::Seasonal(Season::Low)));
        assert!("seasonal-shoulder".parse::<RateType>().is_err());

        let json = serde_json::to_string(&RateType::Seasonal(Season::High)).unwrap();
        assert_eq!(json, "\"seasonal-high\"");
        let decoded: RateType = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, RateType::Seasonal(Season::High));
    }
}
