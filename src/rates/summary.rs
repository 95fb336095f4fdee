//! Presentation view of a priced stay

use serde::Serialize;

use super::engine::{DayRate, RateType, StaySummary, UnavailableReason};

/// One labelled line of the rate breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownLine {
    pub rate_type: RateType,
    pub label: String,
    pub nights: u32,
    pub total_rate: f64,
    pub average_rate: f64,
}

/// What the booking page shows for a stay
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSummaryView {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub nights: u32,
    pub total_rate: f64,
    pub average_rate: f64,
    pub weekend_nights: u32,
    pub weekday_nights: u32,
    pub breakdown: Vec<BreakdownLine>,
}

/// Label for a night's rate; seasonal descriptions win over season names
fn rate_label(day: &DayRate) -> String {
    match (&day.rate_type, &day.seasonal_rate) {
        (RateType::Seasonal(_), Some(seasonal)) => seasonal.label().to_string(),
        (RateType::Seasonal(season), None) => season.label().to_string(),
        (RateType::Default, _) => "Standard Rate".to_string(),
        (RateType::DefaultWeekend, _) => "Weekend Rate".to_string(),
        (RateType::Blackout, _) => "Blackout".to_string(),
    }
}

/// Date with its blackout reason, or the bare date
fn describe_unavailable(day: &DayRate) -> String {
    match day.blackout.as_ref().and_then(|period| period.reason.as_deref()) {
        Some(reason) => format!("{} ({})", day.date, reason),
        None => day.date.to_string(),
    }
}

/// Build the view rendered next to a stay quote
pub fn get_rate_summary(summary: &StaySummary) -> RateSummaryView {
    if !summary.available {
        let message = match summary.unavailable_reason {
            Some(UnavailableReason::InvalidRange) => "Check-out must be after check-in".to_string(),
            _ => {
                let dates: Vec<String> = summary
                    .unavailable_dates
                    .iter()
                    .map(describe_unavailable)
                    .collect();
                format!("Not available for the selected dates: {}", dates.join(", "))
            }
        };

        return RateSummaryView {
            available: false,
            message: Some(message),
            nights: summary.nights,
            total_rate: 0.0,
            average_rate: 0.0,
            weekend_nights: 0,
            weekday_nights: 0,
            breakdown: Vec::new(),
        };
    }

    // Group on the daily rates rather than `rate_breakdown` so the label can
    // come from the first night of each group
    let mut breakdown: Vec<BreakdownLine> = Vec::new();
    for day in &summary.daily_rates {
        match breakdown.iter_mut().find(|line| line.rate_type == day.rate_type) {
            Some(line) => {
                line.nights += 1;
                line.total_rate += day.rate;
            }
            None => breakdown.push(BreakdownLine {
                rate_type: day.rate_type,
                label: rate_label(day),
                nights: 1,
                total_rate: day.rate,
                average_rate: 0.0,
            }),
        }
    }
    for line in &mut breakdown {
        line.average_rate = line.total_rate / line.nights as f64;
    }

    RateSummaryView {
        available: true,
        message: None,
        nights: summary.nights,
        total_rate: summary.total_rate,
        average_rate: summary.average_rate,
        weekend_nights: summary.weekend_nights(),
        weekday_nights: summary.weekday_nights(),
        breakdown,
    }
}
