//! Hotel rate engine: configuration, nightly pricing, stay summaries and validation

mod types;
mod engine;
mod summary;
mod validation;
pub mod input;

pub use types::{Season, SeasonalRate, BlackoutPeriod, RateConfiguration};
pub use engine::{
    RateEngine, RateType, DayRate, StaySummary, RateBreakdown, UnavailableReason,
    find_blackout, find_seasonal_rate, is_weekend, calculate_day_rate, calculate_stay_rates,
};
pub use summary::{RateSummaryView, BreakdownLine, get_rate_summary};
pub use validation::{ValidationIssue, ValidationReport, validate_rate_config};
pub use input::{RateConfigInput, parse_date};
