//! Hotel Rates - nightly pricing engine for hotel stays
//!
//! This library provides:
//! - Typed rate configurations (default, weekend, seasonal windows, blackout periods)
//! - Per-night pricing and whole-stay summaries with availability
//! - Presentation views with labelled rate breakdowns
//! - Advisory validation of rate configurations
//! - Catalog and stay loaders plus a parallel batch quote runner

pub mod error;
pub mod rates;
pub mod catalog;
pub mod stays;
pub mod quote;

// Re-export commonly used types
pub use error::RatesError;
pub use rates::{RateConfiguration, SeasonalRate, BlackoutPeriod, Season, RateEngine, StaySummary, RateSummaryView};
pub use catalog::{RateCatalog, RateConfigStore, HotelRates};
pub use stays::StayRequest;
pub use quote::{QuoteRunner, StayQuote};
