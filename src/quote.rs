//! Quote runner for pricing stays against a pre-loaded catalog
//!
//! Loads the catalog once, then prices any number of stays without
//! touching the filesystem again. Batches run in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::{RateCatalog, RateConfigStore};
use crate::error::{RatesError, Result};
use crate::rates::{calculate_stay_rates, get_rate_summary, RateSummaryView, StaySummary};
use crate::stays::{StayRequest, MAX_STAY_NIGHTS};

/// Priced stay with the view shown to the guest
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayQuote {
    pub stay_id: String,
    pub hotel_id: String,
    pub summary: StaySummary,
    pub view: RateSummaryView,
}

/// Pre-loaded quote runner
///
/// # Example
/// ```ignore
/// let runner = QuoteRunner::from_default_catalog()?;
/// let quotes = runner.quote_batch(&load_default_stays()?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuoteRunner {
    catalog: RateCatalog,
}

impl QuoteRunner {
    pub fn new(catalog: RateCatalog) -> Self {
        Self { catalog }
    }

    /// Create runner by loading the catalog from data/hotels.json
    pub fn from_default_catalog() -> Result<Self> {
        Ok(Self::new(crate::catalog::load_default_catalog()?))
    }

    /// Create runner from a specific catalog file
    pub fn from_catalog_path(path: &std::path::Path) -> Result<Self> {
        Ok(Self::new(crate::catalog::load_catalog(path)?))
    }

    /// Price one stay
    pub fn quote(&self, stay: &StayRequest) -> Result<StayQuote> {
        if stay.nights() > MAX_STAY_NIGHTS {
            return Err(RatesError::InvalidStay {
                stay_id: stay.stay_id.clone(),
                reason: format!("{} nights exceeds the limit of {}", stay.nights(), MAX_STAY_NIGHTS),
            });
        }

        let config = self
            .catalog
            .rate_config(&stay.hotel_id)
            .ok_or_else(|| RatesError::UnknownHotel {
                hotel_id: stay.hotel_id.clone(),
            })?;

        let summary = calculate_stay_rates(stay.check_in, stay.check_out, config);
        let view = get_rate_summary(&summary);

        Ok(StayQuote {
            stay_id: stay.stay_id.clone(),
            hotel_id: stay.hotel_id.clone(),
            summary,
            view,
        })
    }

    /// Price many stays in parallel; results keep the input order
    pub fn quote_batch(&self, stays: &[StayRequest]) -> Vec<Result<StayQuote>> {
        let quotes: Vec<Result<StayQuote>> = stays.par_iter().map(|stay| self.quote(stay)).collect();

        let failed = quotes.iter().filter(|quote| quote.is_err()).count();
        if failed > 0 {
            log::warn!("{} of {} stays could not be quoted", failed, stays.len());
        }
        quotes
    }

    pub fn catalog(&self) -> &RateCatalog {
        &self.catalog
    }
}
