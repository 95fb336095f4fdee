//! In-memory store of hotel rate configurations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::rates::RateConfiguration;

/// Source of rate configurations for hotels
///
/// Implemented by the in-memory [`RateCatalog`]; a database-backed store
/// only needs to hand out validated configurations by hotel id.
pub trait RateConfigStore {
    fn rate_config(&self, hotel_id: &str) -> Option<&RateConfiguration>;
}

/// A hotel record's pricing section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRates {
    pub hotel_id: String,
    #[serde(default)]
    pub name: String,
    pub hotel_rates: RateConfiguration,
}

/// Hotels in load order with an id index
#[derive(Debug, Clone, Default)]
pub struct RateCatalog {
    hotels: Vec<HotelRates>,
    index: HashMap<String, usize>,
}

impl RateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from hotels; a repeated id replaces the earlier entry
    pub fn from_hotels(hotels: Vec<HotelRates>) -> Self {
        let mut catalog = Self::new();
        for hotel in hotels {
            catalog.insert(hotel);
        }
        catalog
    }

    /// Add or replace a hotel, returning the configuration it replaced
    pub fn insert(&mut self, hotel: HotelRates) -> Option<HotelRates> {
        match self.index.get(&hotel.hotel_id) {
            Some(&position) => {
                log::warn!("replacing rate configuration for hotel {}", hotel.hotel_id);
                Some(std::mem::replace(&mut self.hotels[position], hotel))
            }
            None => {
                self.index.insert(hotel.hotel_id.clone(), self.hotels.len());
                self.hotels.push(hotel);
                None
            }
        }
    }

    pub fn get(&self, hotel_id: &str) -> Option<&HotelRates> {
        self.index.get(hotel_id).map(|&position| &self.hotels[position])
    }

    pub fn hotels(&self) -> &[HotelRates] {
        &self.hotels
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }
}

impl RateConfigStore for RateCatalog {
    fn rate_config(&self, hotel_id: &str) -> Option<&RateConfiguration> {
        self.get(hotel_id).map(|hotel| &hotel.hotel_rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel(id: &str, default_rate: f64) -> HotelRates {
        HotelRates {
            hotel_id: id.to_string(),
            name: format!("Hotel {}", id),
            hotel_rates: RateConfiguration::new(default_rate),
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = RateCatalog::from_hotels(vec![hotel("a", 2000.0), hotel("b", 3000.0)]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.rate_config("b").map(|c| c.default_rate), Some(3000.0));
        assert!(catalog.rate_config("missing").is_none());
    }

    #[test]
    fn test_duplicate_id_replaces_in_place() {
        let mut catalog = RateCatalog::from_hotels(vec![hotel("a", 2000.0), hotel("b", 3000.0)]);
        let replaced = catalog.insert(hotel("a", 2200.0));

        assert_eq!(replaced.map(|h| h.hotel_rates.default_rate), Some(2000.0));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.hotels()[0].hotel_rates.default_rate, 2200.0);
    }
}
