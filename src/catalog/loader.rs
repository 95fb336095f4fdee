//! Load hotel rate configurations from JSON
//!
//! The file is an array of hotel records, each carrying its `hotelRates`
//! in the same shape the hotel API persists.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{HotelRates, RateCatalog};
use crate::error::Result;

/// Default path to the hotel catalog
pub const DEFAULT_CATALOG_PATH: &str = "data/hotels.json";

/// Load a catalog from a JSON file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<RateCatalog> {
    let path = path.as_ref();
    log::debug!("loading rate catalog from {}", path.display());
    let file = File::open(path)?;
    load_catalog_from_reader(BufReader::new(file))
}

/// Load a catalog from any reader (e.g., request body, string buffer)
pub fn load_catalog_from_reader<R: Read>(reader: R) -> Result<RateCatalog> {
    let hotels: Vec<HotelRates> = serde_json::from_reader(reader)?;
    let catalog = RateCatalog::from_hotels(hotels);
    log::info!("loaded rate configurations for {} hotels", catalog.len());
    Ok(catalog)
}

/// Load the catalog from the default location
pub fn load_default_catalog() -> Result<RateCatalog> {
    load_catalog(DEFAULT_CATALOG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RateConfigStore;
    use crate::error::RatesError;

    #[test]
    fn test_load_default_catalog() {
        let catalog = load_default_catalog().expect("Failed to load catalog");
        assert!(catalog.len() >= 3);

        let hotel = catalog.get("HTL-1001").expect("sample hotel present");
        assert_eq!(hotel.hotel_rates.default_rate, 2000.0);
        assert_eq!(hotel.hotel_rates.weekend_rate(), 2500.0);
        assert!(!hotel.hotel_rates.blackout_dates.is_empty());

        for hotel in catalog.hotels() {
            assert!(hotel.hotel_rates.validate().valid, "{} invalid", hotel.hotel_id);
        }
    }

    #[test]
    fn test_invalid_hotel_rates_fail_to_load() {
        let json = r#"[{ "hotelId": "bad", "hotelRates": { "defaultRate": -5 } }]"#;
        let err = load_catalog_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, RatesError::Json(_)));
        assert!(err.to_string().contains("Default rate must be greater than 0"));
    }

    #[test]
    fn test_load_from_reader() {
        let json = r#"[
            { "hotelId": "h1", "name": "Sea View", "hotelRates": { "defaultRate": 1800 } },
            { "hotelId": "h2", "hotelRates": { "defaultRate": 3200, "defaultWeekendRate": 3600 } }
        ]"#;

        let catalog = load_catalog_from_reader(json.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("h1").map(|h| h.name.as_str()), Some("Sea View"));
        assert_eq!(catalog.rate_config("h2").map(|c| c.weekend_rate()), Some(3600.0));
    }
}
