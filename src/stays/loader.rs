//! Load stay requests from CSV

use csv::Reader;
use std::io::Read;
use std::path::Path;

use super::StayRequest;
use crate::error::{RatesError, Result};
use crate::rates::parse_date;

/// Default path to the stay batch file
pub const DEFAULT_STAYS_PATH: &str = "data/stays.csv";

/// Raw CSV row matching stays.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "StayID")]
    stay_id: String,
    #[serde(rename = "HotelID")]
    hotel_id: String,
    #[serde(rename = "CheckIn")]
    check_in: String,
    #[serde(rename = "CheckOut")]
    check_out: String,
}

impl CsvRow {
    fn to_stay(self) -> Result<StayRequest> {
        let check_in = parse_date(&self.check_in).map_err(|reason| RatesError::InvalidStay {
            stay_id: self.stay_id.clone(),
            reason,
        })?;
        let check_out = parse_date(&self.check_out).map_err(|reason| RatesError::InvalidStay {
            stay_id: self.stay_id.clone(),
            reason,
        })?;

        Ok(StayRequest {
            stay_id: self.stay_id,
            hotel_id: self.hotel_id.trim().to_string(),
            check_in,
            check_out,
        })
    }
}

fn read_stays<R: Read>(mut reader: Reader<R>) -> Result<Vec<StayRequest>> {
    let mut stays = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        stays.push(row.to_stay()?);
    }

    log::debug!("loaded {} stay requests", stays.len());
    Ok(stays)
}

/// Load all stays from a CSV file
pub fn load_stays<P: AsRef<Path>>(path: P) -> Result<Vec<StayRequest>> {
    read_stays(Reader::from_path(path)?)
}

/// Load stays from any reader (e.g., string buffer, network stream)
pub fn load_stays_from_reader<R: Read>(reader: R) -> Result<Vec<StayRequest>> {
    read_stays(Reader::from_reader(reader))
}

/// Load stays from the default stays.csv location
pub fn load_default_stays() -> Result<Vec<StayRequest>> {
    load_stays(DEFAULT_STAYS_PATH)
}
