//! Quote every stay in data/stays.csv against data/hotels.json
//!
//! Writes one row per stay to block_quotes.csv and prints a block summary.

use anyhow::{Context, Result};
use hotel_rates::stays::load_default_stays;
use hotel_rates::QuoteRunner;
use serde::Serialize;
use std::time::Instant;

/// Output row for one stay
#[derive(Debug, Serialize)]
struct QuoteRow {
    #[serde(rename = "StayID")]
    stay_id: String,
    #[serde(rename = "HotelID")]
    hotel_id: String,
    #[serde(rename = "CheckIn")]
    check_in: String,
    #[serde(rename = "CheckOut")]
    check_out: String,
    #[serde(rename = "Nights")]
    nights: u32,
    #[serde(rename = "Available")]
    available: bool,
    #[serde(rename = "WeekendNights")]
    weekend_nights: u32,
    #[serde(rename = "TotalRate")]
    total_rate: String,
    #[serde(rename = "AverageRate")]
    average_rate: String,
    #[serde(rename = "Message")]
    message: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    println!("Loading stays from data/stays.csv...");
    let stays = load_default_stays().context("failed to load stays")?;
    let runner = QuoteRunner::from_default_catalog().context("failed to load hotel catalog")?;
    println!(
        "Loaded {} stays and {} hotels in {:?}",
        stays.len(),
        runner.catalog().len(),
        start.elapsed()
    );

    let quote_start = Instant::now();
    let quotes = runner.quote_batch(&stays);
    println!("Quotes complete in {:?}", quote_start.elapsed());

    let output_path = "block_quotes.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("failed to create {}", output_path))?;

    let mut available = 0usize;
    let mut unavailable = 0usize;
    let mut failed = 0usize;
    let mut booked_revenue = 0.0;
    let mut booked_nights = 0u32;

    for (stay, result) in stays.iter().zip(&quotes) {
        let row = match result {
            Ok(quote) => {
                if quote.summary.available {
                    available += 1;
                    booked_revenue += quote.summary.total_rate;
                    booked_nights += quote.summary.nights;
                } else {
                    unavailable += 1;
                }
                QuoteRow {
                    stay_id: quote.stay_id.clone(),
                    hotel_id: quote.hotel_id.clone(),
                    check_in: stay.check_in.to_string(),
                    check_out: stay.check_out.to_string(),
                    nights: quote.summary.nights,
                    available: quote.summary.available,
                    weekend_nights: quote.view.weekend_nights,
                    total_rate: format!("{:.2}", quote.summary.total_rate),
                    average_rate: format!("{:.2}", quote.summary.average_rate),
                    message: quote.view.message.clone().unwrap_or_default(),
                }
            }
            Err(err) => {
                failed += 1;
                log::error!("stay {}: {}", stay.stay_id, err);
                QuoteRow {
                    stay_id: stay.stay_id.clone(),
                    hotel_id: stay.hotel_id.clone(),
                    check_in: stay.check_in.to_string(),
                    check_out: stay.check_out.to_string(),
                    nights: 0,
                    available: false,
                    weekend_nights: 0,
                    total_rate: "0.00".to_string(),
                    average_rate: "0.00".to_string(),
                    message: err.to_string(),
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to {}", output_path);

    println!("\nBlock Summary:");
    println!("  Available:   {}", available);
    println!("  Unavailable: {}", unavailable);
    println!("  Failed:      {}", failed);
    println!("  Nights:      {}", booked_nights);
    println!("  Revenue:     {:.2}", booked_revenue);
    if booked_nights > 0 {
        println!("  ADR:         {:.2}", booked_revenue / booked_nights as f64);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
