//! Hotel Rates CLI
//!
//! Quote a stay against the hotel catalog, or validate a rate configuration
//! before it is saved to the hotel record.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hotel_rates::rates::{parse_date, validate_rate_config, RateConfigInput};
use hotel_rates::{QuoteRunner, StayRequest};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "hotel_rates", version, about = "Nightly rate engine for hotel stays")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a stay at one hotel
    Quote {
        /// Hotel catalog (JSON array of hotel records)
        #[arg(long, default_value = "data/hotels.json")]
        catalog: PathBuf,

        /// Hotel id to quote
        #[arg(long)]
        hotel: String,

        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        check_in: String,

        /// Check-out date (YYYY-MM-DD), not charged
        #[arg(long)]
        check_out: String,

        /// Print the full quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a hotelRates JSON document
    Validate {
        /// Path to the rate configuration
        #[arg(long)]
        config: PathBuf,
    },
}

fn quote(catalog: PathBuf, hotel: String, check_in: &str, check_out: &str, json: bool) -> Result<()> {
    let runner = QuoteRunner::from_catalog_path(&catalog)
        .with_context(|| format!("failed to load catalog {}", catalog.display()))?;

    let check_in = parse_date(check_in).map_err(anyhow::Error::msg)?;
    let check_out = parse_date(check_out).map_err(anyhow::Error::msg)?;
    let stay = StayRequest::new("cli", hotel, check_in, check_out);
    let quote = runner.quote(&stay)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    let name = runner
        .catalog()
        .get(&stay.hotel_id)
        .map(|hotel| hotel.name.as_str())
        .unwrap_or_default();
    println!("{} ({})", name, stay.hotel_id);
    println!("  Check-in:  {}", stay.check_in);
    println!("  Check-out: {}", stay.check_out);
    println!();

    let view = &quote.view;
    if let Some(message) = &view.message {
        println!("{}", message);
        return Ok(());
    }

    println!("{:>10} {:>4} {:>18} {:>10}", "Date", "Day", "Rate Type", "Rate");
    println!("{}", "-".repeat(46));
    for day in &quote.summary.daily_rates {
        println!(
            "{:>10} {:>4} {:>18} {:>10.2}",
            day.date.to_string(),
            day.date.format("%a").to_string(),
            day.rate_type.to_string(),
            day.rate
        );
    }

    println!("\nBreakdown:");
    for line in &view.breakdown {
        println!(
            "  {:<20} {:>3} night(s) {:>12.2} (avg {:.2})",
            line.label, line.nights, line.total_rate, line.average_rate
        );
    }

    println!("\nSummary:");
    println!("  Nights:   {} ({} weekend, {} weekday)", view.nights, view.weekend_nights, view.weekday_nights);
    println!("  Total:    {:.2}", view.total_rate);
    println!("  Average:  {:.2}", view.average_rate);
    Ok(())
}

fn validate(path: PathBuf) -> Result<bool> {
    let file = File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
    let input: RateConfigInput = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let report = validate_rate_config(&input);
    for error in &report.errors {
        println!("error:   {}", error);
    }
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }

    if report.valid {
        println!("{}: valid ({} warning(s))", path.display(), report.warnings.len());
    } else {
        println!("{}: {} error(s)", path.display(), report.errors.len());
    }
    Ok(report.valid)
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::Quote {
            catalog,
            hotel,
            check_in,
            check_out,
            json,
        } => {
            if hotel.trim().is_empty() {
                bail!("--hotel must not be empty");
            }
            quote(catalog, hotel, &check_in, &check_out, json)?;
            Ok(true)
        }
        Command::Validate { config } => validate(config),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
