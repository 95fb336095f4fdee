//! AWS Lambda handler for quoting stays
//!
//! Accepts a stay via JSON and returns the priced nights, the summary view
//! and the validation report of the configuration that was used. Rates come
//! either inline (`hotelRates`, as posted by the hotel editor) or from the
//! catalog by `hotelId`.
//!
//! Supports Lambda Function URLs for direct HTTP access.
//! Environment:
//!   RATE_CATALOG_PATH  hotel catalog JSON (default: data/hotels.json)

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use hotel_rates::catalog::{load_catalog, loader::DEFAULT_CATALOG_PATH};
use chrono::NaiveDate;
use hotel_rates::rates::{
    get_rate_summary, parse_date, validate_rate_config, RateConfigInput, RateConfiguration,
    RateEngine, RateSummaryView, StaySummary, ValidationReport,
};
use hotel_rates::stays::MAX_STAY_NIGHTS;
use hotel_rates::{RateCatalog, RateConfigStore};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;

/// Input for a quote
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Catalog hotel to quote when no inline rates are given
    #[serde(default)]
    pub hotel_id: Option<String>,

    /// Inline rate configuration, takes precedence over `hotel_id`
    #[serde(default)]
    pub hotel_rates: Option<RateConfigInput>,

    pub check_in_date: String,
    pub check_out_date: String,
}

/// Output for a quote
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<String>,
    pub summary: StaySummary,
    pub view: RateSummaryView,
    pub validation: ValidationReport,
    pub execution_time_ms: u64,
}

/// Body returned when inline rates fail validation
#[derive(Debug, Serialize)]
struct InvalidConfigResponse<'a> {
    error: &'a str,
    validation: ValidationReport,
}

fn response(status: i64, body: Option<String>) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut response = LambdaFunctionUrlResponse {
        status_code: status,
        headers: Default::default(),
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    };
    response.headers.insert("content-type", "application/json".parse()?);
    response.headers.insert("access-control-allow-origin", "*".parse()?);
    response.headers.insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    response.headers.insert("access-control-allow-headers", "Content-Type".parse()?);
    Ok(response)
}

fn json_response<T: Serialize>(status: i64, body: &T) -> Result<LambdaFunctionUrlResponse, Error> {
    response(status, Some(serde_json::to_string(body)?))
}

fn error_response(status: i64, message: &str) -> Result<LambdaFunctionUrlResponse, Error> {
    json_response(status, &serde_json::json!({ "error": message }))
}

/// Parse the requested dates and refuse ranges longer than `MAX_STAY_NIGHTS`
fn parse_stay(request: &QuoteRequest) -> Result<(NaiveDate, NaiveDate), String> {
    let check_in = parse_date(&request.check_in_date)?;
    let check_out = parse_date(&request.check_out_date)?;
    let nights = (check_out - check_in).num_days();
    if nights > MAX_STAY_NIGHTS {
        return Err(format!(
            "Stay of {} nights exceeds the limit of {}",
            nights, MAX_STAY_NIGHTS
        ));
    }
    Ok((check_in, check_out))
}

/// Resolve the configuration to price against, or the HTTP error to return
fn resolve_config(
    request: &QuoteRequest,
    catalog: &RateCatalog,
) -> Result<RateConfiguration, Result<LambdaFunctionUrlResponse, Error>> {
    if let Some(input) = &request.hotel_rates {
        let report = validate_rate_config(input);
        if !report.valid {
            return Err(json_response(
                422,
                &InvalidConfigResponse {
                    error: "invalid hotelRates",
                    validation: report,
                },
            ));
        }
        return RateConfiguration::try_from(input.clone())
            .map_err(|err| error_response(422, &err.to_string()));
    }

    match request.hotel_id.as_deref() {
        Some(hotel_id) => catalog
            .rate_config(hotel_id)
            .cloned()
            .ok_or_else(|| error_response(404, &format!("Unknown hotel: {}", hotel_id))),
        None => Err(error_response(400, "Either hotelId or hotelRates is required")),
    }
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
    catalog: Arc<RateCatalog>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return response(200, None);
    }

    if request.is_base64_encoded {
        return error_response(400, "Binary request bodies are not supported");
    }

    let body = request.body.as_deref().unwrap_or("{}");
    let quote_request: QuoteRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let (check_in, check_out) = match parse_stay(&quote_request) {
        Ok(dates) => dates,
        Err(e) => return error_response(400, &e),
    };

    let engine = match resolve_config(&quote_request, &catalog) {
        Ok(config) => RateEngine::new(config),
        Err(response) => return response,
    };

    let summary = engine.stay_rates(check_in, check_out);
    let view = get_rate_summary(&summary);
    log::info!(
        "quoted {} night(s) {} to {}: available={} total={:.2}",
        summary.nights,
        check_in,
        check_out,
        summary.available,
        summary.total_rate
    );

    let body = QuoteResponse {
        hotel_id: quote_request.hotel_id,
        summary,
        view,
        validation: engine.config().validate(),
        execution_time_ms: start.elapsed().as_millis() as u64,
    };
    json_response(200, &body)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let catalog_path =
        env::var("RATE_CATALOG_PATH").unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string());
    let catalog = match load_catalog(&catalog_path) {
        Ok(catalog) => catalog,
        Err(err) => {
            log::warn!("no catalog loaded from {}: {}; only inline hotelRates can be quoted", catalog_path, err);
            RateCatalog::new()
        }
    };
    let catalog = Arc::new(catalog);

    run(service_fn(move |event| handler(event, Arc::clone(&catalog)))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_rates::HotelRates;
    use serde_json::json;

    fn request(body: serde_json::Value) -> QuoteRequest {
        serde_json::from_value(body).unwrap()
    }

    fn catalog() -> RateCatalog {
        RateCatalog::from_hotels(vec![HotelRates {
            hotel_id: "city".to_string(),
            name: "City Inn".to_string(),
            hotel_rates: RateConfiguration::new(2000.0).with_weekend_rate(2500.0),
        }])
    }

    fn status(result: Result<RateConfiguration, Result<LambdaFunctionUrlResponse, Error>>) -> i64 {
        result.unwrap_err().unwrap().status_code
    }

    #[test]
    fn test_inline_rates_take_precedence() {
        let req = request(json!({
            "hotelId": "city",
            "hotelRates": { "defaultRate": 1500 },
            "checkInDate": "2024-07-15",
            "checkOutDate": "2024-07-17"
        }));
        let config = resolve_config(&req, &catalog()).unwrap();
        assert_eq!(config.default_rate, 1500.0);
    }

    #[test]
    fn test_catalog_hotel_resolved() {
        let req = request(json!({
            "hotelId": "city",
            "checkInDate": "2024-07-15",
            "checkOutDate": "2024-07-17"
        }));
        let config = resolve_config(&req, &catalog()).unwrap();
        assert_eq!(config.weekend_rate(), 2500.0);
    }

    #[test]
    fn test_invalid_inline_rates_unprocessable() {
        let req = request(json!({
            "hotelRates": { "defaultRate": 0 },
            "checkInDate": "2024-07-15",
            "checkOutDate": "2024-07-17"
        }));
        assert_eq!(status(resolve_config(&req, &catalog())), 422);
    }

    #[test]
    fn test_unknown_hotel_not_found() {
        let req = request(json!({
            "hotelId": "nowhere",
            "checkInDate": "2024-07-15",
            "checkOutDate": "2024-07-17"
        }));
        assert_eq!(status(resolve_config(&req, &catalog())), 404);
    }

    #[test]
    fn test_missing_rate_source_bad_request() {
        let req = request(json!({
            "checkInDate": "2024-07-15",
            "checkOutDate": "2024-07-17"
        }));
        assert_eq!(status(resolve_config(&req, &catalog())), 400);
    }

    #[test]
    fn test_stay_length_limit() {
        let huge = request(json!({
            "hotelId": "city",
            "checkInDate": "0001-01-01",
            "checkOutDate": "9999-12-31"
        }));
        assert!(parse_stay(&huge).unwrap_err().contains("exceeds the limit"));

        let week = request(json!({
            "hotelId": "city",
            "checkInDate": "2024-07-15",
            "checkOutDate": "2024-07-22T00:00:00Z"
        }));
        let (check_in, check_out) = parse_stay(&week).unwrap();
        assert_eq!((check_out - check_in).num_days(), 7);

        let bad = request(json!({
            "hotelId": "city",
            "checkInDate": "not-a-date",
            "checkOutDate": "2024-07-22"
        }));
        assert!(parse_stay(&bad).is_err());
    }
}
