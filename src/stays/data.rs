//! Stay request data structure

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Longest stay that will be priced
pub const MAX_STAY_NIGHTS: i64 = 365;

/// A requested stay at one hotel
///
/// `check_out` is exclusive: the guest does not pay for the check-out night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayRequest {
    pub stay_id: String,
    pub hotel_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayRequest {
    pub fn new(
        stay_id: impl Into<String>,
        hotel_id: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Self {
        Self {
            stay_id: stay_id.into(),
            hotel_id: hotel_id.into(),
            check_in,
            check_out,
        }
    }

    /// Number of nights, zero or negative for an invalid range
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}
