//! Stay requests and batch loading

mod data;
pub mod loader;

pub use data::{StayRequest, MAX_STAY_NIGHTS};
pub use loader::{load_stays, load_stays_from_reader, load_default_stays};
