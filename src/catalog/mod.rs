//! Hotel rate configurations keyed by hotel id

mod store;
pub mod loader;

pub use store::{HotelRates, RateCatalog, RateConfigStore};
pub use loader::{load_catalog, load_catalog_from_reader, load_default_catalog};
