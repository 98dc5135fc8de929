// Service exports
pub mod geocoding;
pub mod postgres;
pub mod store;

pub use geocoding::{GeocodeError, GeocodedLocation, GeocodingClient};
pub use postgres::PostgresStore;
pub use store::{ServiceStore, StoreError};
