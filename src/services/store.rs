use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Coordinate, NearbyService};

/// Errors surfaced by the service catalog store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store timed out: {0}")]
    Timeout(String),
}

/// Radius query capability the match engine depends on.
///
/// The store owns its own connection discipline; the engine only issues read
/// queries through this interface and never holds a database handle itself.
/// An empty result is a valid outcome, not an error.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    /// All searchable records within `radius_km` of `origin`, paired with
    /// their great-circle distance from it, nearest first.
    async fn find_within_radius(
        &self,
        origin: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<NearbyService>, StoreError>;
}
