//! Beacon Locator - Nearby-service matching engine for emergency services
//!
//! This library locates emergency and general services near a coordinate,
//! filtered by requested type and urgency. The core is a radius-bounded
//! search with bounded expansion, type filtering by precedence, and
//! composite-score ranking.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::{bounding_box, haversine_km},
    MatchEngine, MatchOutcome, SearchError,
};
pub use crate::models::{
    Coordinate, NearbyService, RankingWeights, ScoredService, SearchPolicy, SearchRequest,
    ServiceRecord, Urgency,
};
pub use crate::services::{ServiceStore, StoreError};
