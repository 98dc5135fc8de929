// Core algorithm exports
pub mod distance;
pub mod engine;
pub mod filters;
pub mod scoring;

pub use distance::{bounding_box, haversine_km, within_bounding_box};
pub use engine::{MatchEngine, MatchOutcome, SearchError};
pub use filters::{extract_service_hint, filter_by_type, QueryHint, TypeMatch, URGENT_CATEGORIES};
pub use scoring::{composite_score, rank_candidates};
