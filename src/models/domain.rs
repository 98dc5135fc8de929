use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A geographic point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether the point lies within the valid WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A catalogued service record with its location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub timings: Option<String>,
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub contact: Option<String>,
}

impl ServiceRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

fn default_true() -> bool {
    true
}

/// A service submitted for ingest, before the store assigns an identifier.
///
/// Coordinates are range-checked at ingest; records failing validation are
/// rejected, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewService {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub service_type: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub timings: Option<String>,
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub contact: Option<String>,
}

/// How pressing the caller's need is. High urgency boosts services in the
/// urgent categories; it never filters candidates out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[serde(alias = "Low")]
    Low,
    #[default]
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

impl Urgency {
    pub fn is_elevated(&self) -> bool {
        matches!(self, Urgency::High)
    }
}

/// Parameters for one nearby-service search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub origin: Coordinate,
    /// Requested service type; `None` means "any".
    pub service_type: Option<String>,
    pub urgency: Urgency,
    /// Maximum results wanted; `None` uses the configured default.
    pub limit: Option<usize>,
    /// Radius ceiling in km; `None` uses the configured default.
    pub max_radius_km: Option<f64>,
}

/// A candidate returned by the store: a record paired with its distance from
/// the search origin. The distance is computed once and reused for filtering
/// and ranking.
#[derive(Debug, Clone)]
pub struct NearbyService {
    pub record: ServiceRecord,
    pub distance_km: f64,
}

/// A ranked search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredService {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location: Option<String>,
    pub address: Option<String>,
    pub mobile_no: Option<String>,
    pub timings: Option<String>,
    pub cost: Option<String>,
    pub available: bool,
    pub contact: Option<String>,
    pub distance_km: f64,
    pub match_score: f64,
}

impl ScoredService {
    pub fn from_candidate(candidate: NearbyService, match_score: f64) -> Self {
        let NearbyService { record, distance_km } = candidate;
        Self {
            id: record.id,
            name: record.name,
            service_type: record.service_type,
            latitude: record.latitude,
            longitude: record.longitude,
            location: record.location,
            address: record.address,
            mobile_no: record.mobile_no,
            timings: record.timings,
            cost: record.cost,
            available: record.available,
            contact: record.contact,
            distance_km,
            match_score,
        }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Ranking weights
#[derive(Debug, Clone, Copy)]
pub struct RankingWeights {
    pub distance: f64,
    pub type_match: f64,
    pub urgency: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            distance: 0.55,
            type_match: 0.25,
            urgency: 0.20,
        }
    }
}

/// Radius-expansion and result-size policy
#[derive(Debug, Clone, Copy)]
pub struct SearchPolicy {
    /// Radius of the first store query, in km.
    pub initial_radius_km: f64,
    /// Default radius ceiling when the request does not carry one.
    pub max_radius_km: f64,
    /// Maximum number of radius doublings per search.
    pub max_expansions: u32,
    /// Stop expanding once candidates reach `overfetch_factor * limit`.
    pub overfetch_factor: usize,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            initial_radius_km: 2.0,
            max_radius_km: 20.0,
            max_expansions: 5,
            overfetch_factor: 5,
            default_limit: 20,
            max_limit: 100,
        }
    }
}
