use serde::{Deserialize, Serialize};

use crate::models::domain::{ScoredService, ServiceRecord, Urgency};

/// Response for the help endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpResponse {
    pub original_query: String,
    pub understood_service: Option<String>,
    pub target_location: String,
    pub target_coordinates: [f64; 2],
    pub user_coordinates: [f64; 2],
    pub urgency: Urgency,
    /// Radius actually searched, in km.
    pub radius_km: f64,
    /// True when the requested type matched nothing and the nearest services
    /// overall were returned instead.
    pub type_relaxed: bool,
    pub nearby_services: Vec<ScoredService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Pagination metadata for listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
    pub has_more: bool,
}

/// Response for the service listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceListResponse {
    pub pagination: Pagination,
    pub services: Vec<ServiceRecord>,
}

/// Response for the service types endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceTypesResponse {
    pub service_types: Vec<String>,
}

/// Response for ingest endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub inserted: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
