use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Urgency;

/// Request to find nearby services for a help query
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HelpRequest {
    #[validate(length(min = 1))]
    pub query: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Requested service type; extracted from the query text when absent.
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub limit: Option<u16>,
    /// Radius ceiling in km for this search.
    #[serde(default)]
    pub radius_km: Option<f64>,
}

/// Query parameters for the service listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ListServicesQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(rename = "type", default)]
    pub service_type: Option<String>,
}

fn default_list_limit() -> i64 {
    100
}
