use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{extract_service_hint, MatchEngine, SearchError};
use crate::models::{Coordinate, ErrorResponse, HelpRequest, HelpResponse, SearchRequest};
use crate::routes::store_error_response;
use crate::services::{GeocodingClient, PostgresStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PostgresStore>,
    pub geocoder: Arc<GeocodingClient>,
    pub engine: MatchEngine,
}

/// Configure search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/help", web::post().to(get_help));
}

/// Find nearby services for a help query
///
/// POST /api/v1/help
///
/// Request body:
/// ```json
/// {
///   "query": "need ambulance near downtown",
///   "latitude": 40.7128,
///   "longitude": -74.0060,
///   "service_type": "ambulance",
///   "urgency": "high",
///   "limit": 10,
///   "radius_km": 15.0
/// }
/// ```
///
/// When `service_type` is absent it is extracted from the query text; a
/// mentioned place name is geocoded best-effort and becomes the search
/// origin. Geocoding failure falls back to the user coordinate.
async fn get_help(state: web::Data<AppState>, req: web::Json<HelpRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for help request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let (Some(latitude), Some(longitude)) = (req.latitude, req.longitude) else {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Missing coordinates".to_string(),
            message: "Location coordinates are required".to_string(),
            status_code: 400,
        });
    };

    let user_coordinate = Coordinate::new(latitude, longitude);
    let urgency = req.urgency.unwrap_or_default();

    // Take the requested type as-is, or pull a hint out of the query text
    let (service_type, mentioned_place) = match &req.service_type {
        Some(service_type) => (Some(service_type.clone()), None),
        None => {
            let hint = extract_service_hint(&req.query);
            (hint.service_type, hint.place)
        }
    };

    // A mentioned place shifts the search origin; failure to resolve it is
    // logged and the user coordinate stands
    let mut origin = user_coordinate;
    let mut target_location = "your current location".to_string();

    if let Some(place) = mentioned_place {
        match state.geocoder.geocode(&place).await {
            Ok(Some(resolved)) => {
                origin = Coordinate::new(resolved.latitude, resolved.longitude);
                target_location = resolved.display_name;
            }
            Ok(None) => {
                tracing::debug!("No geocoding result for '{}'", place);
            }
            Err(e) => {
                tracing::warn!("Geocoding failed for '{}': {}", place, e);
            }
        }
    }

    let search_request = SearchRequest {
        origin,
        service_type: service_type.clone(),
        urgency,
        limit: req.limit.map(|limit| limit as usize),
        max_radius_km: req.radius_km,
    };

    let outcome = match state.engine.search(state.store.as_ref(), &search_request).await {
        Ok(outcome) => outcome,
        Err(SearchError::InvalidInput(message)) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid input".to_string(),
                message,
                status_code: 400,
            });
        }
        Err(SearchError::Store(e)) => {
            tracing::error!("Store failure during search: {}", e);
            return store_error_response(&e);
        }
    };

    tracing::info!(
        "Returning {} services for '{}' (from {} candidates, radius {}km)",
        outcome.services.len(),
        req.query,
        outcome.total_candidates,
        outcome.radius_km
    );

    let message = if outcome.services.is_empty() {
        Some(format!(
            "No {} services found within {}km of the target location. \
             Try increasing the search radius or selecting a different service type.",
            service_type.as_deref().unwrap_or("matching"),
            outcome.radius_km
        ))
    } else {
        None
    };

    let nearby_services = outcome
        .services
        .into_iter()
        .map(|mut service| {
            service.distance_km = round2(service.distance_km);
            service.match_score = round2(service.match_score);
            service
        })
        .collect();

    HttpResponse::Ok().json(HelpResponse {
        original_query: req.query.clone(),
        understood_service: service_type,
        target_location,
        target_coordinates: [origin.latitude, origin.longitude],
        user_coordinates: [user_coordinate.latitude, user_coordinate.longitude],
        urgency,
        radius_km: outcome.radius_km,
        type_relaxed: outcome.type_relaxed,
        nearby_services,
        message,
    })
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
