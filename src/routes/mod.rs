// Route exports
pub mod catalog;
pub mod search;

use actix_web::{web, HttpResponse};

use crate::models::ErrorResponse;
use crate::services::StoreError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(catalog::configure)
            .configure(search::configure),
    );
}

/// Map store failures onto HTTP: exhausted pool is a gateway timeout,
/// anything else means the backend is unavailable.
pub(crate) fn store_error_response(error: &StoreError) -> HttpResponse {
    match error {
        StoreError::Timeout(message) => HttpResponse::GatewayTimeout().json(ErrorResponse {
            error: "Store timeout".to_string(),
            message: message.clone(),
            status_code: 504,
        }),
        StoreError::Unavailable(message) => {
            HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: "Store unavailable".to_string(),
                message: message.clone(),
                status_code: 503,
            })
        }
    }
}
