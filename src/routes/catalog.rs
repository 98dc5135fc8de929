use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    ErrorResponse, HealthResponse, ListServicesQuery, NewService, Pagination, ServiceListResponse,
    ServiceTypesResponse, UploadResponse,
};
use crate::routes::search::AppState;
use crate::routes::store_error_response;

const EXPECTED_COLUMNS: [&str; 11] = [
    "name", "type", "location", "address", "mobile_no", "timings", "cost", "available",
    "latitude", "longitude", "contact",
];

/// Configure catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/services", web::post().to(add_service))
        .route("/services/upload", web::post().to(upload_services))
        .route("/services", web::get().to(list_services))
        .route("/service-types", web::get().to(list_service_types));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Add a single service
///
/// POST /api/v1/services
///
/// Invalid records (out-of-range coordinates, empty name or type) are
/// rejected with 400 and never reach the store.
async fn add_service(
    state: web::Data<AppState>,
    req: web::Json<NewService>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for add_service request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.store.insert_services(&[req.into_inner()]).await {
        Ok(inserted) => HttpResponse::Ok().json(UploadResponse {
            message: "Service added successfully.".to_string(),
            inserted,
        }),
        Err(e) => {
            tracing::error!("Failed to insert service: {}", e);
            store_error_response(&e)
        }
    }
}

/// Bulk CSV ingest
///
/// POST /api/v1/services/upload
///
/// The request body is the CSV text itself. Any invalid row rejects the
/// whole upload with its row number; nothing is stored partially.
async fn upload_services(state: web::Data<AppState>, body: String) -> impl Responder {
    let services = match parse_csv(&body) {
        Ok(services) => services,
        Err(message) => {
            tracing::info!("CSV upload rejected: {}", message);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid CSV".to_string(),
                message,
                status_code: 400,
            });
        }
    };

    match state.store.insert_services(&services).await {
        Ok(inserted) => HttpResponse::Ok().json(UploadResponse {
            message: format!("{} services uploaded successfully.", inserted),
            inserted,
        }),
        Err(e) => {
            tracing::error!("Failed to insert uploaded services: {}", e);
            store_error_response(&e)
        }
    }
}

/// Paginated service listing with optional type filter
///
/// GET /api/v1/services?skip=&limit=&type=
async fn list_services(
    state: web::Data<AppState>,
    query: web::Query<ListServicesQuery>,
) -> impl Responder {
    let skip = query.skip.max(0);
    let limit = query.limit.clamp(1, 500);

    match state
        .store
        .list_services(skip, limit, query.service_type.as_deref())
        .await
    {
        Ok((services, total)) => HttpResponse::Ok().json(ServiceListResponse {
            pagination: Pagination {
                total,
                offset: skip,
                limit,
                has_more: (skip + limit) < total,
            },
            services,
        }),
        Err(e) => {
            tracing::error!("Failed to list services: {}", e);
            store_error_response(&e)
        }
    }
}

/// Distinct service types
///
/// GET /api/v1/service-types
async fn list_service_types(state: web::Data<AppState>) -> impl Responder {
    match state.store.service_types().await {
        Ok(service_types) => HttpResponse::Ok().json(ServiceTypesResponse { service_types }),
        Err(e) => {
            tracing::error!("Failed to fetch service types: {}", e);
            store_error_response(&e)
        }
    }
}

/// Parse CSV text into validated services.
///
/// Row numbers in errors count the header as row 1.
fn parse_csv(text: &str) -> Result<Vec<NewService>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("unreadable header: {}", e))?
        .clone();

    for column in EXPECTED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(format!("missing column: {}", column));
        }
    }

    let mut services = Vec::new();
    for (index, row) in reader.deserialize::<NewService>().enumerate() {
        let row_number = index + 2;
        let service = row.map_err(|e| format!("row {}: {}", row_number, e))?;
        service
            .validate()
            .map_err(|e| format!("row {}: {}", row_number, e))?;
        services.push(service);
    }

    Ok(services)
}
