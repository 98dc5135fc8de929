// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, Coordinate, NearbyService, NewService, RankingWeights, ScoredService,
    SearchPolicy, SearchRequest, ServiceRecord, Urgency,
};
pub use requests::{HelpRequest, ListServicesQuery};
pub use responses::{
    ErrorResponse, HealthResponse, HelpResponse, Pagination, ServiceListResponse,
    ServiceTypesResponse, UploadResponse,
};
