// Integration tests for Beacon Locator
//
// Exercises the match engine end-to-end against an in-memory store that
// counts its queries, covering the search pipeline's observable properties.

use async_trait::async_trait;
use beacon_locator::core::{haversine_km, MatchEngine, SearchError};
use beacon_locator::models::{
    Coordinate, NearbyService, RankingWeights, SearchPolicy, SearchRequest, ServiceRecord, Urgency,
};
use beacon_locator::services::{ServiceStore, StoreError};
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

const ORIGIN: Coordinate = Coordinate {
    latitude: 40.7128,
    longitude: -74.0060,
};

struct StaticStore {
    records: Vec<ServiceRecord>,
    calls: AtomicUsize,
}

impl StaticStore {
    fn new(records: Vec<ServiceRecord>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServiceStore for StaticStore {
    async fn find_within_radius(
        &self,
        origin: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<NearbyService>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut nearby: Vec<NearbyService> = self
            .records
            .iter()
            .map(|record| NearbyService {
                record: record.clone(),
                distance_km: haversine_km(origin, record.coordinate()),
            })
            .filter(|c| c.distance_km <= radius_km)
            .collect();

        nearby.sort_by(|a, b| a.distance_km.partial_cmp(&b.distance_km).unwrap());
        Ok(nearby)
    }
}

fn record(id: u128, service_type: &str, lat: f64, lon: f64) -> ServiceRecord {
    ServiceRecord {
        id: Uuid::from_u128(id),
        name: format!("Service {}", id),
        service_type: service_type.to_string(),
        latitude: lat,
        longitude: lon,
        location: None,
        address: None,
        mobile_no: None,
        timings: None,
        cost: None,
        available: true,
        contact: None,
    }
}

fn request() -> SearchRequest {
    SearchRequest {
        origin: ORIGIN,
        service_type: None,
        urgency: Urgency::Medium,
        limit: None,
        max_radius_km: None,
    }
}

#[tokio::test]
async fn test_end_to_end_search() {
    let engine = MatchEngine::with_defaults();
    let store = StaticStore::new(vec![
        record(1, "hospital", 40.72, -74.01),
        record(2, "clinic", 40.715, -74.005),
        record(3, "bakery", 40.714, -74.004),
        record(4, "hospital", 40.73, -74.02),
        record(5, "hospital", 41.5, -74.0), // ~90km away, outside any radius
    ]);

    let mut req = request();
    req.service_type = Some("hospital".to_string());

    let outcome = engine.search(&store, &req).await.unwrap();

    // Exact matches only, sorted by score, all within the searched radius
    assert!(!outcome.services.is_empty());
    assert!(!outcome.type_relaxed);
    for service in &outcome.services {
        assert_eq!(service.service_type, "hospital");
        assert!(service.distance_km <= outcome.radius_km);
    }
    for pair in outcome.services.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score - 1e-6);
    }
}

#[tokio::test]
async fn test_store_calls_bounded() {
    let engine = MatchEngine::with_defaults();
    let store = StaticStore::new(vec![]);

    let outcome = engine.search(&store, &request()).await.unwrap();

    // Empty store at maximum radius is a valid empty outcome
    assert!(outcome.services.is_empty());
    assert!(!outcome.type_relaxed);
    assert!(store.call_count() <= engine.policy().max_expansions as usize + 1);
}

#[tokio::test]
async fn test_invalid_origin_never_reaches_store() {
    let engine = MatchEngine::with_defaults();
    let store = StaticStore::new(vec![record(1, "hospital", 40.72, -74.01)]);

    let mut req = request();
    req.origin = Coordinate::new(200.0, -74.0);

    let result = engine.search(&store, &req).await;

    assert!(matches!(result, Err(SearchError::InvalidInput(_))));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_radius_ceiling_never_exceeded() {
    let engine = MatchEngine::with_defaults();
    // Records scattered from ~1km to ~30km north
    let records: Vec<ServiceRecord> = (1..=30)
        .map(|i| record(i, "hospital", 40.7128 + i as f64 * 0.009, -74.0060))
        .collect();
    let store = StaticStore::new(records);

    let mut req = request();
    req.max_radius_km = Some(8.0);
    req.limit = Some(30);

    let outcome = engine.search(&store, &req).await.unwrap();

    assert!(outcome.radius_km <= 8.0);
    for service in &outcome.services {
        assert!(service.distance_km <= 8.0);
    }
}

#[tokio::test]
async fn test_tie_break_by_distance_then_id() {
    let engine = MatchEngine::with_defaults();
    // Two records at the same spot, one farther, identical type match
    let store = StaticStore::new(vec![
        record(2, "hospital", 40.7218, -74.0060),
        record(1, "hospital", 40.7218, -74.0060),
        record(3, "hospital", 40.7308, -74.0060),
    ]);

    let mut req = request();
    req.service_type = Some("hospital".to_string());

    let outcome = engine.search(&store, &req).await.unwrap();

    assert_eq!(outcome.services.len(), 3);
    assert_eq!(outcome.services[0].id, Uuid::from_u128(1));
    assert_eq!(outcome.services[1].id, Uuid::from_u128(2));
    assert_eq!(outcome.services[2].id, Uuid::from_u128(3));
}

#[tokio::test]
async fn test_type_fallback_returns_nearest_with_flag() {
    let engine = MatchEngine::with_defaults();
    let store = StaticStore::new(vec![
        record(1, "hospital", 40.72, -74.01),
        record(2, "bakery", 40.715, -74.005),
    ]);

    let mut req = request();
    req.service_type = Some("dentist".to_string());

    let outcome = engine.search(&store, &req).await.unwrap();

    assert!(!outcome.services.is_empty());
    assert!(outcome.type_relaxed);
}

#[tokio::test]
async fn test_urgency_reorders_but_never_filters() {
    let engine = MatchEngine::with_defaults();
    let store = StaticStore::new(vec![
        record(1, "bakery", 40.72, -74.01),
        record(2, "ambulance", 40.72, -74.01),
    ]);

    let mut req = request();
    req.urgency = Urgency::High;

    let outcome = engine.search(&store, &req).await.unwrap();

    // The bakery is boosted below the ambulance, not dropped
    assert_eq!(outcome.services.len(), 2);
    assert_eq!(outcome.services[0].service_type, "ambulance");

    let mut req = request();
    req.urgency = Urgency::Low;

    let outcome = engine.search(&store, &req).await.unwrap();
    assert_eq!(outcome.services[0].id, Uuid::from_u128(1));
}

#[tokio::test]
async fn test_custom_policy_and_weights() {
    let policy = SearchPolicy {
        initial_radius_km: 1.0,
        max_radius_km: 4.0,
        max_expansions: 2,
        overfetch_factor: 3,
        default_limit: 5,
        max_limit: 10,
    };
    let engine = MatchEngine::new(RankingWeights::default(), policy);

    // ~6km away: unreachable within the 4km ceiling
    let store = StaticStore::new(vec![record(1, "hospital", 40.7668, -74.0060)]);

    let outcome = engine.search(&store, &request()).await.unwrap();

    assert!(outcome.services.is_empty());
    assert!(outcome.radius_km <= 4.0);
    assert!(store.call_count() <= 3);
}
