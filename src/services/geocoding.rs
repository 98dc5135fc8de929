use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while geocoding a place name
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("geocoder returned error: {0}")]
    ApiError(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// A resolved place
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// Nominatim responds with coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// Nominatim geocoding client
///
/// Resolves free-text place names to coordinates. Results (including "place
/// not found") are cached in memory keyed by the query string, so repeated
/// place names don't re-hit the provider.
pub struct GeocodingClient {
    base_url: String,
    user_agent: String,
    client: Client,
    cache: moka::future::Cache<String, Option<GeocodedLocation>>,
}

impl GeocodingClient {
    pub fn new(
        base_url: String,
        user_agent: String,
        timeout_secs: u64,
        cache_size: u64,
        cache_ttl_secs: u64,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        let cache = moka::future::CacheBuilder::new(cache_size)
            .time_to_live(Duration::from_secs(cache_ttl_secs))
            .build();

        Ok(Self {
            base_url,
            user_agent,
            client,
            cache,
        })
    }

    /// Resolve a place name to coordinates.
    ///
    /// Returns `Ok(None)` when the provider knows no such place; that is a
    /// valid outcome, not an error. Provider failures are errors and are
    /// never cached.
    pub async fn geocode(&self, place: &str) -> Result<Option<GeocodedLocation>, GeocodeError> {
        let key = place.trim().to_lowercase();
        if key.is_empty() {
            return Ok(None);
        }

        if let Some(cached) = self.cache.get(&key).await {
            tracing::trace!("Geocode cache hit: {}", key);
            return Ok(cached);
        }

        let resolved = self.fetch(&key).await?;
        self.cache.insert(key, resolved.clone()).await;

        Ok(resolved)
    }

    async fn fetch(&self, place: &str) -> Result<Option<GeocodedLocation>, GeocodeError> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(place)
        );

        tracing::debug!("Geocoding: {}", place);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "geocoding request failed: {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await?;

        let Some(first) = places.into_iter().next() else {
            return Ok(None);
        };

        let latitude: f64 = first
            .lat
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse(format!("bad latitude: {}", first.lat)))?;
        let longitude: f64 = first
            .lon
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse(format!("bad longitude: {}", first.lon)))?;

        Ok(Some(GeocodedLocation {
            latitude,
            longitude,
            display_name: first.display_name.unwrap_or_else(|| place.to_string()),
        }))
    }
}
