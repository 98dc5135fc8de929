use thiserror::Error;

use crate::core::filters::filter_by_type;
use crate::core::scoring::rank_candidates;
use crate::models::{RankingWeights, ScoredService, SearchPolicy, SearchRequest};
use crate::services::store::{ServiceStore, StoreError};

/// Errors surfaced by the match engine
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed coordinate or nonsensical limit/radius. Rejected before any
    /// store query is issued.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Store failure, passed through unchanged so the caller keeps the
    /// original failure context.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ordered search outcome with the context needed to interpret it.
#[derive(Debug)]
pub struct MatchOutcome {
    pub services: Vec<ScoredService>,
    /// Radius actually searched, in km.
    pub radius_km: f64,
    /// True when the requested type matched nothing and the constraint was
    /// dropped. An empty `services` with `type_relaxed = false` means no
    /// records were found at all.
    pub type_relaxed: bool,
    /// Candidate count before filtering and truncation.
    pub total_candidates: usize,
}

/// Nearby-service match engine
///
/// # Pipeline Stages
/// 1. Radius-bounded retrieval with bounded expansion
/// 2. Type filtering by precedence (exact, keyword, any)
/// 3. Scoring and ranking with urgency boost
/// 4. Truncation to the requested limit
///
/// Holds only fixed configuration; each search is stateless, so concurrent
/// requests need no locking at this layer.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    weights: RankingWeights,
    policy: SearchPolicy,
}

impl MatchEngine {
    pub fn new(weights: RankingWeights, policy: SearchPolicy) -> Self {
        Self { weights, policy }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: RankingWeights::default(),
            policy: SearchPolicy::default(),
        }
    }

    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Find the most relevant services near the request origin.
    ///
    /// Issues at most `max_expansions + 1` store queries: the radius starts
    /// small and doubles (capped at the ceiling) while too few candidates
    /// have been seen. "No results" is a valid empty outcome, never an error.
    pub async fn search<S>(
        &self,
        store: &S,
        request: &SearchRequest,
    ) -> Result<MatchOutcome, SearchError>
    where
        S: ServiceStore + ?Sized,
    {
        let (limit, ceiling) = self.validate(request)?;

        let mut radius_km = self.policy.initial_radius_km.min(ceiling);
        let mut candidates = store.find_within_radius(request.origin, radius_km).await?;
        let mut expansions = 0;

        while candidates.len() < limit && radius_km < ceiling && expansions < self.policy.max_expansions
        {
            radius_km = (radius_km * 2.0).min(ceiling);
            candidates = store.find_within_radius(request.origin, radius_km).await?;
            expansions += 1;

            // Enough to rank already; stop regardless of remaining budget
            if candidates.len() >= self.policy.overfetch_factor * limit {
                break;
            }
        }

        tracing::debug!(
            radius_km,
            expansions,
            candidates = candidates.len(),
            "radius search settled"
        );

        // The ceiling is a hard bound even when the store over-returns
        candidates.retain(|c| c.distance_km <= radius_km);
        let total_candidates = candidates.len();

        let filtered = filter_by_type(candidates, request.service_type.as_deref());
        let services = rank_candidates(
            filtered.candidates,
            radius_km,
            filtered.match_level,
            request.urgency,
            &self.weights,
            limit,
        );

        Ok(MatchOutcome {
            services,
            radius_km,
            type_relaxed: filtered.relaxed,
            total_candidates,
        })
    }

    /// Reject malformed requests before any store query; returns the
    /// effective limit and radius ceiling.
    fn validate(&self, request: &SearchRequest) -> Result<(usize, f64), SearchError> {
        if !request.origin.is_valid() {
            return Err(SearchError::InvalidInput(format!(
                "origin out of range: latitude {}, longitude {}",
                request.origin.latitude, request.origin.longitude
            )));
        }

        if let Some(limit) = request.limit {
            if limit == 0 {
                return Err(SearchError::InvalidInput("limit must be positive".into()));
            }
        }

        if let Some(radius_km) = request.max_radius_km {
            if !radius_km.is_finite() || radius_km <= 0.0 {
                return Err(SearchError::InvalidInput(format!(
                    "radius ceiling must be a positive number of km, got {}",
                    radius_km
                )));
            }
        }

        let limit = request
            .limit
            .unwrap_or(self.policy.default_limit)
            .min(self.policy.max_limit);
        let ceiling = request.max_radius_km.unwrap_or(self.policy.max_radius_km);

        Ok((limit, ceiling))
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
