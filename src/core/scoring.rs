use std::cmp::Ordering;

use crate::core::filters::{is_urgent_category, TypeMatch};
use crate::models::{NearbyService, RankingWeights, ScoredService, Urgency};

/// Scores closer than this are considered tied and fall through to the
/// distance/identifier tie-break.
pub const SCORE_EPSILON: f64 = 1e-6;

/// Composite relevance score (0-100) for one candidate.
///
/// Scoring formula:
/// score = (
///     distance_score * 0.55 +      # Closer = higher, normalized to the radius searched
///     type_score * 0.25 +          # Exact match > keyword match > no constraint
///     urgency_score * 0.20         # High urgency + urgent category
/// ) * 100
pub fn composite_score(
    distance_km: f64,
    radius_km: f64,
    match_level: TypeMatch,
    urgency_boosted: bool,
    weights: &RankingWeights,
) -> f64 {
    let distance_score = if radius_km > 0.0 {
        (1.0 - distance_km / radius_km).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let type_score = match_level.strength();
    let urgency_score = if urgency_boosted { 1.0 } else { 0.0 };

    let total = (distance_score * weights.distance
        + type_score * weights.type_match
        + urgency_score * weights.urgency)
        * 100.0;

    total.clamp(0.0, 100.0)
}

/// Score, order, and truncate filtered candidates.
///
/// Results are sorted by descending composite score; scores within
/// `SCORE_EPSILON` are ordered by ascending distance, then by record
/// identifier so the ordering is deterministic.
pub fn rank_candidates(
    candidates: Vec<NearbyService>,
    radius_km: f64,
    match_level: TypeMatch,
    urgency: Urgency,
    weights: &RankingWeights,
    limit: usize,
) -> Vec<ScoredService> {
    let mut scored: Vec<ScoredService> = candidates
        .into_iter()
        .map(|candidate| {
            let urgency_boosted =
                urgency.is_elevated() && is_urgent_category(&candidate.record.service_type);
            let score = composite_score(
                candidate.distance_km,
                radius_km,
                match_level,
                urgency_boosted,
                weights,
            );
            ScoredService::from_candidate(candidate, score)
        })
        .collect();

    scored.sort_by(compare_scored);
    scored.truncate(limit);
    scored
}

fn compare_scored(a: &ScoredService, b: &ScoredService) -> Ordering {
    let by_score = if (a.match_score - b.match_score).abs() > SCORE_EPSILON {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    } else {
        Ordering::Equal
    };

    by_score
        .then_with(|| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.id.cmp(&b.id))
}
