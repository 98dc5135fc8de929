use crate::models::NearbyService;

/// Service categories that receive an urgency boost when the caller signals
/// high urgency.
pub const URGENT_CATEGORIES: [&str; 4] = ["ambulance", "hospital", "police", "fire"];

/// Category keyword vocabulary: each known category with the synonyms that
/// count as a keyword-level match for it.
const SERVICE_KEYWORDS: &[(&str, &[&str])] = &[
    ("hospital", &["hospital", "medical", "healthcare", "clinic", "emergency"]),
    ("doctor", &["doctor", "physician", "medical", "clinic", "healthcare"]),
    ("ambulance", &["ambulance", "emergency", "medical transport"]),
    (
        "automobile",
        &["automobile", "car", "mechanic", "garage", "vehicle", "repair", "auto"],
    ),
    ("pharmacy", &["pharmacy", "medicine", "medical", "chemist", "drug store"]),
    ("food", &["food", "restaurant", "cafe", "catering", "meal", "hotel"]),
    ("police", &["police", "security", "law enforcement", "thief"]),
    ("fire", &["fire", "firefighter", "emergency", "fire extinguisher"]),
];

/// Filler words stripped when treating query residue as a place name.
const FILLER_WORDS: [&str; 2] = ["need", "help"];

/// How strongly a candidate's type matched the requested type.
///
/// Selected by precedence: exact match wins over keyword match, keyword match
/// over no constraint. The variant in effect applies uniformly to every
/// candidate that survived the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMatch {
    /// Case-insensitive equality on the service type field.
    Exact,
    /// The requested type's keyword expansion hit the candidate's name or type.
    Keyword,
    /// No type constraint was applied.
    Any,
}

impl TypeMatch {
    /// Score contribution of this match level, in [0, 1].
    #[inline]
    pub fn strength(&self) -> f64 {
        match self {
            TypeMatch::Exact => 1.0,
            TypeMatch::Keyword => 0.6,
            TypeMatch::Any => 0.0,
        }
    }
}

/// Outcome of the type filter stage
#[derive(Debug)]
pub struct TypeFilterOutcome {
    pub candidates: Vec<NearbyService>,
    pub match_level: TypeMatch,
    /// True when the requested type matched nothing and the constraint was
    /// dropped so the caller still gets its nearest options.
    pub relaxed: bool,
}

/// Expand a requested type into the full keyword set of every category it
/// touches. Returns an empty list when the request hits no known category.
pub fn expand_type_keywords(requested: &str) -> Vec<&'static str> {
    let requested = requested.to_lowercase();
    let mut keywords: Vec<&'static str> = Vec::new();

    for (category, synonyms) in SERVICE_KEYWORDS {
        let hit = std::iter::once(category)
            .chain(synonyms.iter())
            .any(|keyword| requested.contains(keyword));
        if hit {
            keywords.extend(synonyms.iter().copied());
            keywords.push(category);
        }
    }

    keywords.sort_unstable();
    keywords.dedup();
    keywords
}

/// Whether a service type falls in one of the urgent categories.
#[inline]
pub fn is_urgent_category(service_type: &str) -> bool {
    let service_type = service_type.to_lowercase();
    URGENT_CATEGORIES
        .iter()
        .any(|category| service_type.contains(category))
}

/// Narrow candidates to those matching the requested type.
///
/// Match precedence:
/// 1. Exact case-insensitive match on the service type field
/// 2. Keyword match between the expanded request and name+type
/// 3. No requested type: all candidates pass
///
/// Urgency never participates here; it re-weights candidates during ranking.
/// If the constraint would eliminate every candidate, it is dropped and the
/// outcome carries `relaxed = true` so callers can tell "no matches" from
/// "type constraint relaxed".
pub fn filter_by_type(candidates: Vec<NearbyService>, requested: Option<&str>) -> TypeFilterOutcome {
    let needle = match requested {
        Some(requested) => requested.trim().to_lowercase(),
        None => String::new(),
    };

    if needle.is_empty() || candidates.is_empty() {
        return TypeFilterOutcome {
            candidates,
            match_level: TypeMatch::Any,
            relaxed: false,
        };
    }

    // Precedence 1: exact type match
    let exact: Vec<NearbyService> = candidates
        .iter()
        .filter(|c| c.record.service_type.trim().to_lowercase() == needle)
        .cloned()
        .collect();

    if !exact.is_empty() {
        return TypeFilterOutcome {
            candidates: exact,
            match_level: TypeMatch::Exact,
            relaxed: false,
        };
    }

    // Precedence 2: keyword match over name+type
    let keywords = expand_type_keywords(&needle);
    let haystack =
        |c: &NearbyService| format!("{} {}", c.record.name, c.record.service_type).to_lowercase();

    let mut matched: Vec<NearbyService> = if keywords.is_empty() {
        Vec::new()
    } else {
        candidates
            .iter()
            .filter(|c| {
                let text = haystack(c);
                keywords.iter().any(|keyword| text.contains(keyword))
            })
            .cloned()
            .collect()
    };

    // Unknown category: fall back to a raw substring check
    if matched.is_empty() {
        matched = candidates
            .iter()
            .filter(|c| haystack(c).contains(&needle))
            .cloned()
            .collect();
    }

    if matched.is_empty() {
        // Precedence 3 fallback: the type was a soft hint, keep everything
        return TypeFilterOutcome {
            candidates,
            match_level: TypeMatch::Any,
            relaxed: true,
        };
    }

    TypeFilterOutcome {
        candidates: matched,
        match_level: TypeMatch::Keyword,
        relaxed: false,
    }
}

/// Service hint and possible place name extracted from free text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryHint {
    pub service_type: Option<String>,
    pub place: Option<String>,
}

/// Pull a known service word out of a free-text query.
///
/// The first word matching a known category (or one of the original service
/// terms) becomes the service hint; the residue, minus filler words, is
/// treated as a possible place name for geocoding.
pub fn extract_service_hint(text: &str) -> QueryHint {
    let known_services: Vec<&str> = SERVICE_KEYWORDS
        .iter()
        .map(|(category, _)| *category)
        .chain(["medical", "clinic", "nurse"])
        .collect();

    let words: Vec<String> = text
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let found_service = words
        .iter()
        .find(|word| known_services.contains(&word.as_str()))
        .cloned();

    let residue: Vec<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|word| Some(*word) != found_service.as_deref())
        .filter(|word| !FILLER_WORDS.contains(word))
        .collect();

    let place = residue.join(" ").trim().to_string();

    QueryHint {
        service_type: found_service,
        place: if place.is_empty() { None } else { Some(place) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceRecord;
    use uuid::Uuid;

    fn candidate(id: u128, name: &str, service_type: &str, distance_km: f64) -> NearbyService {
        NearbyService {
            record: ServiceRecord {
                id: Uuid::from_u128(id),
                name: name.to_string(),
                service_type: service_type.to_string(),
                latitude: 40.7128,
                longitude: -74.0060,
                location: None,
                address: None,
                mobile_no: None,
                timings: None,
                cost: None,
                available: true,
                contact: None,
            },
            distance_km,
        }
    }

    #[test]
    fn test_exact_match_wins_over_keyword() {
        let candidates = vec![
            candidate(1, "City Hospital", "hospital", 1.0),
            candidate(2, "QuickCare Clinic", "clinic", 0.5),
        ];

        let outcome = filter_by_type(candidates, Some("hospital"));

        assert_eq!(outcome.match_level, TypeMatch::Exact);
        assert!(!outcome.relaxed);
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].record.name, "City Hospital");
    }

    #[test]
    fn test_keyword_match_when_no_exact() {
        let candidates = vec![
            candidate(1, "QuickCare Clinic", "clinic", 0.5),
            candidate(2, "Corner Bakery", "bakery", 0.2),
        ];

        // "hospital" expands to clinic/medical/healthcare/emergency keywords
        let outcome = filter_by_type(candidates, Some("hospital"));

        assert_eq!(outcome.match_level, TypeMatch::Keyword);
        assert!(!outcome.relaxed);
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].record.service_type, "clinic");
    }

    #[test]
    fn test_absent_type_passes_everything() {
        let candidates = vec![
            candidate(1, "City Hospital", "hospital", 1.0),
            candidate(2, "Corner Bakery", "bakery", 0.2),
        ];

        let outcome = filter_by_type(candidates, None);

        assert_eq!(outcome.match_level, TypeMatch::Any);
        assert!(!outcome.relaxed);
        assert_eq!(outcome.candidates.len(), 2);
    }

    #[test]
    fn test_unmatched_type_relaxes_instead_of_emptying() {
        let candidates = vec![
            candidate(1, "City Hospital", "hospital", 1.0),
            candidate(2, "Corner Bakery", "bakery", 0.2),
        ];

        let outcome = filter_by_type(candidates, Some("dentist"));

        assert_eq!(outcome.match_level, TypeMatch::Any);
        assert!(outcome.relaxed);
        assert_eq!(outcome.candidates.len(), 2);
    }

    #[test]
    fn test_empty_candidates_do_not_flag_relaxed() {
        let outcome = filter_by_type(Vec::new(), Some("dentist"));

        assert!(!outcome.relaxed);
        assert!(outcome.candidates.is_empty());
    }

    #[test]
    fn test_substring_fallback_for_unknown_category() {
        let candidates = vec![
            candidate(1, "Smile Dental Studio", "dental care", 1.0),
            candidate(2, "Corner Bakery", "bakery", 0.2),
        ];

        let outcome = filter_by_type(candidates, Some("dental"));

        assert_eq!(outcome.match_level, TypeMatch::Keyword);
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].record.name, "Smile Dental Studio");
    }

    #[test]
    fn test_expand_type_keywords() {
        let keywords = expand_type_keywords("hospital");
        assert!(keywords.contains(&"clinic"));
        assert!(keywords.contains(&"hospital"));
        assert!(keywords.contains(&"emergency"));

        assert!(expand_type_keywords("dentist").is_empty());
    }

    #[test]
    fn test_urgent_categories() {
        assert!(is_urgent_category("ambulance"));
        assert!(is_urgent_category("Fire Station"));
        assert!(is_urgent_category("City Hospital Annex"));
        assert!(!is_urgent_category("bakery"));
        assert!(!is_urgent_category("pharmacy"));
    }

    #[test]
    fn test_extract_service_hint() {
        let hint = extract_service_hint("need ambulance near downtown");
        assert_eq!(hint.service_type.as_deref(), Some("ambulance"));
        assert_eq!(hint.place.as_deref(), Some("near downtown"));
    }

    #[test]
    fn test_extract_service_hint_without_known_service() {
        let hint = extract_service_hint("need help in springfield");
        assert!(hint.service_type.is_none());
        assert_eq!(hint.place.as_deref(), Some("in springfield"));
    }

    #[test]
    fn test_extract_service_hint_service_only() {
        let hint = extract_service_hint("need hospital help");
        assert_eq!(hint.service_type.as_deref(), Some("hospital"));
        assert!(hint.place.is_none());
    }
}
