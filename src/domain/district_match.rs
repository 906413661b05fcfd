//! Fuzzy matching of geocoded address text against stored district names.
//!
//! Geocoders rarely spell a district the way the scheme does, so matching
//! runs in three passes of decreasing strictness: exact on normalized
//! names, substring containment in either direction, then word overlap.
//! Within the first two passes a state-name hint narrows ambiguous hits.

use crate::domain::observation::DistrictWithState;

/// A match produced by [`match_district`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictMatch<'a> {
    pub district: &'a DistrictWithState,
    /// False only for an exact normalized-name match.
    pub fuzzy: bool,
}

/// Uppercase a geocoded district name and drop a trailing "DISTRICT" token.
pub fn clean_detected_district(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    upper
        .strip_suffix("DISTRICT")
        .map(str::trim_end)
        .unwrap_or(&upper)
        .to_owned()
}

/// Reduce a name to its A-Z characters so spacing and punctuation
/// differences cannot defeat comparison.
fn normalize(name: &str) -> String {
    name.to_uppercase()
        .chars()
        .filter(char::is_ascii_uppercase)
        .collect()
}

fn state_hint_matches(candidate: &DistrictWithState, detected_state: &str) -> bool {
    if detected_state.is_empty() {
        return false;
    }
    let stored = candidate.state.name.to_uppercase();
    stored.contains(detected_state) || detected_state.contains(&stored)
}

/// Pick the best stored district for a detected (district, state) pair.
pub fn match_district<'a>(
    districts: &'a [DistrictWithState],
    detected_district: &str,
    detected_state: &str,
) -> Option<DistrictMatch<'a>> {
    let target = normalize(detected_district);
    if target.is_empty() {
        return None;
    }
    let state_upper = detected_state.trim().to_uppercase();

    // Pass 1: exact normalized match, preferring candidates in the detected
    // state.
    let exact: Vec<&DistrictWithState> = districts
        .iter()
        .filter(|candidate| normalize(&candidate.district.name) == target)
        .collect();
    if let Some(district) = pick_with_state_hint(&exact, &state_upper) {
        return Some(DistrictMatch {
            district,
            fuzzy: false,
        });
    }

    // Pass 2: substring containment in either direction.
    let contains: Vec<&DistrictWithState> = districts
        .iter()
        .filter(|candidate| {
            let stored = normalize(&candidate.district.name);
            stored.contains(&target) || target.contains(&stored)
        })
        .collect();
    if let Some(district) = pick_with_state_hint(&contains, &state_upper) {
        return Some(DistrictMatch {
            district,
            fuzzy: true,
        });
    }

    // Pass 3: overlap on significant words (longer than three characters).
    let detected_words: Vec<String> = detected_district
        .to_uppercase()
        .split_whitespace()
        .filter(|word| word.len() > 3)
        .map(str::to_owned)
        .collect();
    districts
        .iter()
        .find(|candidate| {
            let stored = candidate.district.name.to_uppercase();
            detected_words.iter().any(|word| {
                stored
                    .split_whitespace()
                    .any(|stored_word| stored_word.contains(word) || word.contains(stored_word))
            })
        })
        .map(|district| DistrictMatch {
            district,
            fuzzy: true,
        })
}

fn pick_with_state_hint<'a>(
    candidates: &[&'a DistrictWithState],
    detected_state: &str,
) -> Option<&'a DistrictWithState> {
    candidates
        .iter()
        .find(|candidate| state_hint_matches(candidate, detected_state))
        .or_else(|| candidates.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::{DistrictRecord, StateRecord};

    fn district(code: &str, name: &str, state_name: &str) -> DistrictWithState {
        DistrictWithState {
            district: DistrictRecord {
                code: code.to_owned(),
                name: name.to_owned(),
                state_code: "18".to_owned(),
            },
            state: StateRecord {
                code: "18".to_owned(),
                name: state_name.to_owned(),
            },
        }
    }

    #[test]
    fn cleans_trailing_district_token() {
        assert_eq!(clean_detected_district("Pune District"), "PUNE");
        assert_eq!(clean_detected_district("  pune "), "PUNE");
    }

    #[test]
    fn exact_match_ignores_spacing_and_punctuation() {
        let directory = [district("1821", "NORTH 24 PARGANAS", "WEST BENGAL")];
        let matched = match_district(&directory, "NORTH24PARGANAS", "WEST BENGAL")
            .expect("should match");
        assert_eq!(matched.district.district.code, "1821");
        assert!(!matched.fuzzy);
    }

    #[test]
    fn state_hint_disambiguates_duplicate_names() {
        let directory = [
            district("0101", "AURANGABAD", "BIHAR"),
            district("1804", "AURANGABAD", "MAHARASHTRA"),
        ];
        let matched =
            match_district(&directory, "Aurangabad", "MAHARASHTRA").expect("should match");
        assert_eq!(matched.district.district.code, "1804");
    }

    #[test]
    fn substring_match_is_flagged_fuzzy() {
        let directory = [district("1808", "PUNE", "MAHARASHTRA")];
        let matched = match_district(&directory, "PUNE CITY", "MAHARASHTRA")
            .expect("should match by containment");
        assert!(matched.fuzzy);
    }

    #[test]
    fn word_overlap_matches_partial_names() {
        let directory = [district("1833", "SANGLI", "MAHARASHTRA")];
        let matched = match_district(&directory, "SANGLI-MIRAJ AND KUPWAD", "MAHARASHTRA");
        assert!(matched.is_some(), "significant word should match");
    }

    #[test]
    fn unrelated_names_do_not_match() {
        let directory = [district("1808", "PUNE", "MAHARASHTRA")];
        assert!(match_district(&directory, "LUDHIANA", "PUNJAB").is_none());
    }
}
