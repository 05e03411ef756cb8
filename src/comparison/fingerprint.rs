//! Content fingerprint identifying a comparison run
//!
//! The fingerprint hashes everything that could change the outcome of a
//! fan-out: the narratives, the claimed amount, the case update timestamp,
//! the hearing completion state, and the sorted archetype set. Identical
//! fingerprints mean a cached run can be served as-is.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::model::{CaseSnapshot, HearingSnapshot};

/// Hashed payload. Field order is irrelevant: canonicalization sorts keys.
#[derive(Serialize)]
struct FingerprintPayload<'a> {
    case_id: String,
    archetype_ids: &'a [String],
    plaintiff_narrative: &'a str,
    defendant_narrative: &'a str,
    claimed_amount: Option<f64>,
    updated_at: String,
    hearing_completed_at: Option<String>,
    hearing_message_count: usize,
}

/// Compute the run fingerprint. `sorted_archetype_ids` must already be
/// deduplicated and sorted so equal archetype sets hash equally.
pub fn comparison_fingerprint(
    case: &CaseSnapshot,
    hearing: Option<&HearingSnapshot>,
    sorted_archetype_ids: &[String],
) -> String {
    let payload = FingerprintPayload {
        case_id: case.id.to_string(),
        archetype_ids: sorted_archetype_ids,
        plaintiff_narrative: &case.plaintiff_narrative,
        defendant_narrative: &case.defendant_narrative,
        claimed_amount: case.claimed_amount,
        updated_at: case.updated_at.to_rfc3339(),
        hearing_completed_at: hearing
            .and_then(|h| h.completed_at)
            .map(|t| t.to_rfc3339()),
        hearing_message_count: hearing.map(|h| h.messages.len()).unwrap_or(0),
    };

    // serde_json's Value keeps object keys sorted, so the serialized form
    // is canonical regardless of struct field order
    let canonical = serde_json::to_value(&payload)
        .map(|v| v.to_string())
        .unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn case() -> CaseSnapshot {
        CaseSnapshot {
            id: Uuid::nil(),
            plaintiff_narrative: "deposit withheld".to_string(),
            defendant_narrative: "carpet damage".to_string(),
            plaintiff_name: "P".to_string(),
            defendant_name: "D".to_string(),
            claimed_amount: Some(1500.0),
            updated_at: Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_inputs_hash_identically() {
        let a = comparison_fingerprint(&case(), None, &ids(&["common_sense", "strict"]));
        let b = comparison_fingerprint(&case(), None, &ids(&["common_sense", "strict"]));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn narrative_change_changes_the_hash() {
        let baseline = comparison_fingerprint(&case(), None, &ids(&["strict"]));
        let mut changed = case();
        changed.plaintiff_narrative.push_str(" Also the dryer broke.");
        assert_ne!(
            baseline,
            comparison_fingerprint(&changed, None, &ids(&["strict"]))
        );
    }

    #[test]
    fn hearing_state_is_part_of_the_identity() {
        let baseline = comparison_fingerprint(&case(), None, &ids(&["strict"]));
        let hearing = HearingSnapshot {
            completed_at: Some(Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap()),
            messages: Vec::new(),
        };
        assert_ne!(
            baseline,
            comparison_fingerprint(&case(), Some(&hearing), &ids(&["strict"]))
        );
    }

    #[test]
    fn archetype_set_changes_the_hash() {
        let two = comparison_fingerprint(&case(), None, &ids(&["common_sense", "strict"]));
        let three = comparison_fingerprint(
            &case(),
            None,
            &ids(&["common_sense", "evidence_heavy", "strict"]),
        );
        assert_ne!(two, three);
    }
}
