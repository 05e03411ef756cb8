//! Deterministic cross-archetype statistics
//!
//! Recomputed from the persisted results on every request, never cached;
//! fewer than two results yield no insights.

use crate::model::{
    AwardRange, ComparisonInsights, ComparisonResult, Consensus, Party, RulingRisk,
};

pub fn synthesize(results: &[ComparisonResult]) -> Option<ComparisonInsights> {
    if results.len() < 2 {
        return None;
    }

    let total = results.len();
    let plaintiff_wins = results
        .iter()
        .filter(|r| r.judgment.in_favor_of == Party::Plaintiff)
        .count();
    let defendant_wins = total - plaintiff_wins;

    let (consensus, consensus_text) = if plaintiff_wins == total {
        (
            Consensus::UnanimousPlaintiff,
            format!("All {total} judges would rule in the plaintiff's favor. This is a strong case."),
        )
    } else if defendant_wins == total {
        (
            Consensus::UnanimousDefendant,
            format!(
                "All {total} judges would rule for the defendant. The plaintiff faces \
                 significant challenges."
            ),
        )
    } else if plaintiff_wins > defendant_wins {
        (
            Consensus::MajorityPlaintiff,
            format!(
                "{plaintiff_wins} out of {total} judges favor the plaintiff. The case is \
                 favorable but has vulnerabilities."
            ),
        )
    } else if defendant_wins > plaintiff_wins {
        (
            Consensus::MajorityDefendant,
            format!(
                "{defendant_wins} out of {total} judges favor the defendant. The plaintiff \
                 needs to strengthen their case significantly."
            ),
        )
    } else {
        (
            Consensus::Split,
            "Judges are evenly split. This case could go either way depending on presentation."
                .to_string(),
        )
    };

    let mut amounts: Vec<f64> = results
        .iter()
        .map(|r| r.judgment.awarded_amount.unwrap_or(0.0))
        .collect();
    amounts.sort_by(|a, b| a.total_cmp(b));
    let sum: f64 = amounts.iter().sum();
    let award_range = AwardRange {
        min: amounts[0],
        max: amounts[total - 1],
        avg: round2(sum / total as f64),
        median: amounts[total / 2],
    };

    let mut risks = Vec::new();
    let mut favorable_judges = Vec::new();
    for result in results {
        match result.judgment.in_favor_of {
            Party::Defendant if plaintiff_wins > 0 => {
                let summary = &result.reasoning_chain.final_determination.reasoning_summary;
                risks.push(RulingRisk {
                    archetype_id: result.archetype_id.clone(),
                    reason: if summary.is_empty() {
                        "Evidence insufficient".to_string()
                    } else {
                        summary.clone()
                    },
                });
            }
            Party::Plaintiff => favorable_judges.push(result.archetype_id.clone()),
            Party::Defendant => {}
        }
    }

    Some(ComparisonInsights {
        consensus,
        consensus_text,
        plaintiff_wins,
        defendant_wins,
        total_judges: total,
        award_range,
        risks,
        favorable_judges,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
