//! Comparison-run records and cross-archetype insights

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::evidence::EvidenceScores;
use super::judgment::Judgment;
use super::metadata::PipelineMetadata;
use super::reasoning::ReasoningChain;

/// Judgment produced by one archetype inside a comparison run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub archetype_id: String,
    pub judgment: Judgment,
    pub evidence_scores: EvidenceScores,
    pub reasoning_chain: ReasoningChain,
    pub pipeline_metadata: PipelineMetadata,
}

/// An immutable snapshot of one multi-archetype fan-out, identified by a
/// content fingerprint over the case and hearing state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRun {
    pub id: Uuid,
    pub case_id: Uuid,
    pub fingerprint: String,
    pub archetype_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub results: Vec<ComparisonResult>,
}

/// Classification of agreement across archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consensus {
    UnanimousPlaintiff,
    UnanimousDefendant,
    MajorityPlaintiff,
    MajorityDefendant,
    Split,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub median: f64,
}

/// A defendant-favoring ruling recorded as a risk when at least one
/// archetype favored the plaintiff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulingRisk {
    pub archetype_id: String,
    pub reason: String,
}

/// Deterministic cross-archetype statistics, recomputed on every request
/// and never cached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInsights {
    pub consensus: Consensus,
    pub consensus_text: String,
    pub plaintiff_wins: usize,
    pub defendant_wins: usize,
    pub total_judges: usize,
    pub award_range: AwardRange,
    pub risks: Vec<RulingRisk>,
    pub favorable_judges: Vec<String>,
}
