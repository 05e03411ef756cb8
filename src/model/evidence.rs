//! Per-element evidence strength ratings
//!
//! Scores use a 0-3 scale: 0 none, 1 weak (uncorroborated testimony),
//! 2 moderate (partial documentation), 3 strong (clear documentation).

use serde::{Deserialize, Serialize};

/// Score ceiling on the evidence rubric
pub const MAX_ELEMENT_SCORE: u8 = 3;

/// Ratings for one claim element, both sides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementScore {
    #[serde(default)]
    pub element: String,
    #[serde(default)]
    pub plaintiff_score: u8,
    #[serde(default)]
    pub plaintiff_evidence: String,
    #[serde(default)]
    pub plaintiff_explanation: String,
    #[serde(default)]
    pub defendant_score: u8,
    #[serde(default)]
    pub defendant_evidence: String,
    #[serde(default)]
    pub defendant_explanation: String,
    #[serde(default)]
    pub net_assessment: String,
}

/// Derived from case facts plus the applicable-rule element checklist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceScores {
    #[serde(default)]
    pub element_scores: Vec<ElementScore>,
    #[serde(default)]
    pub overall_plaintiff_strength: u8,
    #[serde(default)]
    pub overall_defendant_strength: u8,
    #[serde(default)]
    pub credibility_notes: String,
    #[serde(default)]
    pub evidence_gaps: Vec<String>,
    #[serde(default)]
    pub key_evidence_summary: String,
}

impl EvidenceScores {
    /// Mean plaintiff element score, falling back to the overall rating when
    /// no per-element scores were produced
    pub fn avg_plaintiff_score(&self) -> f64 {
        if self.element_scores.is_empty() {
            return f64::from(self.overall_plaintiff_strength);
        }
        let total: u32 = self
            .element_scores
            .iter()
            .map(|e| u32::from(e.plaintiff_score))
            .sum();
        f64::from(total) / self.element_scores.len() as f64
    }

    /// Mean defendant element score with the same fallback
    pub fn avg_defendant_score(&self) -> f64 {
        if self.element_scores.is_empty() {
            return f64::from(self.overall_defendant_strength);
        }
        let total: u32 = self
            .element_scores
            .iter()
            .map(|e| u32::from(e.defendant_score))
            .sum();
        f64::from(total) / self.element_scores.len() as f64
    }
}
