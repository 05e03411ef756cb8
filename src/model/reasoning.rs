//! The structured reasoning chain, the load-bearing intermediate verdict
//! artifact every downstream stage depends on

use serde::{Deserialize, Serialize};

use super::facts::Party;

/// Whether a liability element was established by a preponderance of the
/// evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementFinding {
    Proven,
    NotProven,
}

impl Default for ElementFinding {
    fn default() -> Self {
        ElementFinding::NotProven
    }
}

/// Stated confidence of the final determination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Moderate,
    Low,
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        ConfidenceLevel::Moderate
    }
}

impl ConfidenceLevel {
    /// Multiplier applied to the deterministic case-strength composite
    pub fn strength_multiplier(&self) -> f64 {
        match self {
            ConfidenceLevel::High => 1.2,
            ConfidenceLevel::Moderate => 1.0,
            ConfidenceLevel::Low => 0.8,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceAnalysis {
    #[serde(default)]
    pub strongest_plaintiff_evidence: String,
    #[serde(default)]
    pub strongest_defendant_evidence: String,
    #[serde(default)]
    pub key_evidence_conflicts: String,
}

/// Finding on one legal element
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiabilityFinding {
    #[serde(default)]
    pub element: String,
    #[serde(default)]
    pub finding: ElementFinding,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamagesAnalysis {
    #[serde(default)]
    pub damages_proven: bool,
    #[serde(default)]
    pub amount_claimed: f64,
    #[serde(default)]
    pub amount_justified: f64,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CounterclaimAnalysis {
    #[serde(default)]
    pub counterclaim_exists: bool,
    #[serde(default)]
    pub counterclaim_merit: Option<String>,
    #[serde(default)]
    pub counterclaim_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalDetermination {
    pub prevailing_party: Party,
    #[serde(default)]
    pub reasoning_summary: String,
    #[serde(default)]
    pub confidence: ConfidenceLevel,
}

impl Default for FinalDetermination {
    fn default() -> Self {
        Self {
            prevailing_party: Party::Defendant,
            reasoning_summary: String::new(),
            confidence: ConfidenceLevel::Moderate,
        }
    }
}

/// Full deliberation produced by the reasoning stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReasoningChain {
    #[serde(default)]
    pub factual_narrative: String,
    #[serde(default)]
    pub credibility_assessment: String,
    #[serde(default)]
    pub evidence_analysis: EvidenceAnalysis,
    #[serde(default)]
    pub liability_analysis: Vec<LiabilityFinding>,
    #[serde(default)]
    pub damages_analysis: DamagesAnalysis,
    #[serde(default)]
    pub counterclaim_analysis: CounterclaimAnalysis,
    #[serde(default)]
    pub final_determination: FinalDetermination,
}

impl ReasoningChain {
    /// Fraction of liability elements found proven. Returns 0.5 when no
    /// findings exist so a degraded chain neither helps nor hurts the
    /// composite score.
    pub fn proven_element_rate(&self) -> f64 {
        if self.liability_analysis.is_empty() {
            return 0.5;
        }
        let proven = self
            .liability_analysis
            .iter()
            .filter(|f| f.finding == ElementFinding::Proven)
            .count();
        proven as f64 / self.liability_analysis.len() as f64
    }

    pub fn proven_element_count(&self) -> usize {
        self.liability_analysis
            .iter()
            .filter(|f| f.finding == ElementFinding::Proven)
            .count()
    }
}
