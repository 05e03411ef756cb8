//! Formal judgment and advisory artifacts

use serde::{Deserialize, Serialize};

use super::facts::Party;
use super::reasoning::ConfidenceLevel;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConclusionOfLaw {
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub legal_basis: String,
}

/// The formal judgment document drafted from the reasoning chain. One
/// instance exists per archetype inside a comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judgment {
    #[serde(default)]
    pub findings_of_fact: Vec<String>,
    #[serde(default)]
    pub conclusions_of_law: Vec<ConclusionOfLaw>,
    #[serde(default)]
    pub judgment_text: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub awarded_amount: Option<f64>,
    pub in_favor_of: Party,
    #[serde(default)]
    pub costs_awarded: bool,
    #[serde(default)]
    pub costs_note: String,
}

impl Default for Judgment {
    fn default() -> Self {
        Self {
            findings_of_fact: Vec::new(),
            conclusions_of_law: Vec::new(),
            judgment_text: String::new(),
            rationale: String::new(),
            awarded_amount: None,
            in_favor_of: Party::Defendant,
            costs_awarded: false,
            costs_note: String::new(),
        }
    }
}

/// Five-tier qualitative band for the deterministic case-strength score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthLabel {
    #[serde(rename = "Very Strong")]
    VeryStrong,
    Strong,
    Moderate,
    Weak,
    #[serde(rename = "Very Weak")]
    VeryWeak,
}

impl StrengthLabel {
    /// Fixed thresholds on the 0-10 score
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            StrengthLabel::VeryStrong
        } else if score >= 6.5 {
            StrengthLabel::Strong
        } else if score >= 4.5 {
            StrengthLabel::Moderate
        } else if score >= 3.0 {
            StrengthLabel::Weak
        } else {
            StrengthLabel::VeryWeak
        }
    }
}

/// Deterministic 0-10 case-strength assessment. Pure arithmetic over the
/// evidence scores and reasoning chain, no model call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStrength {
    pub score: f64,
    pub label: StrengthLabel,
    pub prevailing_party: Party,
    pub confidence: ConfidenceLevel,
    pub elements_proven: usize,
    pub elements_total: usize,
    pub damages_proven: bool,
    pub amount_justified: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
}

/// Remediation note for one under-evidenced claim element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRecommendation {
    pub element: String,
    pub current_score: u8,
    pub defendant_score: u8,
    pub priority: Priority,
    pub gap_description: String,
    pub plaintiff_evidence: String,
    pub net_assessment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceAction {
    #[serde(default)]
    pub element: String,
    /// none | weak | moderate
    #[serde(default)]
    pub current_strength: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub what_to_bring: String,
    #[serde(default)]
    pub impact: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategicAdvice {
    /// claim_amount | presentation | weakness | mitigation | timing
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub advice: String,
    #[serde(default)]
    pub priority: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistItem {
    #[serde(default)]
    pub item: String,
    /// critical | important | helpful
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnticipatedQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub suggested_approach: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourtPreparation {
    #[serde(default)]
    pub case_summary: String,
    #[serde(default)]
    pub evidence_checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub opening_statement: String,
    #[serde(default)]
    pub anticipated_questions: Vec<AnticipatedQuestion>,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// Model-generated portion of the advisory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisoryText {
    #[serde(default)]
    pub evidence_actions: Vec<EvidenceAction>,
    #[serde(default)]
    pub strategic_advice: Vec<StrategicAdvice>,
    #[serde(default)]
    pub court_preparation: CourtPreparation,
}

/// Complete advisory bundle. Purely informational, it never influences the
/// judgment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
    pub case_strength: CaseStrength,
    pub evidence_recommendations: Vec<EvidenceRecommendation>,
    pub evidence_actions: Vec<EvidenceAction>,
    pub strategic_advice: Vec<StrategicAdvice>,
    pub court_preparation: CourtPreparation,
}
