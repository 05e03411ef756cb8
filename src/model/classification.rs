//! Case-type classification and identified legal issues

use serde::{Deserialize, Serialize};

/// A legal question the court must decide, with the elements required to
/// prove it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegalIssue {
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub elements_to_prove: Vec<String>,
    #[serde(default)]
    pub relevant_law: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JurisdictionalCheck {
    #[serde(default)]
    pub amount_within_limit: bool,
    #[serde(default)]
    pub proper_claim_type: bool,
    #[serde(default)]
    pub notes: String,
}

/// Derived from [`CaseFacts`](crate::model::CaseFacts) by the classification
/// stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
    /// contract | property_damage | security_deposit | loan_debt | consumer | other
    #[serde(default)]
    pub primary_type: String,
    #[serde(default)]
    pub primary_confidence: f64,
    #[serde(default)]
    pub secondary_type: Option<String>,
    #[serde(default)]
    pub secondary_confidence: Option<f64>,
    #[serde(default)]
    pub legal_issues: Vec<LegalIssue>,
    #[serde(default)]
    pub jurisdictional_check: JurisdictionalCheck,
    /// 1 (simple) to 5 (complex)
    #[serde(default)]
    pub complexity_score: u8,
    #[serde(default)]
    pub summary: String,
}
