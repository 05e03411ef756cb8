//! Structured case facts extracted from the parties' narratives
//!
//! Produced once per pipeline run and immutable afterwards. Field-level
//! `#[serde(default)]` keeps decoding tolerant of partially filled model
//! output.

use serde::{Deserialize, Serialize};

/// Which side of the dispute a value refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Plaintiff,
    Defendant,
}

impl Party {
    pub fn as_str(&self) -> &'static str {
        match self {
            Party::Plaintiff => "plaintiff",
            Party::Defendant => "defendant",
        }
    }
}

/// One party as described in the narratives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartyDescription {
    #[serde(default)]
    pub name: String,
    /// Brief description of their role (tenant, buyer, landlord, ...)
    #[serde(default)]
    pub role_description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parties {
    #[serde(default)]
    pub plaintiff: PartyDescription,
    #[serde(default)]
    pub defendant: PartyDescription,
}

/// A single claim asserted by the plaintiff
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claim {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Option<f64>,
    /// contract | negligence | statute | debt | other
    #[serde(default)]
    pub basis: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyDate {
    /// ISO date or an approximate description
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub event: String,
}

/// A piece of evidence mentioned in a narrative
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceMention {
    /// document | photo | receipt | testimony | text_message | email | contract
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceMentions {
    #[serde(default)]
    pub plaintiff: Vec<EvidenceMention>,
    #[serde(default)]
    pub defendant: Vec<EvidenceMention>,
}

/// A fact the parties disagree about, with each side's version
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisputedIssue {
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub plaintiff_position: String,
    #[serde(default)]
    pub defendant_position: String,
}

/// Structured extraction of the case from both free-text narratives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseFacts {
    #[serde(default)]
    pub parties: Parties,
    #[serde(default)]
    pub claims: Vec<Claim>,
    #[serde(default)]
    pub key_dates: Vec<KeyDate>,
    #[serde(default)]
    pub claimed_amount: Option<f64>,
    #[serde(default)]
    pub evidence_mentioned: EvidenceMentions,
    #[serde(default)]
    pub disputed_issues: Vec<DisputedIssue>,
    #[serde(default)]
    pub undisputed_facts: Vec<String>,
}
