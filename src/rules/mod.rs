//! Rule resolution: static small-claims rule tables merged with semantic
//! retrieval from a legal-text corpus

mod tables;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::facts::DisputedIssue;

pub use tables::{claim_elements, static_rules, ClaimElementSet, StaticRule};

/// How many disputed-issue summaries feed the retrieval query
const MAX_QUERY_ISSUES: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("corpus search unavailable: {0}")]
    Unavailable(String),
}

/// Optional narrowing for a corpus search
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// statute | rule | guide
    pub source_type: Option<String>,
    pub topic: Option<String>,
}

/// One retrieved legal-text snippet with its similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusChunk {
    pub id: String,
    pub source_type: String,
    pub source_title: String,
    pub section_number: String,
    pub topic: String,
    pub content: String,
    pub similarity: f64,
}

/// Similarity-search collaborator over the ingested legal corpus
#[async_trait]
pub trait CorpusSearch: Send + Sync {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        filters: &SearchFilters,
    ) -> Result<Vec<CorpusChunk>, CorpusError>;
}

/// Owned claim-element checklist for one case type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimElementChecklist {
    pub name: String,
    pub elements: Vec<String>,
    pub damages_measure: String,
}

impl From<&ClaimElementSet> for ClaimElementChecklist {
    fn from(set: &ClaimElementSet) -> Self {
        Self {
            name: set.name.to_string(),
            elements: set.elements.iter().map(|e| e.to_string()).collect(),
            damages_measure: set.damages_measure.to_string(),
        }
    }
}

/// The complete legal framework the reasoning stages apply to a case.
/// Serialized into prompt contexts and the verdict bundle, never decoded.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicableRules {
    pub case_type: String,
    pub static_rules: Vec<StaticRule>,
    pub claim_elements: ClaimElementChecklist,
    pub retrieved_corpus: Vec<CorpusChunk>,
}

/// Merges the static rule table with dynamic corpus retrieval. The
/// claim-type lookup never fails; unmapped types fall back to the general
/// civil claim element set.
pub struct RuleResolver {
    corpus: Arc<dyn CorpusSearch>,
    result_limit: usize,
}

impl RuleResolver {
    pub fn new(corpus: Arc<dyn CorpusSearch>, result_limit: usize) -> Self {
        Self {
            corpus,
            result_limit,
        }
    }

    /// Build the legal framework for one case. Deterministic given
    /// identical inputs and corpus state.
    pub async fn resolve(
        &self,
        case_type: &str,
        claim_description: &str,
        disputed_issues: &[DisputedIssue],
    ) -> Result<ApplicableRules, CorpusError> {
        let elements = claim_elements(case_type);
        let query = build_query(case_type, claim_description, disputed_issues);

        tracing::debug!(
            case_type,
            checklist = elements.name,
            limit = self.result_limit,
            "resolving applicable rules"
        );

        let retrieved_corpus = self
            .corpus
            .search(&query, self.result_limit, &SearchFilters::default())
            .await?;

        Ok(ApplicableRules {
            case_type: case_type.to_string(),
            static_rules: static_rules().to_vec(),
            claim_elements: elements.into(),
            retrieved_corpus,
        })
    }
}

fn build_query(
    case_type: &str,
    claim_description: &str,
    disputed_issues: &[DisputedIssue],
) -> String {
    let mut query = format!("{case_type} claim: {claim_description}");
    if !disputed_issues.is_empty() {
        let issues: Vec<&str> = disputed_issues
            .iter()
            .take(MAX_QUERY_ISSUES)
            .map(|i| i.issue.as_str())
            .collect();
        query.push_str(&format!(" Disputed: {}", issues.join("; ")));
    }
    query
}
