//! Shared test doubles: a scripted completion provider keyed on system
//! prompts, a canned corpus, and fixture payloads for a security-deposit
//! dispute.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::gateway::{ChatRequest, Completion, CompletionProvider, ProviderError};
use crate::model::Config;
use crate::rules::{CorpusChunk, CorpusError, CorpusSearch, SearchFilters};

/// Distinctive system-prompt fragments identifying each stage. Matching on
/// content rather than call order keeps the double correct when stages run
/// concurrently.
const STAGE_MARKERS: &[(&str, fn() -> String)] = &[
    ("legal fact extractor", sample_facts_json),
    ("case classifier", sample_classification_json),
    ("evaluating evidence", sample_scores_json),
    ("structured reasoning chain", sample_reasoning_json),
    ("drafting the formal", sample_judgment_json),
    ("legal preparation advisor", sample_advisory_json),
];

/// Completion provider that answers each pipeline stage with a canned
/// fixture, optionally failing when the system prompt contains a trigger
/// substring.
pub(crate) struct ScriptedProvider {
    calls: AtomicU32,
    fail_when_system_contains: Option<String>,
    failure: fn() -> ProviderError,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_when_system_contains: None,
            failure: || ProviderError::Http { status: 400 },
        }
    }

    /// Fail every call whose system prompt contains `trigger` with a
    /// non-retryable client error
    pub(crate) fn failing_on(trigger: impl Into<String>) -> Self {
        Self {
            fail_when_system_contains: Some(trigger.into()),
            ..Self::new()
        }
    }

    pub(crate) fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(trigger) = &self.fail_when_system_contains {
            if request.system.contains(trigger.as_str()) {
                return Err((self.failure)());
            }
        }

        let content = STAGE_MARKERS
            .iter()
            .find(|(marker, _)| request.system.contains(*marker))
            .map(|(_, fixture)| fixture())
            .ok_or_else(|| {
                ProviderError::Malformed(format!(
                    "no fixture for system prompt: {}",
                    &request.system[..request.system.len().min(80)]
                ))
            })?;

        Ok(Completion {
            content,
            input_tokens: 900,
            output_tokens: 400,
        })
    }

    async fn embed(
        &self,
        _model: &str,
        _text: &str,
        dimensions: u32,
    ) -> Result<Vec<f32>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![0.1; dimensions as usize])
    }
}

/// Corpus double returning one fixed statute chunk
pub(crate) struct CannedCorpus;

#[async_trait]
impl CorpusSearch for CannedCorpus {
    async fn search(
        &self,
        _query: &str,
        _limit: usize,
        _filters: &SearchFilters,
    ) -> Result<Vec<CorpusChunk>, CorpusError> {
        Ok(vec![CorpusChunk {
            id: "ws-1-21-1208".to_string(),
            source_type: "statute".to_string(),
            source_title: "Security deposits; return; deductions".to_string(),
            section_number: "W.S. 1-21-1208".to_string(),
            topic: "security_deposit".to_string(),
            content: "The deposit shall be returned within thirty days after termination \
                      of the rental agreement, less any deductions itemized in writing."
                .to_string(),
            similarity: 0.89,
        }])
    }
}

/// Config with tight timing so paused-clock tests advance quickly
pub(crate) fn test_config() -> Config {
    Config {
        extraction_provider: "scripted".to_string(),
        reasoning_provider: "scripted".to_string(),
        max_retries: 1,
        retry_base_delay: std::time::Duration::from_millis(10),
        retry_max_delay: std::time::Duration::from_millis(40),
        call_timeout: std::time::Duration::from_secs(5),
        ..Config::default()
    }
}

pub(crate) fn scripted_gateway(provider: Arc<ScriptedProvider>) -> crate::gateway::ModelGateway {
    let mut gateway = crate::gateway::ModelGateway::new(&test_config());
    gateway.register_provider("scripted", provider);
    gateway
}

pub(crate) fn sample_facts_json() -> String {
    serde_json::json!({
        "parties": {
            "plaintiff": {"name": "Dana Reyes", "role_description": "former tenant"},
            "defendant": {"name": "Bridger Property LLC", "role_description": "landlord"}
        },
        "claims": [{
            "description": "Security deposit of $1,500 not returned after move-out",
            "amount": 1500.0,
            "basis": "statute"
        }],
        "key_dates": [
            {"date": "2026-03-31", "event": "Lease ended and keys returned"},
            {"date": "2026-05-15", "event": "Demand letter sent"}
        ],
        "claimed_amount": 1500.0,
        "evidence_mentioned": {
            "plaintiff": [
                {"type": "photo", "description": "Move-out photos of the unit"},
                {"type": "document", "description": "Signed move-out checklist"}
            ],
            "defendant": [
                {"type": "testimony", "description": "Claims carpet damage beyond normal wear"}
            ]
        },
        "disputed_issues": [{
            "issue": "Whether carpet wear exceeded normal use",
            "plaintiff_position": "Carpet was professionally cleaned at move-out",
            "defendant_position": "Carpet required full replacement"
        }],
        "undisputed_facts": ["A $1,500 deposit was paid at lease signing"]
    })
    .to_string()
}

pub(crate) fn sample_classification_json() -> String {
    serde_json::json!({
        "primary_type": "security_deposit",
        "primary_confidence": 0.95,
        "secondary_type": null,
        "secondary_confidence": null,
        "legal_issues": [{
            "issue": "Timely return of security deposit",
            "elements_to_prove": ["Deposit paid", "Tenancy ended", "No itemized deductions"],
            "relevant_law": "W.S. 1-21-1208"
        }],
        "jurisdictional_check": {
            "amount_within_limit": true,
            "proper_claim_type": true,
            "notes": "Within the small claims limit"
        },
        "complexity_score": 2,
        "summary": "Tenant seeks return of a $1,500 security deposit withheld without itemization."
    })
    .to_string()
}

pub(crate) fn sample_scores_json() -> String {
    serde_json::json!({
        "element_scores": [
            {
                "element": "A security deposit was paid",
                "plaintiff_score": 3,
                "plaintiff_evidence": "Lease and receipt",
                "plaintiff_explanation": "Clear documentation",
                "defendant_score": 0,
                "defendant_evidence": "",
                "defendant_explanation": "Payment undisputed",
                "net_assessment": "Strongly favors plaintiff"
            },
            {
                "element": "The tenancy has ended",
                "plaintiff_score": 3,
                "plaintiff_evidence": "Move-out checklist",
                "plaintiff_explanation": "Signed by both parties",
                "defendant_score": 0,
                "defendant_evidence": "",
                "defendant_explanation": "End of tenancy undisputed",
                "net_assessment": "Strongly favors plaintiff"
            },
            {
                "element": "The landlord failed to return the deposit or provide itemized deductions within the statutory period",
                "plaintiff_score": 2,
                "plaintiff_evidence": "Demand letter, no written itemization received",
                "plaintiff_explanation": "Partial documentation of the failure",
                "defendant_score": 1,
                "defendant_evidence": "Oral claim of carpet damage",
                "defendant_explanation": "No written itemization produced",
                "net_assessment": "Favors plaintiff"
            }
        ],
        "overall_plaintiff_strength": 3,
        "overall_defendant_strength": 1,
        "credibility_notes": "Plaintiff's account is consistent with the documents",
        "evidence_gaps": ["No receipt for the claimed carpet replacement"],
        "key_evidence_summary": "Documents support the deposit and its non-return"
    })
    .to_string()
}

pub(crate) fn sample_reasoning_json() -> String {
    serde_json::json!({
        "factual_narrative": "Tenant paid a $1,500 deposit, vacated on time, and never received \
            the deposit or an itemized deduction statement.",
        "credibility_assessment": "Plaintiff credible and corroborated; defendant's damage claim \
            lacks documentation.",
        "evidence_analysis": {
            "strongest_plaintiff_evidence": "Signed move-out checklist and photos",
            "strongest_defendant_evidence": "Testimony about carpet condition",
            "key_evidence_conflicts": "Condition of the carpet at move-out"
        },
        "liability_analysis": [
            {"element": "A security deposit was paid", "finding": "proven",
             "reasoning": "Lease and receipt establish payment"},
            {"element": "The tenancy has ended", "finding": "proven",
             "reasoning": "Move-out checklist signed by both parties"},
            {"element": "The landlord failed to return the deposit or provide itemized deductions within the statutory period",
             "finding": "proven",
             "reasoning": "No itemization was produced within thirty days"}
        ],
        "damages_analysis": {
            "damages_proven": true,
            "amount_claimed": 1500.0,
            "amount_justified": 1500.0,
            "reasoning": "The full deposit is recoverable absent itemized deductions"
        },
        "counterclaim_analysis": {
            "counterclaim_exists": false,
            "counterclaim_merit": null,
            "counterclaim_amount": null
        },
        "final_determination": {
            "prevailing_party": "plaintiff",
            "reasoning_summary": "All statutory elements proven by a preponderance",
            "confidence": "high"
        }
    })
    .to_string()
}

pub(crate) fn sample_judgment_json() -> String {
    serde_json::json!({
        "findings_of_fact": [
            "Plaintiff paid a $1,500 security deposit",
            "The tenancy ended on March 31, 2026",
            "No itemized deduction statement was provided"
        ],
        "conclusions_of_law": [{
            "conclusion": "Defendant forfeited the right to withhold the deposit",
            "legal_basis": "W.S. 1-21-1208"
        }],
        "judgment_text": "Judgment for the plaintiff in the amount of $1,500.",
        "rationale": "The statute requires itemized deductions in writing; none were given.",
        "awarded_amount": 1500.0,
        "in_favor_of": "plaintiff",
        "costs_awarded": true,
        "costs_note": "Filing fee awarded to the prevailing party"
    })
    .to_string()
}

pub(crate) fn sample_advisory_json() -> String {
    serde_json::json!({
        "evidence_actions": [{
            "element": "Failure to return the deposit",
            "current_strength": "moderate",
            "action": "Obtain certified-mail proof of the demand letter",
            "what_to_bring": "Mailing receipt and a copy of the letter",
            "impact": "Removes any dispute about notice"
        }],
        "strategic_advice": [{
            "category": "presentation",
            "title": "Lead with the statute",
            "advice": "Open with the thirty-day itemization requirement before the facts.",
            "priority": "high"
        }],
        "court_preparation": {
            "case_summary": "Statutory security-deposit claim with documentary support",
            "evidence_checklist": [{
                "item": "Lease agreement",
                "priority": "critical",
                "note": "Shows the deposit amount"
            }],
            "opening_statement": "This case is about a deposit the law required to be returned.",
            "anticipated_questions": [{
                "question": "Did you leave the unit damaged?",
                "suggested_approach": "Point to the signed checklist and photos"
            }],
            "key_points": ["No itemization was ever provided"]
        }
    })
    .to_string()
}
