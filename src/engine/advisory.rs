//! Stage 7: case advisory
//!
//! Combines two deterministic computations (case-strength score, evidence
//! recommendations) with one focused model call for actionable text. The
//! advisory is informational only and never feeds back into the judgment.

use crate::gateway::{ChatRequest, GatewayError, ModelGateway};
use crate::model::{
    Advisory, AdvisoryText, CallRecord, CaseFacts, CaseStrength, Classification,
    EvidenceRecommendation, EvidenceScores, Priority, ReasoningChain, StrengthLabel,
};
use crate::model::evidence::MAX_ELEMENT_SCORE;
use crate::rules::ClaimElementChecklist;

use super::output::StageOutput;
use super::prompts::ADVISORY_PROMPT;
use super::{call_record, context_json, StageRoute};

pub const STAGE: &str = "case_advisory";

/// Derive the 0-10 case-strength score from existing pipeline data.
/// Weighted composite of evidentiary advantage, proven-element rate,
/// absolute evidence quality, and a damages modifier, scaled by the stated
/// confidence. Pure arithmetic, no model call.
pub fn compute_case_strength(scores: &EvidenceScores, reasoning: &ReasoningChain) -> CaseStrength {
    let avg_plaintiff = scores.avg_plaintiff_score();
    let avg_defendant = scores.avg_defendant_score();

    let total = (avg_plaintiff + avg_defendant).max(0.01);
    let advantage_ratio = avg_plaintiff / total;

    let confidence = reasoning.final_determination.confidence;
    let element_rate = reasoning.proven_element_rate();
    let damages = &reasoning.damages_analysis;
    let damages_mod = if damages.damages_proven { 1.0 } else { 0.7 };

    let raw_score = (advantage_ratio * 3.0
        + element_rate * 4.0
        + avg_plaintiff / f64::from(MAX_ELEMENT_SCORE) * 2.0
        + damages_mod)
        * confidence.strength_multiplier();

    let score = (raw_score.clamp(0.0, 10.0) * 10.0).round() / 10.0;

    CaseStrength {
        score,
        label: StrengthLabel::from_score(score),
        prevailing_party: reasoning.final_determination.prevailing_party,
        confidence,
        elements_proven: reasoning.proven_element_count(),
        elements_total: reasoning.liability_analysis.len(),
        damages_proven: damages.damages_proven,
        amount_justified: (damages.amount_justified > 0.0).then_some(damages.amount_justified),
    }
}

/// Remediation note for every claim element scored below the rubric
/// maximum, ordered by priority. Pure data transformation.
pub fn derive_evidence_recommendations(scores: &EvidenceScores) -> Vec<EvidenceRecommendation> {
    let mut recommendations: Vec<EvidenceRecommendation> = scores
        .element_scores
        .iter()
        .filter(|entry| entry.plaintiff_score < MAX_ELEMENT_SCORE)
        .map(|entry| {
            let priority = match entry.plaintiff_score {
                0 => Priority::Critical,
                1 => Priority::High,
                _ => Priority::Medium,
            };
            let gap_description = match entry.plaintiff_score {
                0 => "You have no evidence for this element. This is a significant gap the \
                      judge will notice.",
                1 => "You only have self-serving testimony. Bring documentary evidence to \
                      corroborate your claim.",
                _ => "You have partial documentation. Strengthen with additional records, \
                      timestamps, or third-party verification.",
            };
            EvidenceRecommendation {
                element: entry.element.clone(),
                current_score: entry.plaintiff_score,
                defendant_score: entry.defendant_score,
                priority,
                gap_description: gap_description.to_string(),
                plaintiff_evidence: entry.plaintiff_evidence.clone(),
                net_assessment: entry.net_assessment.clone(),
            }
        })
        .collect();

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

/// Generate the complete advisory: deterministic metrics plus one model
/// call for the actionable text sections
#[allow(clippy::too_many_arguments)]
pub async fn generate_advisory(
    gateway: &ModelGateway,
    route: &StageRoute,
    facts: &StageOutput<CaseFacts>,
    classification: &Classification,
    scores: &StageOutput<EvidenceScores>,
    reasoning: &StageOutput<ReasoningChain>,
    checklist: &ClaimElementChecklist,
    claimed_amount: Option<f64>,
) -> Result<(Advisory, CallRecord), GatewayError> {
    let scores_view = scores.parsed_or_default();
    let reasoning_view = reasoning.parsed_or_default();

    let case_strength = compute_case_strength(&scores_view, &reasoning_view);
    let evidence_recommendations = derive_evidence_recommendations(&scores_view);

    let claimed_line = match claimed_amount {
        Some(amount) => format!("CLAIMED AMOUNT: ${amount:.2}"),
        None => "CLAIMED AMOUNT: Not specified".to_string(),
    };
    let context = format!(
        "CASE TYPE: {}\nCASE SUMMARY: {}\n{claimed_line}\n\
         CASE STRENGTH SCORE: {}/10\n\
         PREVAILING PARTY (predicted): {}\n\
         ELEMENTS PROVEN: {}/{}\n\
         DAMAGES PROVEN: {}\n\n\
         EXTRACTED FACTS:\n{}\n\nEVIDENCE SCORES:\n{}\n\nREASONING CHAIN:\n{}\n\n\
         CLAIM ELEMENTS REQUIRED:\n{}",
        if classification.primary_type.is_empty() {
            "unknown"
        } else {
            &classification.primary_type
        },
        if classification.summary.is_empty() {
            "N/A"
        } else {
            &classification.summary
        },
        case_strength.score,
        case_strength.prevailing_party.as_str(),
        case_strength.elements_proven,
        case_strength.elements_total,
        case_strength.damages_proven,
        context_json(facts),
        context_json(scores),
        context_json(reasoning),
        context_json(checklist),
    );

    let request = ChatRequest::new(&route.model, ADVISORY_PROMPT, context)
        .temperature(0.3)
        .max_tokens(4096);

    let response = gateway.invoke(&route.provider, request).await?;
    let text: StageOutput<AdvisoryText> = StageOutput::decode(&response.content);
    if text.is_malformed() {
        tracing::warn!("advisory text degraded, returning deterministic sections only");
    }
    let text = text.parsed_or_default();

    let advisory = Advisory {
        case_strength,
        evidence_recommendations,
        evidence_actions: text.evidence_actions,
        strategic_advice: text.strategic_advice,
        court_preparation: text.court_preparation,
    };

    Ok((advisory, call_record(STAGE, &response)))
}
