//! Stage 4: evidence scoring
//!
//! Rates each side's evidence per claim element on the 0-3 rubric, with the
//! archetype's weighting preferences appended to the context.

use crate::gateway::{ChatRequest, GatewayError, ModelGateway};
use crate::model::{Archetype, CallRecord, CaseFacts, Classification, EvidenceScores};
use crate::rules::ClaimElementChecklist;

use super::output::StageOutput;
use super::prompts::EVIDENCE_SCORING_PROMPT;
use super::{call_record, context_json, StageRoute};

pub const STAGE: &str = "evidence_scoring";

pub async fn score_evidence(
    gateway: &ModelGateway,
    route: &StageRoute,
    facts: &StageOutput<CaseFacts>,
    classification: &Classification,
    checklist: &ClaimElementChecklist,
    archetype: &Archetype,
) -> Result<(StageOutput<EvidenceScores>, CallRecord), GatewayError> {
    let mut context = format!(
        "CASE TYPE: {}\nCASE SUMMARY: {}\n\nELEMENTS PLAINTIFF MUST PROVE:\n",
        non_empty(&classification.primary_type, "unknown"),
        non_empty(&classification.summary, "N/A"),
    );
    for (i, element) in checklist.elements.iter().enumerate() {
        context.push_str(&format!("  {}. {element}\n", i + 1));
    }
    context.push_str(&format!(
        "\nDAMAGES MEASURE: {}\n\nEXTRACTED FACTS:\n{}",
        checklist.damages_measure,
        context_json(facts),
    ));
    context.push_str(&format!(
        "\n\nJUDGE PREFERENCES:\n{}",
        context_json(&archetype.evidence_modifiers),
    ));

    let request = ChatRequest::new(&route.model, EVIDENCE_SCORING_PROMPT, context)
        .temperature(0.2)
        .max_tokens(4096);

    let response = gateway.invoke(&route.provider, request).await?;
    let scores = StageOutput::decode(&response.content);

    Ok((scores, call_record(STAGE, &response)))
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
