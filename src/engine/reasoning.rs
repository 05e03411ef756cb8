//! Stage 5: judicial reasoning
//!
//! Produces the structured reasoning chain every downstream artifact
//! depends on, in the voice of the active archetype.

use crate::gateway::{ChatRequest, GatewayError, ModelGateway};
use crate::model::{
    Archetype, CallRecord, CaseFacts, Classification, EvidenceScores, HearingMessage,
    ReasoningChain,
};
use crate::rules::ApplicableRules;

use super::output::StageOutput;
use super::prompts::{with_archetype, REASONING_PROMPT};
use super::{call_record, context_json, StageRoute};

pub const STAGE: &str = "judicial_reasoning";

/// Retrieved snippets are clipped to keep the context bounded
const MAX_SNIPPET_CHARS: usize = 500;

#[allow(clippy::too_many_arguments)]
pub async fn generate_reasoning(
    gateway: &ModelGateway,
    route: &StageRoute,
    facts: &StageOutput<CaseFacts>,
    classification: &Classification,
    rules: &ApplicableRules,
    scores: &StageOutput<EvidenceScores>,
    archetype: &Archetype,
    hearing_transcript: Option<&[HearingMessage]>,
) -> Result<(StageOutput<ReasoningChain>, CallRecord), GatewayError> {
    let system = with_archetype(REASONING_PROMPT, archetype.name, archetype.personality_prompt);

    let mut context = format!(
        "CASE TYPE: {}\nCASE SUMMARY: {}\n\nEXTRACTED FACTS:\n{}\n\nLEGAL ISSUES:\n{}\n\n\
         APPLICABLE RULES AND CLAIM ELEMENTS:\n{}\n\nRETRIEVED LEGAL AUTHORITIES:\n",
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
        context_json(facts),
        context_json(&classification.legal_issues),
        context_json(&serde_json::json!({
            "claim_elements": rules.claim_elements,
            "static_rules": rules.static_rules,
        })),
    );

    for chunk in &rules.retrieved_corpus {
        let clipped: String = chunk.content.chars().take(MAX_SNIPPET_CHARS).collect();
        context.push_str(&format!(
            "  [{}] {} - {}\n  {}\n",
            chunk.source_type.to_uppercase(),
            chunk.section_number,
            chunk.source_title,
            clipped,
        ));
    }

    context.push_str(&format!("\nEVIDENCE SCORES:\n{}", context_json(scores)));

    if let Some(transcript) = hearing_transcript {
        context.push_str("\n\nHEARING TRANSCRIPT:\n");
        for message in transcript {
            context.push_str(&format!(
                "  {}: {}\n",
                message.role.to_uppercase(),
                message.content
            ));
        }
    }

    let request = ChatRequest::new(&route.model, system, context)
        .temperature(0.3)
        .max_tokens(6000);

    let response = gateway.invoke(&route.provider, request).await?;
    let reasoning = StageOutput::decode(&response.content);

    Ok((reasoning, call_record(STAGE, &response)))
}
