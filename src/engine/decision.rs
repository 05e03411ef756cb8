//! Stage 6: formal judgment drafting

use crate::gateway::{ChatRequest, GatewayError, ModelGateway};
use crate::model::{
    Archetype, CallRecord, CaseFacts, Classification, EvidenceScores, Judgment, ReasoningChain,
};

use super::output::StageOutput;
use super::prompts::{with_archetype, DECISION_PROMPT};
use super::{call_record, context_json, StageRoute};

pub const STAGE: &str = "decision_generation";

pub async fn generate_decision(
    gateway: &ModelGateway,
    route: &StageRoute,
    reasoning: &StageOutput<ReasoningChain>,
    facts: &StageOutput<CaseFacts>,
    classification: &Classification,
    scores: &StageOutput<EvidenceScores>,
    archetype: &Archetype,
) -> Result<(StageOutput<Judgment>, CallRecord), GatewayError> {
    let system = with_archetype(DECISION_PROMPT, archetype.name, archetype.personality_prompt);

    let context = format!(
        "CASE TYPE: {}\n\nREASONING CHAIN:\n{}\n\nEXTRACTED FACTS (for party names):\n{}\n\n\
         EVIDENCE SCORES:\n{}",
        if classification.primary_type.is_empty() {
            "unknown"
        } else {
            &classification.primary_type
        },
        context_json(reasoning),
        context_json(facts),
        context_json(scores),
    );

    let request = ChatRequest::new(&route.model, system, context)
        .temperature(0.2)
        .max_tokens(4096);

    let response = gateway.invoke(&route.provider, request).await?;
    let judgment = StageOutput::decode(&response.content);

    Ok((judgment, call_record(STAGE, &response)))
}
