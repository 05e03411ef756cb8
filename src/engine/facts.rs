//! Stage 1: fact extraction
//!
//! Turns both parties' raw narratives into structured case facts.

use crate::gateway::{ChatRequest, GatewayError, ModelGateway};
use crate::model::{CallRecord, CaseFacts};

use super::output::StageOutput;
use super::prompts::FACT_EXTRACTION_PROMPT;
use super::{call_record, StageRoute};

pub const STAGE: &str = "fact_extraction";

pub async fn extract_facts(
    gateway: &ModelGateway,
    route: &StageRoute,
    plaintiff_narrative: &str,
    defendant_narrative: &str,
    plaintiff_name: &str,
    defendant_name: &str,
    claimed_amount: Option<f64>,
) -> Result<(StageOutput<CaseFacts>, CallRecord), GatewayError> {
    let mut user_message = format!(
        "PLAINTIFF ({plaintiff_name}) NARRATIVE:\n{plaintiff_narrative}\n\n\
         DEFENDANT ({defendant_name}) NARRATIVE:\n{defendant_narrative}"
    );
    if let Some(amount) = claimed_amount {
        user_message.push_str(&format!("\n\nCLAIMED AMOUNT: ${amount:.2}"));
    }

    let request = ChatRequest::new(&route.model, FACT_EXTRACTION_PROMPT, user_message)
        .temperature(0.1)
        .max_tokens(4096)
        .json_output();

    let response = gateway.invoke(&route.provider, request).await?;
    let facts = StageOutput::decode(&response.content);

    Ok((facts, call_record(STAGE, &response)))
}
