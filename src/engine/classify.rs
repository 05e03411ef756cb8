//! Stage 2: issue classification

use crate::gateway::{ChatRequest, GatewayError, ModelGateway};
use crate::model::{CallRecord, CaseFacts, Classification};

use super::output::StageOutput;
use super::prompts::CLASSIFICATION_PROMPT;
use super::{call_record, context_json, StageRoute};

pub const STAGE: &str = "issue_classification";

pub async fn classify_issues(
    gateway: &ModelGateway,
    route: &StageRoute,
    facts: &StageOutput<CaseFacts>,
) -> Result<(StageOutput<Classification>, CallRecord), GatewayError> {
    let user_message = format!("EXTRACTED CASE FACTS:\n{}", context_json(facts));

    let request = ChatRequest::new(&route.model, CLASSIFICATION_PROMPT, user_message)
        .temperature(0.1)
        .max_tokens(2048)
        .json_output();

    let response = gateway.invoke(&route.provider, request).await?;
    let classification = StageOutput::decode(&response.content);

    Ok((classification, call_record(STAGE, &response)))
}
