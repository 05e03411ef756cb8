//! Stage functions and the pipeline orchestrator
//!
//! Five sequential analytical stages (facts → classification → evidence →
//! reasoning → decision) plus a concurrent advisory stage, each issuing at
//! most one gateway call and decoding a structured result.

pub mod advisory;
pub mod classify;
pub mod decision;
pub mod evidence;
pub mod facts;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod reasoning;

use serde::Serialize;

use crate::gateway::GatewayResponse;
use crate::model::CallRecord;

pub use output::StageOutput;
pub use pipeline::{Pipeline, PipelineError, VerdictBundle, VerdictRequest};

/// Provider/model pair a stage call is routed to
#[derive(Debug, Clone)]
pub struct StageRoute {
    pub provider: String,
    pub model: String,
}

/// Ledger entry for one stage's gateway call
pub(crate) fn call_record(stage: &str, response: &GatewayResponse) -> CallRecord {
    CallRecord {
        stage: stage.to_string(),
        model: response.model.clone(),
        input_tokens: response.input_tokens,
        output_tokens: response.output_tokens,
        cost_usd: response.cost_usd,
        latency_ms: response.latency_ms,
    }
}

/// Pretty JSON for prompt context; degrades to an empty object rather than
/// failing a stage over a serialization problem
pub(crate) fn context_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
