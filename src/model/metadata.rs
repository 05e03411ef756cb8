//! Cost and latency accounting for every external model call

use serde::{Deserialize, Serialize};

/// One entry in the append-only call ledger, persisted alongside the
/// judgment for auditability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    /// Pipeline stage that issued the call
    pub stage: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub cost_usd: f64,
    pub latency_ms: u64,
}

/// Aggregated accounting for a single pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineMetadata {
    pub total_cost_usd: f64,
    pub total_latency_ms: u64,
    pub calls: Vec<CallRecord>,
    pub stages_completed: u8,
}

impl PipelineMetadata {
    pub fn record(&mut self, call: CallRecord) {
        self.total_cost_usd += call.cost_usd;
        self.total_latency_ms += call.latency_ms;
        self.calls.push(call);
    }
}
