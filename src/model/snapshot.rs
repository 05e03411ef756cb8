//! Read-only snapshots of case and hearing state
//!
//! These are the views the comparison engine reads from the persistence
//! collaborator. The full storage schema lives outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Case state as last persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSnapshot {
    pub id: Uuid,
    pub plaintiff_narrative: String,
    pub defendant_narrative: String,
    pub plaintiff_name: String,
    pub defendant_name: String,
    pub claimed_amount: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

/// One ordered message from a hearing transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HearingMessage {
    /// judge | plaintiff | defendant
    pub role: String,
    pub content: String,
    pub sequence: u32,
}

/// Hearing state, if a hearing exists for the case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HearingSnapshot {
    pub completed_at: Option<DateTime<Utc>>,
    pub messages: Vec<HearingMessage>,
}

impl HearingSnapshot {
    /// Transcript messages in sequence order
    pub fn transcript(&self) -> Vec<HearingMessage> {
        let mut messages = self.messages.clone();
        messages.sort_by_key(|m| m.sequence);
        messages
    }

    /// Whether the hearing has concluded. Prefers the persisted completion
    /// timestamp; otherwise applies the supplied transcript predicate to the
    /// latest judge message, since conclusion may only be signalled in
    /// generated text.
    pub fn is_concluded(&self, detector: &dyn Fn(&str) -> bool) -> bool {
        if self.completed_at.is_some() {
            return true;
        }
        self.messages
            .iter()
            .filter(|m| m.role == "judge")
            .max_by_key(|m| m.sequence)
            .map(|m| detector(&m.content))
            .unwrap_or(false)
    }
}
