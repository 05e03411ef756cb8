//! Tolerant decoding of structured model output
//!
//! A stage never fails on malformed text. Decoding tries the raw response
//! first, then the outermost object boundaries, and otherwise yields an
//! explicit degraded artifact carrying the raw text so the orchestrator can
//! decide how to proceed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Result of decoding one stage's model response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StageOutput<T> {
    Parsed(T),
    Malformed { error: String, raw: String },
}

impl<T: DeserializeOwned> StageOutput<T> {
    /// Decode a model response, salvaging an embedded JSON object from
    /// surrounding prose when direct decoding fails
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<T>(raw) {
            Ok(value) => StageOutput::Parsed(value),
            Err(first_error) => {
                if let Some(candidate) = outermost_object(raw) {
                    if let Ok(value) = serde_json::from_str::<T>(candidate) {
                        return StageOutput::Parsed(value);
                    }
                }
                tracing::warn!(error = %first_error, "stage output failed structured decode");
                StageOutput::Malformed {
                    error: first_error.to_string(),
                    raw: raw.to_string(),
                }
            }
        }
    }
}

impl<T> StageOutput<T> {
    pub fn as_parsed(&self) -> Option<&T> {
        match self {
            StageOutput::Parsed(value) => Some(value),
            StageOutput::Malformed { .. } => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, StageOutput::Malformed { .. })
    }
}

impl<T: Default + Clone> StageOutput<T> {
    /// The parsed value, or a neutral default when the stage degraded
    pub fn parsed_or_default(&self) -> T {
        match self {
            StageOutput::Parsed(value) => value.clone(),
            StageOutput::Malformed { .. } => T::default(),
        }
    }
}

/// Locate the outermost `{ ... }` span in free text
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(default)]
        value: u32,
    }

    #[test]
    fn decodes_clean_json() {
        let output: StageOutput<Sample> = StageOutput::decode(r#"{"value": 7}"#);
        assert_eq!(output.as_parsed(), Some(&Sample { value: 7 }));
    }

    #[test]
    fn salvages_object_wrapped_in_prose() {
        let raw = "Here is my analysis:\n{\"value\": 3}\nLet me know if you need more.";
        let output: StageOutput<Sample> = StageOutput::decode(raw);
        assert_eq!(output.as_parsed(), Some(&Sample { value: 3 }));
    }

    #[test]
    fn garbage_becomes_degraded_artifact() {
        let output: StageOutput<Sample> = StageOutput::decode("I cannot answer that.");
        match &output {
            StageOutput::Malformed { raw, error } => {
                assert_eq!(raw, "I cannot answer that.");
                assert!(!error.is_empty());
            }
            StageOutput::Parsed(_) => panic!("expected malformed"),
        }
        assert_eq!(output.parsed_or_default(), Sample::default());
    }

    #[test]
    fn malformed_serializes_as_error_artifact() {
        let output: StageOutput<Sample> = StageOutput::decode("nope");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["raw"], "nope");
        assert!(json["error"].is_string());
    }
}
