//! Recognition event shapes crossing the capability boundary
//!
//! Engine output is shaped into an indexed event before it reaches the
//! UI: the full list of per-utterance result groups plus the index of the
//! group that changed. Events are validated at construction so malformed
//! payloads never cross the boundary.

use crate::{HolovoxError, Result};
use serde::{Deserialize, Serialize};

/// One recognition hypothesis for an utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionAlternative {
    /// Recognized text
    pub transcript: String,
    /// Engine confidence for this hypothesis, when available
    pub confidence: Option<f32>,
}

/// All hypotheses for one utterance, ordered best-first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub alternatives: Vec<RecognitionAlternative>,
    /// Whether the utterance is finalized or still being revised
    pub is_final: bool,
}

impl RecognitionResult {
    /// A result group holding a single hypothesis
    pub fn single(transcript: impl Into<String>, is_final: bool) -> Self {
        Self {
            alternatives: vec![RecognitionAlternative {
                transcript: transcript.into(),
                confidence: None,
            }],
            is_final,
        }
    }
}

/// A recognition update: every result group seen so far plus the index of
/// the group this update changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionEvent {
    pub result_index: usize,
    pub results: Vec<RecognitionResult>,
}

impl RecognitionEvent {
    /// Build an event, rejecting malformed shapes
    ///
    /// An empty result list, an out-of-range index, or a result group
    /// without alternatives all fail with [`HolovoxError::MalformedEvent`].
    pub fn validated(result_index: usize, results: Vec<RecognitionResult>) -> Result<Self> {
        if results.is_empty() {
            return Err(HolovoxError::MalformedEvent("empty result list".to_string()));
        }
        if result_index >= results.len() {
            return Err(HolovoxError::MalformedEvent(format!(
                "result index {} out of range for {} results",
                result_index,
                results.len()
            )));
        }
        if let Some(pos) = results.iter().position(|r| r.alternatives.is_empty()) {
            return Err(HolovoxError::MalformedEvent(format!(
                "result group {} has no alternatives",
                pos
            )));
        }
        Ok(Self {
            result_index,
            results,
        })
    }

    /// The transcript this event selects: the best hypothesis of the
    /// indexed result group
    pub fn transcript(&self) -> Option<&str> {
        self.results
            .get(self.result_index)?
            .alternatives
            .first()
            .map(|alt| alt.transcript.as_str())
    }

    /// Whether the indexed result group is finalized
    pub fn is_final(&self) -> bool {
        self.results
            .get(self.result_index)
            .map(|r| r.is_final)
            .unwrap_or(false)
    }
}
