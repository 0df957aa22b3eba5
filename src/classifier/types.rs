//! Shared types for the classification pipeline.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ── Label ───────────────────────────────────────────────────────────

/// Classification label: does this message require action?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    /// Actionable — expects a follow-up from the recipient.
    Productive,
    /// Non-actionable — greetings, thanks, spam, social noise.
    Unproductive,
}

impl Label {
    /// Wire/display form, matching the stored classification values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Productive => "PRODUCTIVE",
            Self::Unproductive => "UNPRODUCTIVE",
        }
    }
}

// ── Classification result ───────────────────────────────────────────

/// Result of classifying one email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// The decided label.
    pub label: Label,
    /// Templated auto-reply for the label.
    pub reply: String,
    /// When classification completed.
    pub classified_at: DateTime<Utc>,
}

// ── Model verdict ───────────────────────────────────────────────────

/// Outcome of asking the statistical model for a verdict.
///
/// "Unavailable" is an expected state, not an error: the hybrid policy
/// branches on it explicitly and falls back to keyword rules.
#[derive(Debug, Clone)]
pub enum ModelVerdict {
    /// The model produced a usable label.
    Available { label: Label, confidence: f32 },
    /// No model verdict for this call.
    Unavailable { reason: UnavailableReason },
}

/// Why the statistical model produced no verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The runtime toggle is off.
    Disabled,
    /// Neither the primary nor the fallback model could be loaded.
    /// Sticky until the toggle is cycled off and on.
    LoadFailed,
    /// Inference failed for this call only.
    InferenceFailed,
}

impl UnavailableReason {
    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::LoadFailed => "load_failed",
            Self::InferenceFailed => "inference_failed",
        }
    }
}

// ── Model seam ──────────────────────────────────────────────────────

/// Index of the class a sequence model treats as "productive".
pub const POSITIVE_CLASS: usize = 1;

/// Raw two-class output of a sequence-classification model.
#[derive(Debug, Clone, Copy)]
pub struct ModelOutput {
    /// Index of the winning class ([`POSITIVE_CLASS`] means productive).
    pub class_id: usize,
    /// Softmax probability of the winning class, in [0, 1].
    pub confidence: f32,
}

/// A loaded two-class sequence-classification model.
///
/// `infer` takes `&mut self` because inference sessions are stateful;
/// the adapter serializes all calls behind its own lock.
#[async_trait]
pub trait SequenceModel: Send {
    /// Run the feature string through the model.
    async fn infer(&mut self, text: &str) -> Result<ModelOutput, ModelError>;

    /// Model identifier for logging.
    fn name(&self) -> &str;
}

/// Loads a sequence model on demand.
///
/// The adapter calls this lazily on first enabled use. Implementations are
/// expected to try a fallback model internally before giving up.
pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<Box<dyn SequenceModel>, ModelError>;
}
