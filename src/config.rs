//! Configuration types.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Classifier configuration.
///
/// Read once at process start. The statistical-model flag is the only value
/// that changes afterwards, and only through
/// [`EmailClassifier::set_statistical_model`](crate::classifier::EmailClassifier::set_statistical_model).
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Whether the statistical model participates in classification.
    pub use_statistical_model: bool,
    /// Confidence above which a model verdict is treated as productive
    /// regardless of its predicted class. Must be in (0, 1).
    pub confidence_threshold: f32,
    /// Directory holding the primary model (`model.onnx` + `tokenizer.json`).
    pub primary_model_dir: PathBuf,
    /// Directory holding the fallback model, tried when the primary fails.
    pub fallback_model_dir: PathBuf,
    /// Token truncation limit for model input.
    pub max_sequence_length: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            use_statistical_model: false,
            confidence_threshold: 0.7,
            primary_model_dir: PathBuf::from("models/bert-base-portuguese-cased"),
            fallback_model_dir: PathBuf::from("models/distilbert-base-multilingual-cased"),
            max_sequence_length: 512,
        }
    }
}

impl ClassifierConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let use_statistical_model = std::env::var("MAIL_TRIAGE_USE_MODEL")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(defaults.use_statistical_model);

        let confidence_threshold = std::env::var("MAIL_TRIAGE_CONFIDENCE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.confidence_threshold);

        let primary_model_dir = std::env::var("MAIL_TRIAGE_PRIMARY_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.primary_model_dir);

        let fallback_model_dir = std::env::var("MAIL_TRIAGE_FALLBACK_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.fallback_model_dir);

        Self {
            use_statistical_model,
            confidence_threshold,
            primary_model_dir,
            fallback_model_dir,
            max_sequence_length: defaults.max_sequence_length,
        }
    }

    /// Validate values that would break the classification invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.confidence_threshold > 0.0 && self.confidence_threshold < 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "confidence_threshold".into(),
                message: format!(
                    "must be strictly between 0 and 1, got {}",
                    self.confidence_threshold
                ),
            });
        }
        if self.max_sequence_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_sequence_length".into(),
                message: "must be non-zero".into(),
            });
        }
        Ok(())
    }
}
