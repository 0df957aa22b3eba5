//! Hybrid decision policy — the classification entry point.
//!
//! Two effective modes, driven by the runtime toggle:
//! - rule-only: keyword rules decide (toggle off, or model unavailable)
//! - hybrid: the statistical model decides; keyword rules take over per-call
//!   whenever the model reports itself unavailable
//!
//! Messages whose content normalizes to nothing short-circuit to
//! unproductive before either classifier runs.

use chrono::Utc;
use tracing::debug;

use crate::classifier::keywords::KeywordEngine;
use crate::classifier::model::StatisticalAdapter;
use crate::classifier::normalize::TextNormalizer;
use crate::classifier::responses::{EMPTY_CONTENT_REPLY, ResponseGenerator};
use crate::classifier::types::{
    Classification, Label, ModelLoader, ModelVerdict, UnavailableReason,
};
use crate::config::ClassifierConfig;
use crate::error::ConfigError;

/// Hybrid email classifier.
///
/// Construction is the only fallible step: empty keyword sets, empty
/// template pools, and out-of-range thresholds are rejected up front.
/// After that, [`classify`](Self::classify) is total — it never errors
/// and never panics, whatever the input.
pub struct EmailClassifier {
    normalizer: TextNormalizer,
    keywords: KeywordEngine,
    responses: ResponseGenerator,
    adapter: StatisticalAdapter,
}

impl EmailClassifier {
    /// Build the classifier from config and a model loader.
    ///
    /// The loader is only invoked lazily, on the first classification with
    /// the statistical model enabled.
    pub fn new(
        config: &ClassifierConfig,
        loader: Box<dyn ModelLoader>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            normalizer: TextNormalizer::new(),
            keywords: KeywordEngine::new()?,
            responses: ResponseGenerator::new()?,
            adapter: StatisticalAdapter::new(
                loader,
                config.confidence_threshold,
                config.use_statistical_model,
            ),
        })
    }

    /// Classify one email and render its reply.
    pub async fn classify(&self, subject: &str, message: &str) -> Classification {
        let features = self.normalizer.extract_features(subject, message);

        if features.is_empty() {
            debug!("no significant content after normalization");
            return Classification {
                label: Label::Unproductive,
                reply: EMPTY_CONTENT_REPLY.to_string(),
                classified_at: Utc::now(),
            };
        }

        let label = match self.adapter.classify(&features).await {
            ModelVerdict::Available { label, confidence } => {
                debug!(
                    label = label.as_str(),
                    confidence, "statistical verdict accepted"
                );
                label
            }
            ModelVerdict::Unavailable { reason } => {
                if reason != UnavailableReason::Disabled {
                    debug!(reason = reason.as_str(), "falling back to keyword rules");
                }
                self.keywords.classify(subject, message)
            }
        };

        Classification {
            label,
            reply: self.responses.generate(label, subject),
            classified_at: Utc::now(),
        }
    }

    /// Flip the statistical-model toggle at runtime.
    pub async fn set_statistical_model(&self, enable: bool) {
        self.adapter.set_enabled(enable).await;
    }

    /// Whether the statistical model is currently enabled.
    pub async fn uses_statistical_model(&self) -> bool {
        self.adapter.is_enabled().await
    }
}
