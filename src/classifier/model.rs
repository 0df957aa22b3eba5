//! Statistical classifier adapter.
//!
//! Wraps a pretrained two-class sequence-classification model behind a
//! runtime toggle. The model is loaded lazily on first enabled use; if both
//! the primary and the fallback model fail to load, the adapter stays
//! unavailable until the toggle is cycled off and on. Inference failures are
//! transient — they degrade a single call, not the session.
//!
//! The adapter never errors toward its caller: every outcome is expressed
//! as a [`ModelVerdict`], and the hybrid policy branches on it.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::classifier::types::{
    Label, ModelLoader, ModelVerdict, POSITIVE_CLASS, SequenceModel, UnavailableReason,
};
use crate::error::ModelError;

#[derive(Default)]
struct AdapterState {
    enabled: bool,
    model: Option<Box<dyn SequenceModel>>,
    /// Set when both load attempts failed; cleared by cycling the toggle.
    load_failed: bool,
}

/// Toggleable, lazily-loading wrapper around a [`SequenceModel`].
///
/// All state lives behind one lock, so loads, unloads, and inference are
/// serialized — a classification call can never observe a half-initialized
/// model.
pub struct StatisticalAdapter {
    loader: Box<dyn ModelLoader>,
    confidence_threshold: f32,
    state: Mutex<AdapterState>,
}

impl StatisticalAdapter {
    pub fn new(loader: Box<dyn ModelLoader>, confidence_threshold: f32, enabled: bool) -> Self {
        Self {
            loader,
            confidence_threshold,
            state: Mutex::new(AdapterState {
                enabled,
                ..Default::default()
            }),
        }
    }

    /// Flip the runtime toggle.
    ///
    /// Enabling an already-loaded adapter is a no-op. Disabling drops the
    /// model handles so their memory can be reclaimed, and the next enable
    /// starts with a fresh load attempt.
    pub async fn set_enabled(&self, enable: bool) {
        let mut state = self.state.lock().await;
        if enable {
            state.enabled = true;
            state.load_failed = false;
        } else {
            state.enabled = false;
            state.model = None;
            state.load_failed = false;
        }
        info!(enabled = enable, "statistical model toggled");
    }

    /// Current toggle position.
    pub async fn is_enabled(&self) -> bool {
        self.state.lock().await.enabled
    }

    /// Ask the model for a verdict on the feature string.
    pub async fn classify(&self, feature_text: &str) -> ModelVerdict {
        let mut state = self.state.lock().await;

        if !state.enabled {
            return ModelVerdict::Unavailable {
                reason: UnavailableReason::Disabled,
            };
        }

        if state.model.is_none() {
            if state.load_failed {
                return ModelVerdict::Unavailable {
                    reason: UnavailableReason::LoadFailed,
                };
            }
            match self.loader.load() {
                Ok(model) => {
                    info!(model = model.name(), "loaded sequence classification model");
                    state.model = Some(model);
                }
                Err(e) => {
                    warn!(error = %e, "model load failed; keyword rules take over");
                    state.load_failed = true;
                    return ModelVerdict::Unavailable {
                        reason: UnavailableReason::LoadFailed,
                    };
                }
            }
        }

        let Some(model) = state.model.as_mut() else {
            return ModelVerdict::Unavailable {
                reason: UnavailableReason::LoadFailed,
            };
        };

        match model.infer(feature_text).await {
            Ok(output) => {
                // Positive class OR confidence above threshold → productive.
                // The OR mirrors the shipped behavior: a low-confidence
                // negative verdict stays negative, but any sufficiently
                // confident verdict is treated as actionable.
                let label = if output.class_id == POSITIVE_CLASS
                    || output.confidence > self.confidence_threshold
                {
                    Label::Productive
                } else {
                    Label::Unproductive
                };
                debug!(
                    class_id = output.class_id,
                    confidence = output.confidence,
                    label = label.as_str(),
                    "model verdict"
                );
                ModelVerdict::Available {
                    label,
                    confidence: output.confidence,
                }
            }
            Err(e) => {
                warn!(error = %e, "inference failed for this message");
                ModelVerdict::Unavailable {
                    reason: UnavailableReason::InferenceFailed,
                }
            }
        }
    }
}

/// Loader used when the crate is built without an inference backend.
///
/// Every load attempt fails, so the adapter degrades to keyword rules
/// exactly as it would after a real double load failure.
pub struct NullLoader;

impl ModelLoader for NullLoader {
    fn load(&self) -> Result<Box<dyn SequenceModel>, ModelError> {
        Err(ModelError::Load {
            model: "none".into(),
            reason: "no inference backend compiled in (enable the `onnx` feature)".into(),
        })
    }
}

#[cfg(feature = "onnx")]
pub use onnx::OnnxLoader;

/// ONNX Runtime backend for sequence classification.
#[cfg(feature = "onnx")]
mod onnx {
    use std::path::{Path, PathBuf};

    use async_trait::async_trait;
    use ort::session::Session;
    use ort::value::Tensor;
    use tokenizers::Tokenizer;
    use tracing::warn;

    use crate::classifier::types::{ModelLoader, ModelOutput, SequenceModel};
    use crate::error::ModelError;

    /// A two-class sequence-classification model served by ONNX Runtime.
    ///
    /// The model directory must contain `model.onnx` and `tokenizer.json`.
    pub struct OnnxSequenceModel {
        session: Session,
        tokenizer: Tokenizer,
        wants_type_ids: bool,
        name: String,
    }

    impl OnnxSequenceModel {
        /// Load a model from a directory containing `model.onnx` and
        /// `tokenizer.json`, truncating input to `max_length` tokens.
        pub fn load(model_dir: &Path, max_length: usize) -> Result<Self, ModelError> {
            let name = model_dir.display().to_string();
            let model_path = model_dir.join("model.onnx");
            let tokenizer_path = model_dir.join("tokenizer.json");

            if !model_path.exists() {
                return Err(ModelError::Load {
                    model: name,
                    reason: "model.onnx not found".into(),
                });
            }
            if !tokenizer_path.exists() {
                return Err(ModelError::Load {
                    model: name,
                    reason: "tokenizer.json not found".into(),
                });
            }

            let session = Session::builder()
                .and_then(|b| b.commit_from_file(&model_path))
                .map_err(|e| ModelError::Load {
                    model: name.clone(),
                    reason: e.to_string(),
                })?;

            // BERT-style models take token_type_ids; DistilBERT does not.
            let wants_type_ids = session
                .inputs()
                .iter()
                .any(|input| input.name() == "token_type_ids");

            let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
                ModelError::Load {
                    model: name.clone(),
                    reason: format!("load tokenizer: {e}"),
                }
            })?;
            tokenizer
                .with_truncation(Some(tokenizers::TruncationParams {
                    max_length,
                    ..Default::default()
                }))
                .map_err(|e| ModelError::Load {
                    model: name.clone(),
                    reason: format!("set truncation: {e}"),
                })?;

            Ok(Self {
                session,
                tokenizer,
                wants_type_ids,
                name,
            })
        }
    }

    #[async_trait]
    impl SequenceModel for OnnxSequenceModel {
        async fn infer(&mut self, text: &str) -> Result<ModelOutput, ModelError> {
            let encoding = self
                .tokenizer
                .encode(text, true)
                .map_err(|e| ModelError::Tokenize(e.to_string()))?;

            let seq_len = encoding.get_ids().len();
            let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
            let attention_mask: Vec<i64> = encoding
                .get_attention_mask()
                .iter()
                .map(|&m| m as i64)
                .collect();

            let shape = [1i64, seq_len as i64];
            let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))
                .map_err(|e| ModelError::Inference(e.to_string()))?;
            let mask_tensor = Tensor::from_array((shape, attention_mask.into_boxed_slice()))
                .map_err(|e| ModelError::Inference(e.to_string()))?;

            let outputs = if self.wants_type_ids {
                let token_type_ids: Vec<i64> = encoding
                    .get_type_ids()
                    .iter()
                    .map(|&t| t as i64)
                    .collect();
                let type_tensor = Tensor::from_array((shape, token_type_ids.into_boxed_slice()))
                    .map_err(|e| ModelError::Inference(e.to_string()))?;
                self.session.run(ort::inputs![
                    "input_ids" => ids_tensor,
                    "attention_mask" => mask_tensor,
                    "token_type_ids" => type_tensor,
                ])
            } else {
                self.session.run(ort::inputs![
                    "input_ids" => ids_tensor,
                    "attention_mask" => mask_tensor,
                ])
            }
            .map_err(|e| ModelError::Inference(e.to_string()))?;

            // Logits come out as [1, num_classes]; two classes expected.
            let (logit_shape, logits) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| ModelError::Inference(e.to_string()))?;
            let dims: &[i64] = logit_shape;
            if dims.len() != 2 || dims[1] < 2 {
                return Err(ModelError::UnexpectedOutput(format!(
                    "expected [1, 2] logits, got {dims:?}"
                )));
            }

            let (class_id, confidence) = softmax_argmax(&logits[..dims[1] as usize]);
            Ok(ModelOutput {
                class_id,
                confidence,
            })
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    /// Softmax over raw logits, returning the winning index and its
    /// probability.
    fn softmax_argmax(logits: &[f32]) -> (usize, f32) {
        let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
        let sum: f32 = exps.iter().sum();

        let mut best = 0;
        for (i, &e) in exps.iter().enumerate() {
            if e > exps[best] {
                best = i;
            }
        }
        (best, exps[best] / sum)
    }

    /// Loads the primary model, then the fallback model on failure.
    pub struct OnnxLoader {
        primary: PathBuf,
        fallback: PathBuf,
        max_length: usize,
    }

    impl OnnxLoader {
        pub fn new(primary: PathBuf, fallback: PathBuf, max_length: usize) -> Self {
            Self {
                primary,
                fallback,
                max_length,
            }
        }
    }

    impl ModelLoader for OnnxLoader {
        fn load(&self) -> Result<Box<dyn SequenceModel>, ModelError> {
            match OnnxSequenceModel::load(&self.primary, self.max_length) {
                Ok(model) => Ok(Box::new(model)),
                Err(e) => {
                    warn!(error = %e, "primary model load failed, trying fallback");
                    let model = OnnxSequenceModel::load(&self.fallback, self.max_length)?;
                    Ok(Box::new(model))
                }
            }
        }
    }

}
