//! Email classification pipeline.
//!
//! Flow:
//! 1. Normalizer cleans subject + body into a feature string
//! 2. Statistical model (when enabled and loadable) produces a verdict
//! 3. Keyword rules take over whenever the model is unavailable
//! 4. Response generator picks a deterministic reply for the label
//!
//! Every message resolves to exactly one label — there is no "unknown"
//! outcome and no error path out of [`EmailClassifier::classify`].

pub mod engine;
pub mod keywords;
pub mod model;
pub mod normalize;
pub mod responses;
pub mod types;

pub use engine::EmailClassifier;
pub use keywords::KeywordEngine;
pub use model::{NullLoader, StatisticalAdapter};
pub use normalize::TextNormalizer;
pub use responses::ResponseGenerator;
pub use types::{
    Classification, Label, ModelLoader, ModelOutput, ModelVerdict, SequenceModel,
    UnavailableReason,
};
