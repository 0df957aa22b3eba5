//! Mail Triage — hybrid productive/unproductive email classification.

pub mod classifier;
pub mod config;
pub mod error;
pub mod ingest;
