//! Service layer module
//!
//! Contains the cost estimator, OpenAI client wrapper, and usage ledger

pub mod client;
pub mod estimator;
pub mod ledger;

pub use client::OpenAIClient;
pub use estimator::CostEstimator;
pub use ledger::{FileLedger, UsageEntry, UsageRecorder};
