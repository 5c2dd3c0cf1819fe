//! Query Gateway Library
//!
//! Provides budget-gated forwarding of user queries to the OpenAI chat
//! completions API, with a simulated charge ledger

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, AppState};
pub use models::{openai, query};
pub use services::{CostEstimator, FileLedger, OpenAIClient, UsageEntry, UsageRecorder};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
