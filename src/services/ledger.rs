//! Usage ledger service
//!
//! Records one line per accepted request to an append-only charge log

use crate::models::query::CostEstimate;
use crate::utils::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// One accepted request, as recorded in the charge log
#[derive(Debug, Clone)]
pub struct UsageEntry {
    /// Time the charge was recorded
    pub timestamp: DateTime<Utc>,
    /// Query text, verbatim
    pub query: String,
    /// Total estimated tokens
    pub total_tokens: u32,
    /// Estimated cost in USD
    pub estimated_cost: f64,
}

impl UsageEntry {
    /// Create an entry for an accepted request, stamped now
    pub fn new(query: impl Into<String>, estimate: &CostEstimate) -> Self {
        Self {
            timestamp: Utc::now(),
            query: query.into(),
            total_tokens: estimate.total_tokens,
            estimated_cost: estimate.estimated_cost,
        }
    }

    /// Format the ledger line for this entry
    pub fn format_line(&self) -> String {
        format!(
            "{} - Query: \"{}\" - Tokens: {} - Cost: ${:.2}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.query,
            self.total_tokens,
            self.estimated_cost
        )
    }
}

/// Usage recording seam
///
/// Keeps the gating logic decoupled from any storage mechanism.
#[async_trait]
pub trait UsageRecorder: Send + Sync {
    /// Record one accepted request
    async fn record(&self, entry: &UsageEntry) -> AppResult<()>;
}

/// Append-only plain-text ledger file
///
/// Concurrent invocations may overlap, so writes are serialized through a
/// single lock; each entry lands as one complete line.
#[derive(Debug)]
pub struct FileLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLedger {
    /// Create a ledger backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Ledger file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl UsageRecorder for FileLedger {
    async fn record(&self, entry: &UsageEntry) -> AppResult<()> {
        let line = entry.format_line();

        let _guard = self.write_lock.lock().await;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;

        debug!("Recorded usage entry: {} tokens", entry.total_tokens);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_line() {
        let entry = UsageEntry {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap(),
            query: "What is Rust?".to_string(),
            total_tokens: 150,
            estimated_cost: 0.009,
        };

        assert_eq!(
            entry.format_line(),
            "2024-03-01T12:30:45.000Z - Query: \"What is Rust?\" - Tokens: 150 - Cost: $0.01"
        );
    }

    #[tokio::test]
    async fn test_record_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charges.log");
        let ledger = FileLedger::new(&path);

        let estimate = CostEstimate {
            token_count: 2,
            total_tokens: 2,
            estimated_cost: 0.00012,
        };

        ledger.record(&UsageEntry::new("hello", &estimate)).await.unwrap();
        ledger.record(&UsageEntry::new("again", &estimate)).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Query: \"hello\" - Tokens: 2 - Cost: $0.00"));
        assert!(lines[1].contains("Query: \"again\""));
    }
}
