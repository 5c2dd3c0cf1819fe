//! Logging utilities
//!
//! Shared logging helpers for request summaries

use crate::models::query::QueryRequest;

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    if s.len() > max_len {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... ({} chars truncated)", &s[..end], s.len() - end)
    } else {
        s.to_string()
    }
}

/// Create a filtered summary of a query request for logging
/// Keeps original structure but truncates verbose content
pub fn create_query_log_summary(request: &QueryRequest) -> serde_json::Value {
    let query = match &request.query {
        Some(q) => serde_json::Value::String(truncate_content(q, 200)),
        None => serde_json::Value::Null,
    };

    serde_json::json!({
        "query": query,
        "deepSearch": request.deep_search,
        "priceLimit": request.price_limit,
        "model": request.model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_content() {
        assert_eq!(truncate_content("short", 10), "short");

        let long = "a".repeat(250);
        let truncated = truncate_content(&long, 200);
        assert!(truncated.starts_with(&"a".repeat(200)));
        assert!(truncated.ends_with("(50 chars truncated)"));
    }

    #[test]
    fn test_query_log_summary() {
        let request = QueryRequest {
            query: Some("What is Rust?".to_string()),
            deep_search: true,
            price_limit: Some(serde_json::json!(0.5)),
            model: None,
        };

        let summary = create_query_log_summary(&request);
        assert_eq!(summary["query"], "What is Rust?");
        assert_eq!(summary["deepSearch"], true);
        assert_eq!(summary["priceLimit"], 0.5);
        assert!(summary["model"].is_null());
    }
}
