//! OpenAI client tests against a mock upstream

use httpmock::prelude::*;
use querygate::config::settings::*;
use querygate::services::client::{DEEP_SEARCH_SYSTEM_PROMPT, DEFAULT_SYSTEM_PROMPT};
use querygate::services::OpenAIClient;
use querygate::utils::error::AppError;
use serde_json::json;

fn create_test_settings(base_url: &str, api_key: Option<&str>) -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8085,
        },
        openai: OpenAIConfig {
            api_key: api_key.map(|key| key.to_string()),
            base_url: base_url.to_string(),
            timeout: 5,
            default_model: "gpt-4".to_string(),
        },
        pricing: PricingConfig {
            cost_per_token: 0.00006,
            deep_search_extra_tokens: 50,
            max_response_tokens: 500,
        },
        ledger: LedgerConfig {
            path: "/tmp/charges.log".into(),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "text".to_string(),
        },
    }
}

#[tokio::test]
async fn test_complete_query_extracts_reply() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test")
                .json_body_partial(
                    r#"{"model": "gpt-4", "max_tokens": 500, "messages": [{"role": "system", "content": "You are ChatGPT."}, {"role": "user", "content": "hello"}]}"#,
                );
            then.status(200).json_body(json!({
                "id": "chatcmpl-1",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hello!"}, "finish_reason": "stop"}]
            }));
        })
        .await;

    let client = OpenAIClient::new(create_test_settings(&server.base_url(), Some("sk-test"))).unwrap();
    let reply = client.complete_query("hello", false, "gpt-4").await.unwrap();

    assert_eq!(reply, "Hello!");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_deep_search_switches_system_prompt() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains(DEEP_SEARCH_SYSTEM_PROMPT);
            then.status(200).json_body(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "In depth..."}}]
            }));
        })
        .await;

    let client = OpenAIClient::new(create_test_settings(&server.base_url(), Some("sk-test"))).unwrap();
    let reply = client.complete_query("explain", true, "gpt-4").await.unwrap();

    assert_eq!(reply, "In depth...");
    mock.assert_async().await;

    // The two prompts are distinct by design
    assert_ne!(DEEP_SEARCH_SYSTEM_PROMPT, DEFAULT_SYSTEM_PROMPT);
}

#[tokio::test]
async fn test_missing_content_yields_placeholder() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"id": "chatcmpl-2", "choices": []}));
        })
        .await;

    let client = OpenAIClient::new(create_test_settings(&server.base_url(), Some("sk-test"))).unwrap();
    let reply = client.complete_query("hello", false, "gpt-4").await.unwrap();

    assert_eq!(reply, "No response from API.");
}

#[tokio::test]
async fn test_missing_api_key_skips_network() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let client = OpenAIClient::new(create_test_settings(&server.base_url(), None)).unwrap();
    let err = client.complete_query("hello", false, "gpt-4").await.unwrap_err();

    match err {
        AppError::Config(message) => assert_eq!(message, "OpenAI API key not configured"),
        other => panic!("Expected Config error, got {:?}", other),
    }
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_upstream_error_body_is_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).json_body(json!({
                "error": {"message": "Rate limit reached", "type": "tokens"}
            }));
        })
        .await;

    let client = OpenAIClient::new(create_test_settings(&server.base_url(), Some("sk-test"))).unwrap();
    let err = client.complete_query("hello", false, "gpt-4").await.unwrap_err();

    match err {
        AppError::ExternalApi(message) => assert!(message.contains("Rate limit reached")),
        other => panic!("Expected ExternalApi error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upstream_non_json_error_is_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(502).body("Bad Gateway");
        })
        .await;

    let client = OpenAIClient::new(create_test_settings(&server.base_url(), Some("sk-test"))).unwrap();
    let err = client.complete_query("hello", false, "gpt-4").await.unwrap_err();

    match err {
        AppError::ExternalApi(message) => assert!(message.contains("Bad Gateway")),
        other => panic!("Expected ExternalApi error, got {:?}", other),
    }
}
