use std::sync::Arc;

use agentlite::{
    providers::{configs::GeminiProviderConfig, gemini::GeminiProvider, mock::MockProvider},
    Agent, AgentError, CancellationToken,
};
use anyhow::Result;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_terse_agent_thanks_reply() -> Result<()> {
    let agent = Agent::new("Be terse.", Arc::new(MockProvider::new()));

    let reply = agent.run(&CancellationToken::new(), "thanks!").await?;

    assert_eq!(reply, "You're welcome! Happy to help.");
    assert_eq!(agent.model_name(), "mock-model");
    Ok(())
}

#[tokio::test]
async fn test_agent_errors_before_reaching_provider() {
    let cancel = CancellationToken::new();

    let unconfigured = Agent::default();
    assert_eq!(unconfigured.model_name(), "none");
    assert_eq!(
        unconfigured.run(&cancel, "hello").await,
        Err(AgentError::NoModel)
    );

    let configured = Agent::new("", Arc::new(MockProvider::new()));
    assert_eq!(configured.run(&cancel, "").await, Err(AgentError::EmptyInput));
}

#[tokio::test]
async fn test_agent_over_gemini_wire_format() -> Result<()> {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "test_api_key"))
        .and(body_partial_json(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "Be terse.\n\nTell me a joke"}]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "Knock knock."}]}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::new(
        GeminiProviderConfig::new("test_api_key").with_host(mock_server.uri()),
    )?;
    let agent = Agent::new("Be terse.", Arc::new(provider));

    let reply = agent.run(&CancellationToken::new(), "Tell me a joke").await?;

    assert_eq!(reply, "Knock knock.");
    assert_eq!(agent.model_name(), "gemini-1.5-flash");
    Ok(())
}

#[tokio::test]
async fn test_agent_surfaces_upstream_error_unchanged() -> Result<()> {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::new(
        GeminiProviderConfig::new("test_api_key").with_host(mock_server.uri()),
    )?;
    let agent = Agent::new("Be terse.", Arc::new(provider));

    let result = agent.run(&CancellationToken::new(), "hello").await;

    assert_eq!(
        result,
        Err(AgentError::Upstream {
            status: 429,
            body: "quota exceeded".to_string()
        })
    );
    Ok(())
}
