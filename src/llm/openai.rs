use anyhow::{Context, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use std::time::Duration;

use super::Llm;
use crate::error::TransportError;

pub const MISTRAL_API_BASE: &str = "https://api.mistral.ai/v1";
pub const DEFAULT_MODEL: &str = "mistral-small-latest";

/// Chat client for any OpenAI-compatible endpoint (Mistral by default).
#[derive(Clone)]
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl LlmClient {
    pub fn new(
        model: String,
        base_url: Option<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_base = base_url.unwrap_or_else(|| MISTRAL_API_BASE.to_string());
        let mut cfg = OpenAIConfig::default().with_api_base(api_base);
        if let Some(key) = api_key {
            cfg = cfg.with_api_key(key);
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        let client = Client::with_config(cfg).with_http_client(http);
        Ok(Self { client, model })
    }
}

#[async_trait::async_trait]
impl Llm for LlmClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let system: ChatCompletionRequestMessage = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()?
            .into();
        let user: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(user_prompt)
            .build()?
            .into();
        let req = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![system, user])
            .build()?;

        let resp = self
            .client
            .chat()
            .create(req)
            .await
            .map_err(|e| TransportError::Llm(e.to_string()))?;
        tracing::debug!(model = %self.model, choices = resp.choices.len(), "completion received");

        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(TransportError::EmptyCompletion)?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, routing::post, Json, Router};

    async fn fake_chat(
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> Json<serde_json::Value> {
        assert_eq!(headers["authorization"], "Bearer mk");
        assert_eq!(body["model"], "mistral-small-latest");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "question");
        Json(serde_json::json!({
            "id": "cmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "mistral-small-latest",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Analyse.\nConclusion : VRAI"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }))
    }

    #[tokio::test]
    async fn completes_against_openai_compatible_endpoint() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/v1/chat/completions", post(fake_chat));
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let llm = LlmClient::new(
            DEFAULT_MODEL.to_string(),
            Some(format!("http://{addr}/v1")),
            Some("mk".into()),
            Duration::from_secs(2),
        )
        .unwrap();
        let text = llm.complete("system", "question").await.unwrap();
        assert_eq!(text, "Analyse.\nConclusion : VRAI");
    }
}
