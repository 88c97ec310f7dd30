//! Client for OpenAI-compatible chat completion endpoints.

use crate::error::PhrasingError;
use crate::service::{PhrasingRequest, PhrasingService};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Phrasing backed by a `/chat/completions` endpoint.
pub struct OpenAiPhraser {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiPhraser {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, PhrasingError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PhrasingError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .user_agent("bartender/0.1")
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        info!("Phrasing via {} (model {})", base_url, model);

        Ok(Self {
            client,
            base_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl PhrasingService for OpenAiPhraser {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, request: PhrasingRequest) -> Result<String, PhrasingError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.persona,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            "Sending chat completion request"
        );
        let start = Instant::now();

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PhrasingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        debug!(
            "Chat completion answered in {:.1}s",
            start.elapsed().as_secs_f64()
        );

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(PhrasingError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn request() -> PhrasingRequest {
        PhrasingRequest {
            persona: "You are a friendly bartender.".into(),
            prompt: "The user prefers flavor profile Dark.".into(),
            temperature: 0.7,
            max_tokens: 100,
        }
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let result = OpenAiPhraser::new("  ", DEFAULT_BASE_URL, DEFAULT_MODEL);
        assert!(matches!(result, Err(PhrasingError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_sends_persona_and_prompt() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "gpt-3.5-turbo");
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["content"], "The user prefers flavor profile Dark.");
                assert_eq!(body["max_tokens"], 100);
                Json(json!({"choices": [{"message": {"content": "  Dark side, eh?  "}}]}))
            }),
        );
        let base_url = serve(router).await;

        let phraser = OpenAiPhraser::new("sk-test", base_url, DEFAULT_MODEL).unwrap();
        assert_eq!(phraser.generate(request()).await.unwrap(), "Dark side, eh?");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let base_url = serve(router).await;

        let phraser = OpenAiPhraser::new("sk-test", base_url, DEFAULT_MODEL).unwrap();
        match phraser.generate(request()).await {
            Err(PhrasingError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_response() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let base_url = serve(router).await;

        let phraser = OpenAiPhraser::new("sk-test", base_url, DEFAULT_MODEL).unwrap();
        assert!(matches!(
            phraser.generate(request()).await,
            Err(PhrasingError::EmptyResponse)
        ));
    }
}
