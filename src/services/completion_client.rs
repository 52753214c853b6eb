use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub model: String,
}

/// Text completion capability. Everything the quiz generator needs from an LLM.
pub trait CompletionClient: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> impl Future<Output = Result<String>> + Send;
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint
/// (Gemini exposes one under `/v1beta/openai`).
#[derive(Clone)]
pub struct ChatCompletionClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct Req<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<Msg<'a>>,
}

#[derive(Deserialize)]
struct RespChoiceMsg {
    content: Option<String>,
}

#[derive(Deserialize)]
struct RespChoice {
    message: RespChoiceMsg,
}

#[derive(Deserialize)]
struct Resp {
    choices: Vec<RespChoice>,
}

impl ChatCompletionClient {
    pub fn new(client: Client, api_key: Option<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &Config, client: Client) -> Self {
        Self::new(
            client,
            config.llm_api_key.clone(),
            config.llm_base_url.clone(),
            Duration::from_secs(config.llm_timeout_secs),
        )
    }

    /// Same endpoint, different key. Used when a request brings its own key.
    pub fn with_api_key(&self, api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.or_else(|| self.api_key.clone()),
            ..self.clone()
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl CompletionClient for ChatCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let payload = Req {
            model: &request.model,
            temperature: request.temperature,
            messages: vec![Msg {
                role: "user",
                content: &request.prompt,
            }],
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .timeout(self.timeout);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let res = builder.send().await?;
        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Llm(format!("LLM API Error {}: {}", status, text)));
        }

        let body: Resp = res.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::Llm("Invalid completion response format".to_string()))
    }
}
