// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! OpenAI Chat Completions client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sifut::{OptimizationOracle, OptimizationTask, OracleFailure};
use tracing::info;

use crate::error::ProviderError;
use crate::http::{decode, send};

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const TEMPERATURE: f32 = 0.3;

/// Default model when none is configured.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Oracle backed by OpenAI, in JSON-object mode.
pub struct OpenAiOracle {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiOracle {
    #[must_use]
    pub fn new(http_client: Client, api_key: String) -> Self {
        Self {
            http_client,
            api_key,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the API host.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sends `prompt` and returns the first choice's content.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` for transport failures, error statuses, or a
    /// reply without choices.
    pub async fn send_prompt(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload: ChatCompletionRequest<'_> = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            temperature: TEMPERATURE,
        };

        let request = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload);

        let response: ChatCompletionResponse = decode(send("openai", request).await?).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ProviderError::InvalidSchema(String::from("Response contained no choices"))
            })
    }
}

#[async_trait]
impl OptimizationOracle for OpenAiOracle {
    fn provider_name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, task: &OptimizationTask) -> Result<String, OracleFailure> {
        info!(model = %self.model, "Calling OpenAI");
        Ok(self.send_prompt(&task.prompt()).await?)
    }
}
