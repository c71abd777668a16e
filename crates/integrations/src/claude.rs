// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Anthropic Messages API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sifut::{OptimizationOracle, OptimizationTask, OracleFailure};
use tracing::info;

use crate::error::ProviderError;
use crate::http::{decode, send};

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

/// Default model when none is configured.
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-5-sonnet-20241022";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Oracle backed by Anthropic Claude.
///
/// Claude has no JSON-only mode, so the reply text may wrap the object in
/// prose. The core extracts it.
pub struct ClaudeOracle {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeOracle {
    #[must_use]
    pub fn new(http_client: Client, api_key: String) -> Self {
        Self {
            http_client,
            api_key,
            model: DEFAULT_CLAUDE_MODEL.to_string(),
            base_url: ANTHROPIC_BASE_URL.to_string(),
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

    /// Sends `prompt` as a single user message and returns the reply text.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` for transport failures, error statuses, or a
    /// reply without a text block.
    pub async fn send_prompt(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload: MessagesRequest<'_> = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let request = self
            .http_client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload);

        let response: MessagesResponse = decode(send("claude", request).await?).await?;

        response
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| {
                ProviderError::InvalidSchema(String::from("Response contained no text block"))
            })
    }
}

#[async_trait]
impl OptimizationOracle for ClaudeOracle {
    fn provider_name(&self) -> &'static str {
        "claude"
    }

    async fn complete(&self, task: &OptimizationTask) -> Result<String, OracleFailure> {
        info!(model = %self.model, "Calling Claude");
        Ok(self.send_prompt(&task.prompt()).await?)
    }
}
