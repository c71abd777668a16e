// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Google Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sifut::{OptimizationOracle, OptimizationTask, OracleFailure};
use tracing::info;

use crate::error::ProviderError;
use crate::http::{decode, send};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Oracle backed by Google Gemini, in JSON mime mode.
pub struct GeminiOracle {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiOracle {
    #[must_use]
    pub fn new(http_client: Client, api_key: String) -> Self {
        Self {
            http_client,
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
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

    /// Sends `prompt` and returns the concatenated text of the first
    /// candidate.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` for transport failures, error statuses, or a
    /// reply without candidate text.
    pub async fn send_prompt(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload: GenerateContentRequest<'_> = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let request = self
            .http_client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&payload);

        let response: GenerateContentResponse = decode(send("gemini", request).await?).await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::InvalidSchema(String::from(
                "Response contained no candidate text",
            )));
        }
        Ok(text)
    }
}

#[async_trait]
impl OptimizationOracle for GeminiOracle {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, task: &OptimizationTask) -> Result<String, OracleFailure> {
        info!(model = %self.model, "Calling Gemini");
        Ok(self.send_prompt(&task.prompt()).await?)
    }
}
