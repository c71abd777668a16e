// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Provider selection.
//!
//! The provider is chosen once, at startup. Callers only ever see the
//! `OptimizationOracle` trait object.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sifut::{CalendarGateway, OptimizationOracle};
use tracing::info;

use crate::claude::{ClaudeOracle, DEFAULT_CLAUDE_MODEL};
use crate::error::ProviderError;
use crate::gemini::{DEFAULT_GEMINI_MODEL, GeminiOracle};
use crate::google_calendar::GoogleCalendarClient;
use crate::http::build_http_client;
use crate::openai::{DEFAULT_OPENAI_MODEL, OpenAiOracle};

/// Default deadline for one oracle call.
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(120);

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OracleProvider {
    #[default]
    Claude,
    OpenAi,
    Gemini,
}

impl OracleProvider {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }
}

impl FromStr for OracleProvider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "claude" | "anthropic" => Ok(Self::Claude),
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            _ => Err(ProviderError::UnknownProvider(s.to_string())),
        }
    }
}

impl std::fmt::Display for OracleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Credentials and models for every provider.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub provider: OracleProvider,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub timeout: Duration,
    /// Overrides the selected provider's API host.
    pub base_url: Option<String>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: OracleProvider::default(),
            anthropic_api_key: None,
            anthropic_model: DEFAULT_CLAUDE_MODEL.to_string(),
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: DEFAULT_ORACLE_TIMEOUT,
            base_url: None,
        }
    }
}

fn require_key(key: Option<&str>, provider: OracleProvider) -> Result<String, ProviderError> {
    key.filter(|k| !k.trim().is_empty())
        .map(str::to_string)
        .ok_or(ProviderError::MissingApiKey(provider.as_str()))
}

/// Builds the oracle for the configured provider.
///
/// # Errors
///
/// Returns an error if the selected provider has no API key or the HTTP
/// client cannot be built.
pub fn build_oracle(config: &OracleConfig) -> Result<Arc<dyn OptimizationOracle>, ProviderError> {
    let http_client = build_http_client(config.timeout)?;

    let oracle: Arc<dyn OptimizationOracle> = match config.provider {
        OracleProvider::Claude => {
            let key: String = require_key(config.anthropic_api_key.as_deref(), config.provider)?;
            let mut oracle = ClaudeOracle::new(http_client, key).with_model(&config.anthropic_model);
            if let Some(url) = &config.base_url {
                oracle = oracle.with_base_url(url);
            }
            info!(provider = "claude", model = %config.anthropic_model, "Configured optimization oracle");
            Arc::new(oracle)
        }
        OracleProvider::OpenAi => {
            let key: String = require_key(config.openai_api_key.as_deref(), config.provider)?;
            let mut oracle = OpenAiOracle::new(http_client, key).with_model(&config.openai_model);
            if let Some(url) = &config.base_url {
                oracle = oracle.with_base_url(url);
            }
            info!(provider = "openai", model = %config.openai_model, "Configured optimization oracle");
            Arc::new(oracle)
        }
        OracleProvider::Gemini => {
            let key: String = require_key(config.gemini_api_key.as_deref(), config.provider)?;
            let mut oracle = GeminiOracle::new(http_client, key).with_model(&config.gemini_model);
            if let Some(url) = &config.base_url {
                oracle = oracle.with_base_url(url);
            }
            info!(provider = "gemini", model = %config.gemini_model, "Configured optimization oracle");
            Arc::new(oracle)
        }
    };

    Ok(oracle)
}

/// Builds the Google calendar gateway for `access_token`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_calendar(
    access_token: String,
    timeout: Duration,
) -> Result<Arc<dyn CalendarGateway>, ProviderError> {
    let http_client = build_http_client(timeout)?;
    Ok(Arc::new(GoogleCalendarClient::new(http_client, access_token)))
}
