// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sifut::{CalendarFailure, OracleFailure};

/// Errors raised by the HTTP provider clients.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Connection failed or the response body could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The provider returned a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Credentials were rejected.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The response body does not match the provider's documented schema.
    #[error("Invalid response schema: {0}")]
    InvalidSchema(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// The selected provider has no API key configured.
    #[error("No API key configured for provider '{0}'")]
    MissingApiKey(&'static str),

    /// The provider name is not one of the supported providers.
    #[error("Unsupported AI provider: {0}")]
    UnknownProvider(String),
}

impl From<ProviderError> for OracleFailure {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Network(msg) | ProviderError::ClientBuild(msg) => Self::Network(msg),
            ProviderError::Timeout => Self::Timeout,
            ProviderError::Api { status, message } => Self::Provider { status, message },
            ProviderError::RateLimit => Self::RateLimited,
            ProviderError::Authentication(msg) => Self::Authentication(msg),
            ProviderError::InvalidSchema(msg) => Self::MalformedOutput(msg),
            other @ (ProviderError::MissingApiKey(_) | ProviderError::UnknownProvider(_)) => {
                Self::Authentication(other.to_string())
            }
        }
    }
}

impl From<ProviderError> for CalendarFailure {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Authentication(msg) => Self::Authentication(msg),
            ProviderError::Api { status, message } => Self::Provider { status, message },
            ProviderError::RateLimit => Self::Provider {
                status: 429,
                message: String::from("Rate limit exceeded"),
            },
            ProviderError::InvalidSchema(msg) => Self::MalformedResponse(msg),
            other => Self::Network(other.to_string()),
        }
    }
}
