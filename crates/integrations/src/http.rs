// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared plumbing for the provider clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::error::ProviderError;

/// Builds a client whose every request is bounded by `timeout`.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::ClientBuild(e.to_string()))
}

fn map_send_error(err: &reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Network(err.to_string())
    }
}

async fn error_for_status(status: u16, response: Response) -> ProviderError {
    let message: String = response
        .text()
        .await
        .unwrap_or_else(|_| String::from("Unknown error"));

    match status {
        401 | 403 => ProviderError::Authentication(format!("Rejected credentials ({status})")),
        429 => ProviderError::RateLimit,
        _ => ProviderError::Api { status, message },
    }
}

/// Sends `request` and returns the response if its status is a success.
///
/// # Errors
///
/// Returns an error if:
/// - The request fails or times out
/// - The status is 401/403 (authentication), 429 (rate limit) or any
///   other non-success code
pub async fn send(provider: &'static str, request: RequestBuilder) -> Result<Response, ProviderError> {
    let response: Response = request.send().await.map_err(|e| map_send_error(&e))?;

    let status: u16 = response.status().as_u16();
    debug!(provider, status, "Received provider response");

    if !response.status().is_success() {
        return Err(error_for_status(status, response).await);
    }
    Ok(response)
}

/// Decodes a success body as `T`.
///
/// # Errors
///
/// Returns an error if the body cannot be read or does not match `T`.
pub async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let body: String = response
        .text()
        .await
        .map_err(|e| map_send_error(&e))?;
    serde_json::from_str(&body)
        .map_err(|e| ProviderError::InvalidSchema(format!("Failed to parse response: {e}")))
}
