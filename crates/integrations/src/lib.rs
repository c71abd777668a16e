// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod claude;
mod config;
mod error;
mod gemini;
mod google_calendar;
mod http;
mod openai;

#[cfg(test)]
mod tests;

pub use claude::{ClaudeOracle, DEFAULT_CLAUDE_MODEL};
pub use config::{
    DEFAULT_ORACLE_TIMEOUT, OracleConfig, OracleProvider, build_calendar, build_oracle,
};
pub use error::ProviderError;
pub use gemini::{DEFAULT_GEMINI_MODEL, GeminiOracle};
pub use google_calendar::GoogleCalendarClient;
pub use http::build_http_client;
pub use openai::{DEFAULT_OPENAI_MODEL, OpenAiOracle};
