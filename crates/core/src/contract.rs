// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Interpretation of oracle replies.
//!
//! A reply is accepted only as a whole. A single malformed assignment
//! rejects the entire reply.

use serde_json::{Map, Value};
use sifut_domain::{OptimizationSummary, TimeRange, parse_date, parse_wall_clock};
use time::Date;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::oracle::{OptimizationOracle, OptimizationTask, OracleFailure};

/// One validated line item from an oracle reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedAssignment {
    pub user_id: String,
    pub project_id: String,
    pub date: Date,
    pub range: TimeRange,
}

/// A fully validated oracle reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleResponse {
    pub assignments: Vec<ProposedAssignment>,
    pub summary: OptimizationSummary,
}

/// Finds the first well-formed JSON object embedded in `text`.
///
/// Providers that cannot be forced into a JSON-only mode tend to wrap the
/// object in prose or code fences.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    text.char_indices()
        .filter(|(_, c)| *c == '{')
        .find_map(|(start, _)| {
            let mut stream =
                serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
            match stream.next() {
                Some(Ok(Value::Object(map))) => Some(map),
                _ => None,
            }
        })
}

fn contract_error(index: usize, msg: impl std::fmt::Display) -> CoreError {
    CoreError::OracleContract(format!("assignment {index}: {msg}"))
}

fn required_str<'a>(
    item: &'a Map<String, Value>,
    index: usize,
    field: &str,
) -> Result<&'a str, CoreError> {
    item.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| contract_error(index, format!("missing or non-string '{field}'")))
}

fn validate_assignment(
    task: &OptimizationTask,
    index: usize,
    value: &Value,
) -> Result<ProposedAssignment, CoreError> {
    let item: &Map<String, Value> = value
        .as_object()
        .ok_or_else(|| contract_error(index, "not an object"))?;

    let user_id: &str = required_str(item, index, "user_id")?;
    let project_id: &str = required_str(item, index, "project_id")?;
    let date: Date =
        parse_date(required_str(item, index, "date")?).map_err(|e| contract_error(index, e))?;
    let start = parse_wall_clock(required_str(item, index, "start_time")?)
        .map_err(|e| contract_error(index, e))?;
    let end = parse_wall_clock(required_str(item, index, "end_time")?)
        .map_err(|e| contract_error(index, e))?;
    let range: TimeRange = TimeRange::new(start, end).map_err(|e| contract_error(index, e))?;

    if user_id.trim().is_empty() {
        return Err(contract_error(index, "empty 'user_id'"));
    }
    if !task.offers_project(project_id) {
        return Err(contract_error(
            index,
            format!("project '{project_id}' is not an active project"),
        ));
    }
    if !task.month().contains(date) {
        return Err(contract_error(
            index,
            format!("date is outside month {}", task.month()),
        ));
    }

    Ok(ProposedAssignment {
        user_id: user_id.to_string(),
        project_id: project_id.to_string(),
        date,
        range,
    })
}

/// Validates a decoded reply against the task it answers.
///
/// # Errors
///
/// Returns `OracleContract` if:
/// - `assignments` is missing or not an array
/// - `summary` is missing or not an object
/// - Any assignment lacks a field, fails to parse, has `end <= start`,
///   names a project that was not offered, or falls outside the month
pub fn validate_oracle_response(
    task: &OptimizationTask,
    payload: Map<String, Value>,
) -> Result<OracleResponse, CoreError> {
    let assignments: &Vec<Value> = payload
        .get("assignments")
        .and_then(Value::as_array)
        .ok_or_else(|| CoreError::OracleContract(String::from("'assignments' must be an array")))?;

    let assignments: Vec<ProposedAssignment> = assignments
        .iter()
        .enumerate()
        .map(|(index, value)| validate_assignment(task, index, value))
        .collect::<Result<_, _>>()?;

    let summary: Map<String, Value> = match payload.get("summary") {
        Some(Value::Object(fields)) => fields.clone(),
        _ => {
            return Err(CoreError::OracleContract(String::from(
                "'summary' must be an object",
            )));
        }
    };

    Ok(OracleResponse {
        assignments,
        summary: OptimizationSummary::new(summary),
    })
}

/// Turns raw reply text into a validated response.
///
/// # Errors
///
/// Returns `OptimizationFailed` if the text holds no JSON object, or
/// `OracleContract` if the object has the wrong shape.
pub fn interpret_reply(task: &OptimizationTask, reply: &str) -> Result<OracleResponse, CoreError> {
    let payload: Map<String, Value> = extract_json_object(reply).ok_or_else(|| {
        CoreError::OptimizationFailed(OracleFailure::MalformedOutput(String::from(
            "no JSON object in reply",
        )))
    })?;
    validate_oracle_response(task, payload)
}

/// Calls the oracle and validates its reply.
///
/// Holds nothing but the task while waiting on the provider.
///
/// # Errors
///
/// Returns `OptimizationFailed` if the call fails or the reply is not JSON,
/// or `OracleContract` if the reply has the wrong shape.
pub async fn request_optimization(
    oracle: &dyn OptimizationOracle,
    task: &OptimizationTask,
) -> Result<OracleResponse, CoreError> {
    let provider: &str = oracle.provider_name();
    info!(
        provider,
        month = %task.month(),
        projects = task.projects().len(),
        shift_requests = task.shift_requests().len(),
        "Requesting optimization"
    );

    let reply: String = oracle.complete(task).await.map_err(|failure| {
        warn!(provider, error = %failure, "Optimization oracle call failed");
        CoreError::OptimizationFailed(failure)
    })?;
    debug!(provider, reply_len = reply.len(), "Received oracle reply");

    let response: OracleResponse = interpret_reply(task, &reply).inspect_err(|err| {
        warn!(provider, error = %err, "Rejected oracle reply");
    })?;

    info!(
        provider,
        assignments = response.assignments.len(),
        "Oracle reply accepted"
    );
    Ok(response)
}
