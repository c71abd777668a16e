// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router tests. Every request goes through the full axum stack.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use serde_json::{Value, json};
use sifut::{OptimizationOracle, OptimizationTask, OracleFailure};
use sifut_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::session::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
use crate::{AppState, build_router};

/// Answers every task with the same reply, or the same failure.
struct StubOracle {
    reply: Result<String, OracleFailure>,
}

#[async_trait]
impl OptimizationOracle for StubOracle {
    fn provider_name(&self) -> &'static str {
        "stub"
    }

    async fn complete(&self, task: &OptimizationTask) -> Result<String, OracleFailure> {
        let project_id: String = task
            .projects()
            .first()
            .map(|p| p.id.clone())
            .unwrap_or_default();
        self.reply
            .clone()
            .map(|reply| reply.replace("{project_id}", &project_id))
    }
}

fn both_members_reply() -> String {
    json!({
        "assignments": [
            {"user_id": "u1", "project_id": "{project_id}", "date": "2025-06-02",
             "start_time": "13:00", "end_time": "17:00"},
            {"user_id": "u2", "project_id": "{project_id}", "date": "2025-06-02",
             "start_time": "13:00", "end_time": "17:00"}
        ],
        "summary": {"total_shifts": 2, "members_utilized": 2, "coverage_rate": 1.0, "notes": []}
    })
    .to_string()
}

fn create_test_app(reply: Result<String, OracleFailure>) -> Router {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    build_router(AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        oracle: Arc::new(StubOracle { reply }),
        calendar: None,
        time_zone: chrono_tz::Asia::Tokyo,
    })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    caller: Option<(&str, &str)>,
    body: Option<Value>,
) -> (HttpStatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((id, role)) = caller {
        builder = builder
            .header(ACTOR_ID_HEADER, id)
            .header(ACTOR_ROLE_HEADER, role);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

const ADMIN: Option<(&str, &str)> = Some(("admin-1", "admin"));

fn member(id: &str) -> Option<(&str, &str)> {
    Some((id, "member"))
}

async fn create_project(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/projects",
        ADMIN,
        Some(json!({"name": "Reception", "required_members": 2})),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn submit_availability(app: &Router, user: &str, start: &str, end: &str) {
    let (status, body) = send(
        app,
        "POST",
        "/shift_requests",
        member(user),
        Some(json!({"date": "2025-06-02", "start_time": start, "end_time": end})),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    let id = body["id"].as_str().unwrap();

    let (status, body) = send(
        app,
        "POST",
        &format!("/shift_requests/{id}/submit"),
        member(user),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "submitted");
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let app: Router = create_test_app(Ok(both_members_reply()));

    let (status, body) = send(&app, "GET", "/suggestions", None, None).await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], true);
    assert_eq!(body["kind"], "AuthenticationError");
}

#[tokio::test]
async fn test_unknown_role_is_unauthorized() {
    let app: Router = create_test_app(Ok(both_members_reply()));

    let (status, _) = send(&app, "GET", "/projects", Some(("u1", "owner")), None).await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_member_cannot_optimize() {
    let app: Router = create_test_app(Ok(both_members_reply()));

    let (status, body) = send(
        &app,
        "POST",
        "/optimize",
        member("u1"),
        Some(json!({"month": "2025-06"})),
    )
    .await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "AccessDeniedError");
}

#[tokio::test]
async fn test_optimize_without_requests_is_bad_request() {
    let app: Router = create_test_app(Ok(both_members_reply()));
    create_project(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/optimize",
        ADMIN,
        Some(json!({"month": "2025-06"})),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "NoDataError");
}

#[tokio::test]
async fn test_oracle_failure_is_bad_gateway() {
    let app: Router = create_test_app(Err(OracleFailure::RateLimited));
    create_project(&app).await;
    submit_availability(&app, "u1", "09:00", "17:00").await;

    let (status, body) = send(
        &app,
        "POST",
        "/optimize",
        ADMIN,
        Some(json!({"month": "2025-06"})),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "OptimizationFailedError");
}

#[tokio::test]
async fn test_malformed_oracle_reply_is_bad_gateway() {
    let app: Router = create_test_app(Ok(String::from(
        r#"{"assignments": [{"user_id": "u1"}], "summary": {}}"#,
    )));
    create_project(&app).await;
    submit_availability(&app, "u1", "09:00", "17:00").await;

    let (status, body) = send(
        &app,
        "POST",
        "/optimize",
        ADMIN,
        Some(json!({"month": "2025-06"})),
    )
    .await;
    let (_, suggestions) = send(&app, "GET", "/suggestions", ADMIN, None).await;

    assert_eq!(status, HttpStatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "OracleContractError");
    assert_eq!(suggestions, json!([]));
}

#[tokio::test]
async fn test_optimize_then_approve_flow() {
    let app: Router = create_test_app(Ok(both_members_reply()));
    let project_id: String = create_project(&app).await;
    submit_availability(&app, "u1", "09:00", "17:00").await;
    submit_availability(&app, "u2", "13:00", "21:00").await;

    let (status, detail) = send(
        &app,
        "POST",
        "/optimize",
        ADMIN,
        Some(json!({"month": "2025-06"})),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(detail["suggestion"]["status"], "pending");
    assert_eq!(detail["assignments"].as_array().unwrap().len(), 2);
    let suggestion_id = detail["suggestion"]["id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, "GET", "/suggestions?month=2025-06", member("u1"), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let approve_uri = format!("/suggestions/{suggestion_id}/approve");
    let (status, approved) = send(&app, "POST", &approve_uri, ADMIN, None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(approved["confirmed_shifts"], 2);
    assert_eq!(approved["message"], "Optimization approved successfully");

    let (status, again) = send(&app, "POST", &approve_uri, ADMIN, None).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(again["kind"], "AlreadyApprovedError");
    assert_eq!(again["message"], "Optimization already approved");

    let (status, shifts) = send(&app, "GET", "/confirmed_shifts", ADMIN, None).await;
    assert_eq!(status, HttpStatusCode::OK);
    let shifts = shifts.as_array().unwrap();
    assert_eq!(shifts.len(), 2);
    assert!(shifts.iter().all(|s| s["project_id"] == project_id.as_str()));

    let (_, own) = send(&app, "GET", "/confirmed_shifts", member("u2"), None).await;
    assert_eq!(own.as_array().unwrap().len(), 1);
    assert_eq!(own[0]["user_id"], "u2");
}

#[tokio::test]
async fn test_approve_unknown_suggestion_is_not_found() {
    let app: Router = create_test_app(Ok(both_members_reply()));

    let (status, body) = send(&app, "POST", "/suggestions/missing/approve", ADMIN, None).await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFoundError");
}

#[tokio::test]
async fn test_submit_twice_is_conflict() {
    let app: Router = create_test_app(Ok(both_members_reply()));
    let (_, created) = send(
        &app,
        "POST",
        "/shift_requests",
        member("u1"),
        Some(json!({"date": "2025-06-02", "start_time": "09:00", "end_time": "17:00"})),
    )
    .await;
    let submit_uri = format!("/shift_requests/{}/submit", created["id"].as_str().unwrap());

    let (first, _) = send(&app, "POST", &submit_uri, member("u1"), None).await;
    let (second, body) = send(&app, "POST", &submit_uri, member("u1"), None).await;

    assert_eq!(first, HttpStatusCode::OK);
    assert_eq!(second, HttpStatusCode::CONFLICT);
    assert_eq!(body["kind"], "InvalidTransitionError");
}

#[tokio::test]
async fn test_invalid_time_range_is_bad_request() {
    let app: Router = create_test_app(Ok(both_members_reply()));

    let (status, body) = send(
        &app,
        "POST",
        "/shift_requests",
        member("u1"),
        Some(json!({"date": "2025-06-02", "start_time": "17:00", "end_time": "09:00"})),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidInputError");
}

#[tokio::test]
async fn test_project_lifecycle() {
    let app: Router = create_test_app(Ok(both_members_reply()));
    let project_id: String = create_project(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/projects/{project_id}/active"),
        ADMIN,
        Some(json!({"is_active": false})),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["is_active"], false);

    let (_, active) = send(&app, "GET", "/projects?active_only=true", member("u1"), None).await;
    assert_eq!(active, json!([]));

    let (status, _) = send(&app, "DELETE", &format!("/projects/{project_id}"), ADMIN, None).await;
    assert_eq!(status, HttpStatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("/projects/{project_id}"), ADMIN, None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sync_without_calendar_reports_not_synced() {
    let app: Router = create_test_app(Ok(both_members_reply()));
    let project_id: String = create_project(&app).await;
    let (status, shift) = send(
        &app,
        "POST",
        "/confirmed_shifts",
        ADMIN,
        Some(json!({
            "user_id": "u1",
            "project_id": project_id,
            "date": "2025-06-02",
            "start_time": "09:00",
            "end_time": "12:00"
        })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/confirmed_shifts/{}/sync", shift["id"].as_str().unwrap()),
        ADMIN,
        Some(json!({})),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["synced"], false);
    assert_eq!(body["message"], "Calendar is not configured");
}

#[tokio::test]
async fn test_unsync_routes_to_calendar_removal() {
    let app: Router = create_test_app(Ok(both_members_reply()));
    let project_id: String = create_project(&app).await;
    let (_, shift) = send(
        &app,
        "POST",
        "/confirmed_shifts",
        ADMIN,
        Some(json!({
            "user_id": "u1",
            "project_id": project_id,
            "date": "2025-06-02",
            "start_time": "09:00",
            "end_time": "12:00"
        })),
    )
    .await;
    let uri: String = format!("/confirmed_shifts/{}/sync", shift["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, ADMIN, None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["synced"], false);
    assert_eq!(body["message"], "Shift is not synced");

    let (status, body) = send(&app, "DELETE", &uri, member("u1"), None).await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "AccessDeniedError");
}
