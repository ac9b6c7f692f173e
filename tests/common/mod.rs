// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the EcoTwin backend.
//!
//! Serves the same routes as the real API on an ephemeral port and records
//! the method, path, query and relevant headers of every request it sees.

use axum::{
    extract::{Multipart, Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ecotwin_client::models::Activity;
use ecotwin_client::services::ActivityClient;
use ecotwin_client::Session;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// What the mock saw for one request.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

/// A file received on the batch endpoint.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct ReceivedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub contents: Vec<u8>,
}

#[derive(Default)]
pub struct MockState {
    pub activities: Mutex<Vec<Activity>>,
    /// When set, every API route answers with this status.
    pub fail_status: Mutex<Option<u16>>,
    /// When set, API routes require exactly this bearer token.
    pub required_token: Mutex<Option<String>>,
    pub degraded: Mutex<bool>,
    pub requests: Mutex<Vec<RecordedRequest>>,
    pub uploads: Mutex<Vec<ReceivedFile>>,
}

pub struct MockBackend {
    pub url: String,
    pub state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockBackend {
    /// Start a mock serving `activities`.
    pub async fn start(activities: Vec<Activity>) -> Self {
        let state = Arc::new(MockState::default());
        *state.activities.lock().unwrap() = activities;

        let api = Router::new()
            .route("/activities", get(list_activities))
            .route("/batch/upload", post(upload))
            .route("/analytics/forecast", get(forecast))
            .route("/analytics/anomalies", get(anomalies))
            .route("/activities/infer", post(submit_inference))
            .route("/activities/infer/{task_id}", get(inference_result))
            .route_layer(middleware::from_fn_with_state(state.clone(), gate));

        let app = Router::new()
            .nest("/api/v1", api)
            .route("/health", get(health))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self, session: Session) -> ActivityClient {
        ActivityClient::with_base_url(&self.url, "/api/v1", session).unwrap()
    }

    pub fn fail_with(&self, status: u16) {
        *self.state.fail_status.lock().unwrap() = Some(status);
    }

    pub fn recover(&self) {
        *self.state.fail_status.lock().unwrap() = None;
    }

    pub fn require_token(&self, token: &str) {
        *self.state.required_token.lock().unwrap() = Some(token.to_string());
    }

    pub fn set_degraded(&self, degraded: bool) {
        *self.state.degraded.lock().unwrap() = degraded;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<ReceivedFile> {
        self.state.uploads.lock().unwrap().clone()
    }
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[allow(dead_code)]
pub fn activity(id: &str, activity_type: &str, carbon_estimate: f64) -> Activity {
    Activity {
        id: id.to_string(),
        activity_type: activity_type.to_string(),
        description: format!("{} activity {}", activity_type, id),
        carbon_estimate,
        confidence_score: 0.8,
        timestamp: "2026-10-12 09:30".to_string(),
        raw_data: None,
    }
}

#[allow(dead_code)]
pub fn sample_activities() -> Vec<Activity> {
    vec![
        activity("a1", "Travel", 12.5),
        activity("a2", "groceries", 7.3),
        Activity {
            raw_data: Some("Booking Confirmation, Location: JFK Airport".to_string()),
            ..activity("a3", "travel", 240.0)
        },
        activity("a4", "housing", 18.2),
    ]
}

// ─── Middleware ──────────────────────────────────────────────

async fn record(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let recorded = describe(&request);
    state.requests.lock().unwrap().push(recorded);

    next.run(request).await
}

fn describe(request: &Request) -> RecordedRequest {
    let header_str = |name: header::HeaderName| {
        request
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };

    RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(|q| q.to_string()),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
    }
}

async fn gate(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let fail_status = *state.fail_status.lock().unwrap();
    if let Some(status) = fail_status {
        let status = StatusCode::from_u16(status).unwrap();
        return (
            status,
            Json(json!({"detail": "An internal server error occurred. Please contact support."})),
        )
            .into_response();
    }

    let required = state.required_token.lock().unwrap().clone();
    if let Some(token) = required {
        let expected = format!("Bearer {}", token);
        let authorized = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some(expected.as_str());
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Could not validate credentials"})),
            )
                .into_response();
        }
    }

    next.run(request).await
}

// ─── Handlers ────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
    activity_type: Option<String>,
}

fn default_limit() -> usize {
    50
}

async fn list_activities(
    State(state): State<Arc<MockState>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Activity>> {
    let activities = state.activities.lock().unwrap().clone();
    let page = activities
        .into_iter()
        .filter(|a| {
            query
                .activity_type
                .as_ref()
                .map_or(true, |t| &a.activity_type == t)
        })
        .skip(query.skip)
        .take(query.limit)
        .collect();
    Json(page)
}

async fn upload(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> Response {
    let mut imported = 0;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(|n| n.to_string());
        let contents = field.bytes().await.unwrap_or_default().to_vec();

        // Header row excluded
        imported += String::from_utf8_lossy(&contents)
            .lines()
            .skip(1)
            .filter(|l| !l.trim().is_empty())
            .count();

        state.uploads.lock().unwrap().push(ReceivedFile {
            field: name,
            file_name,
            contents,
        });
    }

    (
        StatusCode::CREATED,
        Json(json!({"message": format!("Successfully imported {} activities.", imported)})),
    )
        .into_response()
}

#[derive(Deserialize)]
struct ForecastQuery {
    days: u32,
}

async fn forecast(Query(query): Query<ForecastQuery>) -> Response {
    if !(1..=30).contains(&query.days) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"loc": ["query", "days"], "msg": "out of range"}]})),
        )
            .into_response();
    }
    let points: Vec<_> = (1..=query.days)
        .map(|d| json!({"date": format!("2026-11-{:02}", d), "predicted_carbon": 10.0 + d as f64}))
        .collect();
    Json(points).into_response()
}

async fn anomalies(State(state): State<Arc<MockState>>) -> Json<serde_json::Value> {
    let activities = state.activities.lock().unwrap().clone();
    let flagged: Vec<_> = activities
        .iter()
        .filter(|a| a.carbon_estimate > 100.0)
        .map(|a| {
            json!({
                "id": a.id,
                "desc": a.description,
                "carbon": a.carbon_estimate,
                "date": "2026-10-12T09:30:00"
            })
        })
        .collect();
    Json(json!(flagged))
}

async fn submit_inference(Json(body): Json<serde_json::Value>) -> Response {
    if body.get("raw_data").and_then(|v| v.as_str()).is_none() {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    }
    (
        StatusCode::ACCEPTED,
        Json(json!({"task_id": "task-42", "status": "processing"})),
    )
        .into_response()
}

async fn inference_result(Path(task_id): Path<String>) -> Json<serde_json::Value> {
    if task_id == "task-42" {
        Json(json!({
            "task_id": task_id,
            "status": "completed",
            "result": {"activity_type": "travel", "carbon_estimate": 240.0}
        }))
    } else {
        Json(json!({"task_id": task_id, "status": "processing"}))
    }
}

async fn health(State(state): State<Arc<MockState>>) -> Response {
    if *state.degraded.lock().unwrap() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"detail": {
                "status": "degraded",
                "components": {"postgres": "up", "redis": "down: timeout", "neo4j": "up"}
            }})),
        )
            .into_response();
    }
    Json(json!({
        "status": "healthy",
        "components": {"postgres": "up", "redis": "up", "neo4j": "up"}
    }))
    .into_response()
}
