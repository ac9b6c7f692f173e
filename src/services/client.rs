// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! EcoTwin API client.
//!
//! Handles:
//! - Paginated activity listing
//! - Batch CSV upload (multipart)
//! - Async carbon inference on raw activity text
//! - Analytics: forecast, anomalies
//! - Backend health
//!
//! Every request goes through [`ActivityClient::authorize`], which reads the
//! session token at send time and adds `Authorization: Bearer <token>`.
//! Non-multipart requests also carry `Content-Type: application/json`.
//! There are no retries; failures are returned to the caller.

use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::models::analytics::InferenceRequest;
use crate::models::health::DegradedEnvelope;
use crate::models::{Activity, Anomaly, BatchFile, ForecastPoint, HealthReport, InferenceTask};
use crate::session::Session;

const USER_AGENT: &str = concat!("ecotwin-client/", env!("CARGO_PKG_VERSION"));

/// Default page of the activity listing.
pub const DEFAULT_SKIP: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 50;

/// Filters for the activity listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityQuery {
    pub skip: u32,
    pub limit: u32,
    pub activity_type: Option<String>,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
            activity_type: None,
        }
    }
}

impl ActivityQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(activity_type) = &self.activity_type {
            pairs.push(("activity_type", activity_type.clone()));
        }
        pairs
    }
}

/// Client for the EcoTwin backend.
#[derive(Clone)]
pub struct ActivityClient {
    http: reqwest::Client,
    /// `{host}{prefix}`, e.g. `http://localhost:8000/api/v1`
    base_url: String,
    /// `{host}`, for endpoints mounted outside the API prefix
    root_url: String,
    session: Session,
}

impl ActivityClient {
    /// Create a client from configuration and a session context.
    pub fn new(config: &Config, session: Session) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                ClientError::InvalidRequest(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: config.api_base_url(),
            root_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Client against an explicit host and API prefix (used by tests).
    pub fn with_base_url(root_url: &str, api_prefix: &str, session: Session) -> Result<Self> {
        let config = Config {
            api_url: root_url.trim_end_matches('/').to_string(),
            api_prefix: api_prefix.to_string(),
            ..Config::default()
        };
        Self::new(&config, session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Store a token on this client's session (visible to all its clones).
    pub fn set_auth_token(&self, token: impl Into<String>) {
        self.session.set_auth_token(token);
    }

    // ─── Activities ─────────────────────────────────────────────────────────

    /// List activities. `skip` and `limit` are forwarded verbatim.
    pub async fn get_all(&self, skip: u32, limit: u32) -> Result<Vec<Activity>> {
        self.list(&ActivityQuery {
            skip,
            limit,
            activity_type: None,
        })
        .await
    }

    /// First page with the default page size.
    pub async fn get_all_default(&self) -> Result<Vec<Activity>> {
        self.get_all(DEFAULT_SKIP, DEFAULT_LIMIT).await
    }

    /// List activities with optional type filter.
    pub async fn list(&self, query: &ActivityQuery) -> Result<Vec<Activity>> {
        let response = self
            .request(Method::GET, "/activities")
            .query(&query.pairs())
            .send()
            .await?;

        let activities: Vec<Activity> = check_response_json(response).await?;
        tracing::debug!(
            skip = query.skip,
            limit = query.limit,
            count = activities.len(),
            "Fetched activities"
        );
        Ok(activities)
    }

    /// Build (without sending) the listing request, for inspection.
    pub fn build_list_request(&self, skip: u32, limit: u32) -> Result<reqwest::Request> {
        let query = ActivityQuery {
            skip,
            limit,
            activity_type: None,
        };
        Ok(self
            .request(Method::GET, "/activities")
            .query(&query.pairs())
            .build()?)
    }

    // ─── Batch upload ───────────────────────────────────────────────────────

    /// Post a single file as multipart field `file`.
    ///
    /// The backend's response payload is returned as-is.
    pub async fn upload_batch(&self, file: BatchFile) -> Result<serde_json::Value> {
        let file_name = file.file_name.clone();
        let size = file.len();

        let part = reqwest::multipart::Part::bytes(file.contents)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|e| ClientError::InvalidRequest(format!("MIME parse error: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/batch/upload", self.base_url);
        let response = self
            .authorize(self.http.post(&url))
            .multipart(form)
            .send()
            .await?;

        match check_response_json(response).await {
            Ok(payload) => {
                tracing::info!(file = %file_name, bytes = size, "Batch upload accepted");
                Ok(payload)
            }
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "Batch upload failed");
                Err(e)
            }
        }
    }

    /// Read a file from disk and upload it.
    pub async fn upload_batch_path(&self, path: impl AsRef<Path>) -> Result<serde_json::Value> {
        let file = BatchFile::from_path(path).await?;
        self.upload_batch(file).await
    }

    // ─── Analytics ──────────────────────────────────────────────────────────

    /// Footprint forecast for the next `days` days (backend accepts 1..=30).
    pub async fn forecast(&self, days: u32) -> Result<Vec<ForecastPoint>> {
        let response = self
            .request(Method::GET, "/analytics/forecast")
            .query(&[("days", days.to_string())])
            .send()
            .await?;
        check_response_json(response).await
    }

    /// Recent activities flagged as outliers.
    pub async fn anomalies(&self) -> Result<Vec<Anomaly>> {
        self.get_json("/analytics/anomalies").await
    }

    /// Queue raw text for carbon inference; poll with [`Self::inference_result`].
    pub async fn submit_inference(&self, raw_data: &str) -> Result<InferenceTask> {
        let response = self
            .request(Method::POST, "/activities/infer")
            .json(&InferenceRequest { raw_data })
            .send()
            .await?;

        let task: InferenceTask = check_response_json(response).await?;
        tracing::info!(task_id = %task.task_id, "Inference submitted");
        Ok(task)
    }

    pub async fn inference_result(&self, task_id: &str) -> Result<InferenceTask> {
        let path = format!("/activities/infer/{}", urlencoding::encode(task_id));
        self.get_json(&path).await
    }

    // ─── Health ─────────────────────────────────────────────────────────────

    /// Backend health. A 503 carrying a report is returned as a degraded
    /// report rather than an error.
    pub async fn health(&self) -> Result<HealthReport> {
        let url = format!("{}/health", self.root_url);
        let response = self
            .authorize(self.http.get(&url))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            let body = read_error_body(response).await;
            return match serde_json::from_str::<DegradedEnvelope>(&body) {
                Ok(envelope) => {
                    tracing::warn!(
                        failing = ?envelope.detail.failing_components(),
                        "Backend reports degraded health"
                    );
                    Ok(envelope.detail)
                }
                Err(_) => Err(ClientError::Status { status: 503, body }),
            };
        }

        check_response_json(response).await
    }

    // ─── Request plumbing ───────────────────────────────────────────────────

    /// JSON request against the API prefix.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.authorize(self.http.request(method, url))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    /// Attach the bearer token if the session holds a non-empty one.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send().await?;
        check_response_json(response).await
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = read_error_body(response).await;

        if status.as_u16() == 401 {
            tracing::warn!("EcoTwin API rejected credentials (401)");
        }

        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(format!("JSON parse error: {}", e)))
}

/// Body of a failed response; a body that cannot be read is logged and
/// reported as empty.
async fn read_error_body(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(status = status.as_u16(), error = %e, "Failed to read error body");
            String::new()
        }
    }
}
