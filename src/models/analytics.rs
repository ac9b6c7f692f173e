// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analytics responses: forecasts, anomalies and async inference tasks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One day of the footprint forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ForecastPoint {
    /// Day being predicted (YYYY-MM-DD)
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    /// Predicted kg CO2e, never negative
    pub predicted_carbon: f64,
}

/// An activity flagged as a statistical outlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Anomaly {
    pub id: String,
    pub desc: String,
    pub carbon: f64,
    pub date: String,
}

/// State of a background inference job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferenceStatus {
    Processing,
    Completed,
    Failed,
    /// Any other broker state, passed through verbatim
    #[serde(untagged)]
    Other(String),
}

/// Response of the inference submit/poll endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceTask {
    pub task_id: String,
    pub status: InferenceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InferenceTask {
    /// No further polling is useful.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.status,
            InferenceStatus::Completed | InferenceStatus::Failed
        )
    }
}

/// Body of an inference submission.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest<'a> {
    pub raw_data: &'a str,
}
