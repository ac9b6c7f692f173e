// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod analytics;
pub mod batch;
pub mod health;
pub mod sandbox;
pub mod view_state;

pub use activity::{total_footprint, Activity, ActivityCategory};
pub use analytics::{Anomaly, ForecastPoint, InferenceStatus, InferenceTask};
pub use batch::BatchFile;
pub use health::HealthReport;
pub use sandbox::Scenario;
pub use view_state::{ViewState, LOAD_ERROR_MESSAGE};
