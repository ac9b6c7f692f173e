// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model as served by the EcoTwin API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One carbon-emitting event, exactly as received from the backend.
///
/// The client never rewrites these fields; it only aggregates over them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    /// Opaque unique identifier
    pub id: String,
    /// Free-form category label (e.g. "Travel", "groceries")
    pub activity_type: String,
    /// Human-readable description
    pub description: String,
    /// Estimated emissions in kg CO2e
    pub carbon_estimate: f64,
    /// Model confidence, nominally in [0, 1]
    pub confidence_score: f64,
    /// Display-formatted timestamp
    pub timestamp: String,
    /// Raw source text, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(optional))]
    pub raw_data: Option<String>,
}

impl Activity {
    /// Display category derived from `activity_type`.
    pub fn category(&self) -> ActivityCategory {
        ActivityCategory::from_type(&self.activity_type)
    }
}

/// Display routing for activity types (matched case-insensitively).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCategory {
    Travel,
    Groceries,
    Housing,
    Other,
}

impl ActivityCategory {
    pub fn from_type(activity_type: &str) -> Self {
        match activity_type.trim().to_lowercase().as_str() {
            "travel" => ActivityCategory::Travel,
            "groceries" => ActivityCategory::Groceries,
            "housing" => ActivityCategory::Housing,
            _ => ActivityCategory::Other,
        }
    }

    /// Short glyph shown next to an activity in the terminal.
    pub fn glyph(&self) -> &'static str {
        match self {
            ActivityCategory::Travel => "✈",
            ActivityCategory::Groceries => "🛒",
            ActivityCategory::Housing => "⌂",
            ActivityCategory::Other => "⚡",
        }
    }
}

/// Total footprint (kg CO2e) of a collection of activities.
///
/// Recomputed on every call; an empty slice yields `0.0`.
pub fn total_footprint(activities: &[Activity]) -> f64 {
    activities.iter().map(|a| a.carbon_estimate).sum()
}
