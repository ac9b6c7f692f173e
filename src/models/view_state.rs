// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard view state.
//!
//! Exactly one phase is active at a time. `Loading` and `Failed` keep the
//! data of the previous successful fetch (`stale`) so a failed refresh never
//! changes what the view already had.

use crate::models::activity::{total_footprint, Activity};

/// Fixed user-facing message for any failed fetch.
pub const LOAD_ERROR_MESSAGE: &str =
    "Failed to load dashboard data. Please check your connection and try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Request in flight.
    Loading { stale: Vec<Activity> },
    /// Request failed; `message` is safe to show to the user.
    Failed {
        message: String,
        stale: Vec<Activity>,
    },
    /// Request succeeded (possibly with no activities).
    Loaded { activities: Vec<Activity> },
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Loading { stale: Vec::new() }
    }
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    /// The user-facing error, only in the `Failed` phase.
    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Current data: fresh when loaded, otherwise whatever was last loaded.
    pub fn activities(&self) -> &[Activity] {
        match self {
            ViewState::Loading { stale } | ViewState::Failed { stale, .. } => stale,
            ViewState::Loaded { activities } => activities,
        }
    }

    /// Sum of `carbon_estimate` over the current data.
    pub fn total_footprint(&self) -> f64 {
        total_footprint(self.activities())
    }

    /// Restart from `Loading`, carrying the current data along.
    pub fn into_loading(self) -> Self {
        ViewState::Loading {
            stale: self.into_activities(),
        }
    }

    /// Success always wins, whatever the previous phase.
    pub fn into_loaded(self, activities: Vec<Activity>) -> Self {
        ViewState::Loaded { activities }
    }

    /// Failure keeps the previous data unchanged.
    pub fn into_failed(self, message: impl Into<String>) -> Self {
        ViewState::Failed {
            message: message.into(),
            stale: self.into_activities(),
        }
    }

    fn into_activities(self) -> Vec<Activity> {
        match self {
            ViewState::Loading { stale } | ViewState::Failed { stale, .. } => stale,
            ViewState::Loaded { activities } => activities,
        }
    }
}
