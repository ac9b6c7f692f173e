// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend health report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Health of the backend and its dependencies.
///
/// `status` is `"healthy"` or `"degraded"`; each component maps to `"up"`,
/// `"down"` or `"down: <reason>"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub components: BTreeMap<String, String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }

    /// Names of components not reporting `up`.
    pub fn failing_components(&self) -> Vec<&str> {
        self.components
            .iter()
            .filter(|(_, state)| state.as_str() != "up")
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// A 503 from the health endpoint wraps the report in `{"detail": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct DegradedEnvelope {
    pub detail: HealthReport,
}
