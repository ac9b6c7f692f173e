// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! What-if scenarios shown in the simulation sandbox.
//!
//! These are fixed fixtures. Nothing here is derived from the activity
//! stream; the backend does not yet expose a scenario contract.

use serde::Serialize;

/// A single "what-if" change and its projected annual delta.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub id: u32,
    pub label: &'static str,
    pub baseline: &'static str,
    pub modified: &'static str,
    /// Projected annual change in kg CO2e (negative is a saving)
    pub impact_kg: i64,
}

pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: 1,
            label: "Vehicle Type",
            baseline: "Gas Sedan",
            modified: "Electric Vehicle",
            impact_kg: -2200,
        },
        Scenario {
            id: 2,
            label: "Diet",
            baseline: "Omnivore",
            modified: "Vegetarian",
            impact_kg: -1500,
        },
        Scenario {
            id: 3,
            label: "Solar Install",
            baseline: "Grid Only",
            modified: "5kW Solar System",
            impact_kg: -3000,
        },
    ]
}

/// Sum of scenario impacts.
pub fn total_impact(scenarios: &[Scenario]) -> i64 {
    scenarios.iter().map(|s| s.impact_kg).sum()
}
