// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text rendering of the dashboard for the terminal.

use std::fmt::Write as _;

use crate::models::sandbox::{total_impact, Scenario};
use crate::models::{Activity, ViewState};

pub const LOADING_PLACEHOLDER: &str = "Loading your eco-twin...";

pub fn loading_placeholder() -> &'static str {
    LOADING_PLACEHOLDER
}

/// One activity line: glyph, description, timestamp and estimate.
pub fn activity_card(activity: &Activity) -> String {
    format!(
        "{} {}  ({})  {} kg CO2e",
        activity.category().glyph(),
        activity.description,
        activity.timestamp,
        activity.carbon_estimate
    )
}

/// The whole "Latest Updates" panel for any phase.
pub fn dashboard(state: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total footprint: {:.1} kg CO2e", state.total_footprint());
    let _ = writeln!(out, "Latest Updates");

    match state {
        ViewState::Loading { .. } => {
            let _ = writeln!(out, "  {}", loading_placeholder());
        }
        ViewState::Failed { message, .. } => {
            let _ = writeln!(out, "  ! {}", message);
            let _ = writeln!(out, "  Retry: run `ecotwin dashboard` again.");
        }
        ViewState::Loaded { activities } if activities.is_empty() => {
            let _ = writeln!(out, "  No activities yet.");
        }
        ViewState::Loaded { activities } => {
            for activity in activities {
                let _ = writeln!(out, "  {}", activity_card(activity));
            }
        }
    }
    out
}

/// Last-resort message when something unexpected blows up.
pub fn crash_fallback() -> &'static str {
    "Something went wrong. The Digital Twin encountered a glitch in the simulation. \
     Restart the command to try again."
}

pub fn sandbox(scenarios: &[Scenario]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Simulation Sandbox");
    let _ = writeln!(
        out,
        "Projected annual savings: {} kg",
        total_impact(scenarios)
    );
    for s in scenarios {
        let _ = writeln!(
            out,
            "  {}. {}: {} -> {}  {} kg",
            s.id, s.label, s.baseline, s.modified, s.impact_kg
        );
    }
    out
}
