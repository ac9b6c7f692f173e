// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API access and view-state control.

pub mod client;
pub mod dashboard;

pub use client::{ActivityClient, ActivityQuery};
pub use dashboard::{ActivitySource, DashboardController};
