// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! EcoTwin client: data access and dashboard state for a personal
//! carbon-footprint twin.
//!
//! This crate talks to the EcoTwin API (activities, batch upload,
//! analytics) and turns the asynchronous fetch of a user's activities into
//! a single consistent view state for presentation.

pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod session;

pub use error::{ClientError, Result};
pub use session::Session;
