// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard view-state controller.
//!
//! Drives one activity fetch per activation and publishes the resulting
//! [`ViewState`] on a `watch` channel:
//! 1. Start in `Loading`
//! 2. Fetch the first page exactly once
//! 3. Move to `Loaded` on success, `Failed` (fixed message) on error
//!
//! A view mounts by subscribing. If views have mounted and every one of them
//! is gone when the fetch completes, the result is dropped instead of
//! applied. A controller no view ever mounted applies results as usual.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::error::Result;
use crate::models::{Activity, ViewState, LOAD_ERROR_MESSAGE};
use crate::services::client::{ActivityClient, DEFAULT_LIMIT, DEFAULT_SKIP};

/// Anything that can produce a page of activities.
pub trait ActivitySource {
    fn fetch_activities(
        &self,
        skip: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Activity>>> + Send;
}

impl ActivitySource for ActivityClient {
    fn fetch_activities(
        &self,
        skip: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Activity>>> + Send {
        self.get_all(skip, limit)
    }
}

pub struct DashboardController<S> {
    source: S,
    page_size: u32,
    state: watch::Sender<ViewState>,
    mounted: AtomicBool,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the fetch ends or its future is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: ActivitySource> DashboardController<S> {
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            source,
            page_size: DEFAULT_LIMIT,
            state,
            mounted: AtomicBool::new(false),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mount a view: receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.mounted.store(true, Ordering::Release);
        self.state.subscribe()
    }

    /// Current state.
    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Total footprint over the current data; never cached.
    pub fn total_footprint(&self) -> f64 {
        self.state.borrow().total_footprint()
    }

    /// Run one fetch and return the resulting state.
    ///
    /// Calling this while a fetch is already in flight does not start
    /// another request; the current snapshot is returned instead. Dropping
    /// the returned future cancels the fetch and leaves the state untouched.
    pub async fn activate(&self) -> ViewState {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("Dashboard fetch already in flight");
            return self.snapshot();
        }
        let guard = InFlight(&self.in_flight);

        let outcome = self
            .source
            .fetch_activities(DEFAULT_SKIP, self.page_size)
            .await;
        drop(guard);

        if self.is_torn_down() {
            tracing::debug!("Dashboard view torn down, discarding fetch result");
            return self.snapshot();
        }

        match outcome {
            Ok(activities) => {
                tracing::info!(count = activities.len(), "Dashboard data loaded");
                self.state.send_modify(|state| {
                    *state = std::mem::take(state).into_loaded(activities);
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, status = ?e.status(), "Failed to fetch dashboard data");
                self.state.send_modify(|state| {
                    *state = std::mem::take(state).into_failed(LOAD_ERROR_MESSAGE);
                });
            }
        }

        self.snapshot()
    }

    fn is_torn_down(&self) -> bool {
        self.mounted.load(Ordering::Acquire) && self.state.is_closed()
    }

    /// Restart from `Loading` (keeping current data) and fetch again.
    pub async fn retry(&self) -> ViewState {
        if !self.in_flight.load(Ordering::Acquire) {
            self.state.send_modify(|state| {
                *state = std::mem::take(state).into_loading();
            });
        }
        self.activate().await
    }
}
