// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session context holding the bearer token for outgoing requests.
//!
//! A `Session` is handed to the client at construction. Clones share the
//! same token cell, so the login flow can set the token on its own handle
//! and every client built from that session sees it on the next request.
//! Independent sessions never observe each other's tokens.

use std::sync::{Arc, RwLock};

/// Shared, mutable bearer-token cell.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Create an empty session (no token).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that already holds a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_auth_token(token);
        session
    }

    /// Store the token for all subsequent requests. No validation is done.
    pub fn set_auth_token(&self, token: impl Into<String>) {
        let token = token.into();
        match self.token.write() {
            Ok(mut guard) => *guard = Some(token),
            Err(poisoned) => *poisoned.into_inner() = Some(token),
        }
        tracing::debug!("Session token set");
    }

    /// Forget the token.
    pub fn clear(&self) {
        match self.token.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }
}
