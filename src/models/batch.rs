// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Batch upload payloads.

use std::path::Path;

use crate::error::{ClientError, Result};

/// A single file to be posted to the batch-ingestion endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFile {
    pub file_name: String,
    pub mime_type: String,
    pub contents: Vec<u8>,
}

impl BatchFile {
    /// Build a file from in-memory bytes, guessing the MIME type from the name.
    pub fn new(file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            contents: contents.into(),
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::File(format!("No file name in {}", path.display())))?
            .to_string();

        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::File(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(file = %file_name, bytes = contents.len(), "Read batch file");
        Ok(Self::new(file_name, contents))
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => "text/csv",
        "json" => "application/json",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// The backend reports a batch import as `{"message": "..."}`. The payload is
/// otherwise backend-defined, so callers get the raw JSON and this helper.
pub fn upload_message(payload: &serde_json::Value) -> Option<&str> {
    payload.get("message").and_then(|m| m.as_str())
}
