// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock campaign provider with pre-configured records.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use textline_core::{CampaignProvider, TextlineError};

/// Serves canned campaign records keyed by id.
///
/// `index` returns the records for the requested ids in request order,
/// silently skipping unknown ids the way the real service omits missing
/// campaigns from its response.
#[derive(Default)]
pub struct MockCampaignProvider {
    records: Mutex<HashMap<i64, serde_json::Value>>,
    fail: Mutex<bool>,
}

impl MockCampaignProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the record served for a campaign id.
    pub fn insert(&self, id: i64, record: serde_json::Value) {
        self.records.lock().unwrap().insert(id, record);
    }

    /// Make subsequent calls fail with a provider error.
    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

#[async_trait]
impl CampaignProvider for MockCampaignProvider {
    async fn index(&self, ids: &[i64]) -> Result<Vec<serde_json::Value>, TextlineError> {
        if *self.fail.lock().unwrap() {
            return Err(TextlineError::Campaign {
                message: "mock provider failure".to_string(),
                source: None,
            });
        }
        let records = self.records.lock().unwrap();
        Ok(ids.iter().filter_map(|id| records.get(id).cloned()).collect())
    }
}
