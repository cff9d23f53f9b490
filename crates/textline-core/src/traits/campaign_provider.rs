// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Campaign content API seam.

use async_trait::async_trait;

use crate::error::TextlineError;

/// Fetches campaign records from the campaign content service.
///
/// Records come back as raw JSON because the service speaks two schema
/// shapes (a legacy flat format and a nested current-run format); the
/// directory normalizer in `textline-campaigns` handles both.
#[async_trait]
pub trait CampaignProvider: Send + Sync {
    /// Fetch a batch of campaign records by id.
    async fn index(&self, ids: &[i64]) -> Result<Vec<serde_json::Value>, TextlineError>;

    /// Fetch a single campaign record by id.
    async fn fetch(&self, id: i64) -> Result<serde_json::Value, TextlineError> {
        let mut records = self.index(&[id]).await?;
        records
            .pop()
            .ok_or_else(|| TextlineError::not_found("campaign", id))
    }
}
