// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory campaign directory.
//!
//! Maps campaign id -> campaign and lowercased keyword -> campaign id.
//! Explicitly constructed and injected; turns read it, the startup bulk
//! load and the out-of-band refresh task write it.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, error, warn};

use textline_core::{Campaign, CampaignProvider, TextlineError};

use crate::normalize;

/// Process-wide campaign cache.
///
/// `load` replaces entries atomically per campaign: a record that fails to
/// fetch or normalize leaves its previous entry untouched (stale-or-absent,
/// never partially written) and does not roll back campaigns already loaded.
pub struct CampaignDirectory {
    provider: Arc<dyn CampaignProvider>,
    campaigns: DashMap<i64, Campaign>,
    keywords: DashMap<String, i64>,
}

impl CampaignDirectory {
    pub fn new(provider: Arc<dyn CampaignProvider>) -> Self {
        Self {
            provider,
            campaigns: DashMap::new(),
            keywords: DashMap::new(),
        }
    }

    /// Fetch the given campaigns from the provider and index them.
    ///
    /// Returns the number of campaigns loaded. Provider failure for the
    /// whole batch is an error; a single unparseable record is logged and
    /// skipped.
    pub async fn load(&self, ids: &[i64]) -> Result<usize, TextlineError> {
        if ids.is_empty() {
            warn!("campaign directory load called with empty id list");
            return Ok(0);
        }

        let records = self.provider.index(ids).await?;
        debug!(requested = ids.len(), received = records.len(), "campaign index fetched");

        let mut loaded = 0;
        for record in &records {
            match normalize::normalize(record) {
                Ok(campaign) => {
                    self.store(campaign);
                    loaded += 1;
                }
                Err(err) => {
                    error!(%err, "skipping unparseable campaign record");
                }
            }
        }
        Ok(loaded)
    }

    /// Pure lookup by campaign id.
    pub fn by_id(&self, id: i64) -> Option<Campaign> {
        self.campaigns.get(&id).map(|entry| entry.clone())
    }

    /// Pure lookup by keyword (case-insensitive).
    pub fn by_keyword(&self, keyword: &str) -> Option<Campaign> {
        let normalized = keyword.trim().to_lowercase();
        let id = *self.keywords.get(&normalized)?;
        self.by_id(id)
    }

    /// Number of campaigns currently indexed.
    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    /// Replace one campaign's entry and its keyword index.
    ///
    /// Keywords that previously pointed at this campaign but are gone from
    /// the new record are dropped, so a renamed keyword cannot keep
    /// resolving to it.
    fn store(&self, campaign: Campaign) {
        let id = campaign.id;
        self.keywords
            .retain(|keyword, mapped| *mapped != id || campaign.keywords.contains(keyword));
        for keyword in &campaign.keywords {
            self.keywords.insert(keyword.clone(), id);
        }
        debug!(campaign = id, keywords = campaign.keywords.len(), "campaign indexed");
        self.campaigns.insert(id, campaign);
    }
}
