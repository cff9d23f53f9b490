// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the campaign content API.

use async_trait::async_trait;
use tracing::debug;

use textline_core::{CampaignProvider, TextlineError};

/// reqwest-backed [`CampaignProvider`].
///
/// The index endpoint returns either a bare JSON array or an object with a
/// `data` array, depending on the service generation; both are accepted.
pub struct ContentApi {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ContentApi {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn campaigns_url(&self, ids: &[i64]) -> String {
        let ids = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!("{}/campaigns?ids={ids}", self.base_url)
    }
}

#[async_trait]
impl CampaignProvider for ContentApi {
    async fn index(&self, ids: &[i64]) -> Result<Vec<serde_json::Value>, TextlineError> {
        let url = self.campaigns_url(ids);
        debug!(%url, "fetching campaign index");

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await.map_err(|e| TextlineError::Campaign {
            message: format!("campaign index request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TextlineError::Campaign {
                message: format!("campaign index returned HTTP {status}"),
                source: None,
            });
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| TextlineError::Campaign {
                message: format!("campaign index body was not JSON: {e}"),
                source: Some(Box::new(e)),
            })?;

        let records = match body {
            serde_json::Value::Array(records) => records,
            serde_json::Value::Object(mut obj) => match obj.remove("data") {
                Some(serde_json::Value::Array(records)) => records,
                _ => {
                    return Err(TextlineError::Campaign {
                        message: "campaign index response missing data array".to_string(),
                        source: None,
                    });
                }
            },
            _ => {
                return Err(TextlineError::Campaign {
                    message: "campaign index response was not a list".to_string(),
                    source: None,
                });
            }
        };

        Ok(records)
    }
}
