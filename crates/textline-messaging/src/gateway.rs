// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Mobile Commons profile_update API.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use textline_core::{MessagingGateway, ProfileFields, TextlineError};

/// Request timeout matching the platform's slow tail.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Mobile Commons client implementing [`MessagingGateway`].
///
/// `profile_update` subscribes a phone number to an opt-in path and applies
/// custom profile fields in one form POST. When `disabled` is set no request
/// leaves the process; the call logs and succeeds, which keeps test and ops
/// environments from spamming the platform.
#[derive(Debug, Clone)]
pub struct MobileCommonsGateway {
    client: reqwest::Client,
    base_url: String,
    auth: Option<(String, String)>,
    disabled: bool,
}

impl MobileCommonsGateway {
    pub fn new(
        base_url: &str,
        auth_email: Option<String>,
        auth_pass: Option<String>,
        disabled: bool,
    ) -> Result<Self, TextlineError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TextlineError::Messaging {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: auth_email.zip(auth_pass),
            disabled,
        })
    }
}

#[async_trait]
impl MessagingGateway for MobileCommonsGateway {
    async fn profile_update(
        &self,
        phone: &str,
        opt_in_path: i64,
        fields: &ProfileFields,
    ) -> Result<(), TextlineError> {
        if self.disabled {
            warn!(phone, opt_in_path, "messaging disabled, skipping profile_update");
            return Ok(());
        }

        let opt_in_path = opt_in_path.to_string();
        let mut form: Vec<(&str, &str)> = vec![
            ("phone_number", phone),
            ("opt_in_path_id", &opt_in_path),
            ("chatbot_response", &fields.chatbot_response),
        ];
        if let Some(profile_id) = &fields.profile_id {
            form.push(("profile_id", profile_id));
        }

        let url = format!("{}/profile_update", self.base_url);
        let mut request = self.client.post(&url).form(&form);
        if let Some((email, pass)) = &self.auth {
            request = request.basic_auth(email, Some(pass));
        }

        let response = request.send().await.map_err(|e| TextlineError::Messaging {
            message: format!("profile_update request failed for phone {phone}: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TextlineError::Messaging {
                message: format!(
                    "profile_update returned {status} for phone {phone}: {body}"
                ),
                source: None,
            });
        }

        debug!(phone, "profile_update succeeded");
        Ok(())
    }
}
