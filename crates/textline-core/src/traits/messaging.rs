// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound messaging platform seam.

use async_trait::async_trait;

use crate::error::TextlineError;
use crate::types::ProfileFields;

/// Pushes state back to the messaging platform.
///
/// The reply itself is delivered platform-side by subscribing the member to
/// an opt-in path whose conversation renders the echoed response field, so
/// the only outbound call Textline makes is a profile update.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Update the subscriber profile and subscribe it to an opt-in path.
    ///
    /// Fire-and-forget from the webhook's perspective: the caller spawns
    /// this and logs the outcome without blocking the HTTP response.
    async fn profile_update(
        &self,
        phone: &str,
        opt_in_path: i64,
        fields: &ProfileFields,
    ) -> Result<(), TextlineError>;
}
