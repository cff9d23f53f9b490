// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Textline workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identity record for a member, keyed by phone number.
///
/// Identity is owned by the messaging platform; Textline persists only what
/// the conversation needs: the linkage id and the last active campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Internal user id (UUID string).
    pub id: String,
    /// Phone number as received from the webhook.
    pub phone: String,
    /// Messaging-platform profile id, when known.
    pub profile_id: Option<String>,
    /// Id of the campaign the user last interacted with.
    pub current_campaign: Option<i64>,
}

/// Campaign lifecycle status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Closed,
}

/// A campaign as held in the directory cache.
///
/// Normalized from either provider schema; immutable during a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub title: String,
    pub tagline: String,
    pub status: CampaignStatus,
    /// Noun of the reportback action, e.g. "jeans".
    pub rb_noun: String,
    /// Verb of the reportback action, e.g. "collected".
    pub rb_verb: String,
    /// Confirmation message template; falls back to the built-in default.
    pub msg_rb_confirmation: Option<String>,
    /// Trigger keywords, lowercased. Many keywords map onto one campaign.
    pub keywords: Vec<String>,
    /// Id of the campaign's current run, when the schema carries one.
    pub current_run_id: Option<i64>,
}

impl Campaign {
    pub fn is_closed(&self) -> bool {
        self.status == CampaignStatus::Closed
    }
}

/// An in-progress reportback submission, embedded in a [`Signup`].
///
/// A field counts as collected only once it has passed its validator.
/// Collection order is fixed: quantity, photo, caption, why_participated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub quantity: Option<i64>,
    pub photo: Option<String>,
    pub caption: Option<String>,
    pub why_participated: Option<String>,
}

impl Draft {
    /// True once every field has been collected.
    pub fn is_complete(&self) -> bool {
        self.quantity.is_some()
            && self.photo.is_some()
            && self.caption.is_some()
            && self.why_participated.is_some()
    }
}

/// Per-user-per-campaign participation record.
///
/// At most one Signup exists per (user, campaign) pair; the store enforces
/// this with an atomic upsert. `total_quantity_submitted` being set means the
/// user has a completed reportback for this campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signup {
    pub id: i64,
    pub user_id: String,
    pub campaign_id: i64,
    pub total_quantity_submitted: Option<i64>,
    pub draft: Option<Draft>,
}

impl Signup {
    /// True while a draft submission is in progress.
    pub fn has_draft(&self) -> bool {
        self.draft.is_some()
    }

    /// True once the user has a completed reportback for this campaign.
    pub fn is_completed(&self) -> bool {
        self.total_quantity_submitted.is_some()
    }
}

/// The inbound webhook payload fields the conversation consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    pub phone: String,
    /// Free-text message body.
    pub args: String,
    /// Image URL when the post carries a photo.
    pub image_url: Option<String>,
    /// Campaign trigger keyword, lowercased by the boundary.
    pub keyword: Option<String>,
    /// Messaging-platform profile id, when the webhook supplied one.
    pub profile_id: Option<String>,
}

impl InboundMessage {
    /// True when the inbound post carries a photo rather than plain text.
    pub fn is_photo_post(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }
}

/// Custom profile fields applied to the subscriber via the messaging gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileFields {
    /// The computed reply text, echoed so the platform-side conversation
    /// flow can render it.
    pub chatbot_response: String,
    /// Identity linkage, set only when the inbound did not already carry it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
}
