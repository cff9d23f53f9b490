// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook request handlers.
//!
//! `POST /v1/chatbot` runs the strictly sequential resolution pipeline:
//! config check, bot dispatch, campaign resolution, user find-or-create,
//! signup load, engine transition, persist, fire-and-forget profile update.

use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use textline_core::{
    Campaign, InboundMessage, MessagingGateway, ProfileFields, Signup, TextlineError,
};
use textline_engine::{Command, OptInPathKind, Turn};
use textline_storage::queries::{signups, users};

use crate::state::{AppState, ChatbotRuntime};

/// Canned reply for the sloth novelty bot.
const SLOTH_REPLY: &str =
    "This sloth appreciates your message and will get back to you... eventually.";

/// Query parameters on the webhook URL.
#[derive(Debug, Deserialize)]
pub struct BotQuery {
    #[serde(default)]
    pub bot_type: Option<String>,
}

/// Form body posted by the messaging platform.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub phone: String,
    #[serde(default)]
    pub args: String,
    #[serde(default)]
    pub mms_image_url: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub profile_id: Option<String>,
}

/// Response body for POST /v1/chatbot.
#[derive(Debug, Serialize)]
pub struct ChatbotResponse {
    pub message: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub campaigns_loaded: usize,
}

/// Which bot handles this webhook, resolved once from `bot_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotKind {
    /// The campaign conversation bot (default).
    Campaign,
    /// Static novelty bot with no campaign machinery.
    Sloth,
}

impl BotKind {
    pub fn from_query(bot_type: Option<&str>) -> Self {
        match bot_type {
            Some("slothbot") => BotKind::Sloth,
            _ => BotKind::Campaign,
        }
    }
}

/// POST /v1/chatbot
pub async fn post_chatbot(
    State(state): State<AppState>,
    Query(query): Query<BotQuery>,
    Form(payload): Form<WebhookPayload>,
) -> Response {
    let message = InboundMessage {
        phone: payload.phone,
        args: payload.args,
        image_url: payload.mms_image_url,
        keyword: payload.keyword.map(|k| k.trim().to_lowercase()),
        profile_id: payload.profile_id,
    };
    debug!(
        phone = %message.phone,
        keyword = message.keyword.as_deref().unwrap_or(""),
        "inbound webhook"
    );

    if BotKind::from_query(query.bot_type.as_deref()) == BotKind::Sloth {
        let reply = SLOTH_REPLY.to_string();
        dispatch_profile_update(
            Arc::clone(&state.messaging),
            message.phone,
            state.sloth_opt_in,
            ProfileFields {
                chatbot_response: reply.clone(),
                profile_id: None,
            },
        );
        return Json(ChatbotResponse { message: reply }).into_response();
    }

    let Some(runtime) = state.chatbot.clone() else {
        error!("chatbot settings incomplete, refusing webhook");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    match run_pipeline(&state, &runtime, message).await {
        Ok(reply) => Json(ChatbotResponse { message: reply }).into_response(),
        Err(status) => status.into_response(),
    }
}

/// The sequential resolution pipeline for one campaign-bot turn.
async fn run_pipeline(
    state: &AppState,
    runtime: &ChatbotRuntime,
    message: InboundMessage,
) -> Result<String, StatusCode> {
    // Keyword resolution happens before identity: an unknown keyword means
    // a broken platform-side configuration, not a user error.
    let mut campaign: Option<Campaign> = None;
    if let Some(keyword) = &message.keyword {
        match state.directory.by_keyword(keyword) {
            Some(found) => campaign = Some(found),
            None => {
                error!(keyword, "keyword maps to no loaded campaign");
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    let user = users::find_or_create(&state.db, &message.phone, message.profile_id.as_deref())
        .await
        .map_err(|e| internal(&e, "user find_or_create failed"))?;

    if campaign.is_none() {
        match user.current_campaign {
            Some(id) => {
                campaign = state.directory.by_id(id);
                if campaign.is_none() {
                    warn!(user = %user.id, campaign = id, "current campaign not in directory");
                }
            }
            None => warn!(user = %user.id, "user has no current campaign"),
        }
    }

    if runtime.commands.classify(&message.args) == Some(Command::ClearCache) {
        state.associations.retain(|(uid, _), _| uid != &user.id);
        info!(user = %user.id, "cleared signup association cache");
    }

    let signup: Option<Signup> = match &campaign {
        Some(campaign) => {
            let cached = state
                .associations
                .get(&(user.id.clone(), campaign.id))
                .map(|entry| *entry);
            let loaded = match cached {
                Some(signup_id) => signups::find_by_id(&state.db, signup_id)
                    .await
                    .map_err(|e| internal(&e, "signup load failed"))?,
                None => None,
            };
            let signup = match loaded {
                Some(signup) => signup,
                None => signups::find_or_create(&state.db, &user.id, campaign.id)
                    .await
                    .map_err(|e| internal(&e, "signup find_or_create failed"))?,
            };
            Some(signup)
        }
        None => None,
    };

    let outcome = runtime.engine.transition(Turn {
        message: &message,
        user: &user,
        campaign: campaign.as_ref(),
        signup,
    });

    if outcome.state_changed
        && let Some(signup) = &outcome.signup
    {
        signups::save(&state.db, signup)
            .await
            .map_err(|e| internal(&e, "signup save failed"))?;
    }
    if let Some(campaign) = &campaign {
        users::set_current_campaign(&state.db, &user.id, campaign.id)
            .await
            .map_err(|e| internal(&e, "current campaign update failed"))?;
        if let Some(signup) = &outcome.signup {
            state
                .associations
                .insert((user.id.clone(), campaign.id), signup.id);
        }
    }

    let opt_in_path = match outcome.opt_in {
        OptInPathKind::Chatbot => runtime.oip_chatbot,
        OptInPathKind::AgentView => runtime.oip_agentview,
    };
    dispatch_profile_update(
        Arc::clone(&state.messaging),
        message.phone,
        opt_in_path,
        outcome.profile,
    );

    Ok(outcome.reply)
}

/// Push the profile update without blocking the webhook response.
fn dispatch_profile_update(
    messaging: Arc<dyn MessagingGateway>,
    phone: String,
    opt_in_path: i64,
    fields: ProfileFields,
) {
    tokio::spawn(async move {
        if let Err(e) = messaging.profile_update(&phone, opt_in_path, &fields).await {
            error!(phone, opt_in_path, error = %e, "profile update dispatch failed");
        }
    });
}

fn internal(e: &TextlineError, context: &str) -> StatusCode {
    error!(error = %e, "{context}");
    StatusCode::INTERNAL_SERVER_ERROR
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        campaigns_loaded: state.directory.len(),
    })
}
