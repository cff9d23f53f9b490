// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared state for axum request handlers.

use std::sync::Arc;

use dashmap::DashMap;

use textline_campaigns::CampaignDirectory;
use textline_core::MessagingGateway;
use textline_engine::{CommandSet, Engine};
use textline_storage::Database;

/// The fully-configured chatbot route.
///
/// Built only when every required setting (command keywords, opt-in paths)
/// is present; a half-configured deployment answers the webhook with 500
/// instead of degrading unpredictably. Mirrors `ChatbotSettings` from
/// `textline-config` to avoid a dependency on the config crate from the
/// gateway crate.
pub struct ChatbotRuntime {
    pub commands: CommandSet,
    pub oip_chatbot: i64,
    pub oip_agentview: i64,
    pub engine: Engine,
}

impl ChatbotRuntime {
    pub fn new(
        commands: CommandSet,
        oip_chatbot: i64,
        oip_agentview: i64,
        min_text_length: usize,
    ) -> Self {
        Self {
            engine: Engine::new(commands.clone(), min_text_length),
            commands,
            oip_chatbot,
            oip_agentview,
        }
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The chatbot route, when required configuration is complete.
    pub chatbot: Option<Arc<ChatbotRuntime>>,
    /// Opt-in path for the sloth novelty bot.
    pub sloth_opt_in: i64,
    /// Read-mostly campaign cache, refreshed out-of-band.
    pub directory: Arc<CampaignDirectory>,
    pub db: Database,
    pub messaging: Arc<dyn MessagingGateway>,
    /// (user id, campaign id) -> signup id fast path. In-memory only;
    /// `clear_cache` wipes a user's entries and the next turn re-derives
    /// them from the database.
    pub associations: Arc<DashMap<(String, i64), i64>>,
}
