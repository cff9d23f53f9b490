// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `textline serve` command implementation.
//!
//! Wires the concrete adapters together: SQLite storage, the campaign
//! content API behind the directory cache, the Mobile Commons gateway, and
//! the axum webhook server, with a periodic directory refresh task.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tracing::{error, info};

use textline_campaigns::{CampaignDirectory, ContentApi};
use textline_config::TextlineConfig;
use textline_core::{CampaignProvider, MessagingGateway, TextlineError};
use textline_engine::CommandSet;
use textline_gateway::{start_server, AppState, ChatbotRuntime};
use textline_messaging::MobileCommonsGateway;
use textline_storage::Database;

/// Runs the `textline serve` command.
pub async fn run_serve(config: TextlineConfig) -> Result<(), TextlineError> {
    init_tracing(&config.server.log_level);

    info!("starting textline serve");

    let db = Database::open(&config.storage.database_path).await?;

    let provider: Arc<dyn CampaignProvider> = Arc::new(ContentApi::new(
        config.campaigns.api_base_url.clone(),
        config.campaigns.api_key.clone(),
    ));
    let directory = Arc::new(CampaignDirectory::new(provider));
    match directory.load(&config.campaigns.ids).await {
        Ok(count) => info!(count, "campaign directory loaded"),
        // The server still starts; keyword turns answer 500 until a
        // refresh succeeds.
        Err(e) => error!(error = %e, "startup campaign load failed"),
    }
    spawn_directory_refresh(
        Arc::clone(&directory),
        config.campaigns.ids.clone(),
        config.campaigns.refresh_interval_secs,
    );

    let messaging: Arc<dyn MessagingGateway> = Arc::new(MobileCommonsGateway::new(
        &config.messaging.base_url,
        config.messaging.auth_email.clone(),
        config.messaging.auth_pass.clone(),
        config.messaging.disabled,
    )?);

    let chatbot = match config.chatbot_settings() {
        Ok(settings) => Some(Arc::new(ChatbotRuntime::new(
            CommandSet {
                member_support: settings.cmd_member_support,
                reportback: settings.cmd_reportback,
                clear_cache: settings.cmd_clear_cache,
            },
            settings.oip_chatbot,
            settings.oip_agentview,
            config.engine.min_text_length,
        ))),
        Err(e) => {
            error!(error = %e, "chatbot settings incomplete; webhook will answer 500");
            None
        }
    };

    let state = AppState {
        chatbot,
        sloth_opt_in: config.messaging.oip_sloth,
        directory,
        db,
        messaging,
        associations: Arc::new(DashMap::new()),
    };

    start_server(&config.server.host, config.server.port, state).await
}

/// Reload the campaign allowlist on a fixed interval.
///
/// A failed refresh keeps the previous directory contents; one campaign's
/// bad record never rolls back the others.
fn spawn_directory_refresh(directory: Arc<CampaignDirectory>, ids: Vec<i64>, interval_secs: u64) {
    if interval_secs == 0 || ids.is_empty() {
        return;
    }
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick fires immediately; the startup load already ran.
        interval.tick().await;
        loop {
            interval.tick().await;
            match directory.load(&ids).await {
                Ok(count) => info!(count, "campaign directory refreshed"),
                Err(e) => error!(error = %e, "campaign directory refresh failed"),
            }
        }
    });
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("textline={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
