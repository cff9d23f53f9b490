// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Textline chatbot backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

use textline_core::TextlineError;

/// Top-level Textline configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; the settings the chatbot route cannot run without are checked
/// per-request via [`TextlineConfig::chatbot_settings`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TextlineConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Recognized conversation command keywords.
    #[serde(default)]
    pub commands: CommandsConfig,

    /// Messaging platform (profile update / opt-in path) settings.
    #[serde(default)]
    pub messaging: MessagingConfig,

    /// Campaign content API settings.
    #[serde(default)]
    pub campaigns: CampaignsConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Conversation engine tuning.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command keyword configuration.
///
/// `member_support` and `reportback` have no defaults on purpose: the
/// deployed keyword strings are operator-chosen, and the chatbot route
/// refuses to process messages until they are set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommandsConfig {
    /// Keyword that routes the member to agent support.
    #[serde(default)]
    pub member_support: Option<String>,

    /// Keyword that starts a reportback submission.
    #[serde(default)]
    pub reportback: Option<String>,

    /// Keyword that clears the in-memory campaign association cache.
    #[serde(default = "default_clear_cache")]
    pub clear_cache: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            member_support: None,
            reportback: None,
            clear_cache: default_clear_cache(),
        }
    }
}

fn default_clear_cache() -> String {
    "clear cache".to_string()
}

/// Messaging platform configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MessagingConfig {
    /// Profile update API base URL.
    #[serde(default = "default_messaging_base_url")]
    pub base_url: String,

    /// API auth email. `None` disables authenticated calls.
    #[serde(default)]
    pub auth_email: Option<String>,

    /// API auth password.
    #[serde(default)]
    pub auth_pass: Option<String>,

    /// Opt-in path id for the default chatbot conversation flow.
    #[serde(default)]
    pub oip_chatbot: Option<i64>,

    /// Opt-in path id for the agent-handoff (member support) flow.
    #[serde(default)]
    pub oip_agentview: Option<i64>,

    /// Opt-in path id for the sloth novelty bot.
    #[serde(default = "default_oip_sloth")]
    pub oip_sloth: i64,

    /// Skip external dispatch and return computed replies directly.
    /// Used in test and ops environments.
    #[serde(default)]
    pub disabled: bool,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            base_url: default_messaging_base_url(),
            auth_email: None,
            auth_pass: None,
            oip_chatbot: None,
            oip_agentview: None,
            oip_sloth: default_oip_sloth(),
            disabled: false,
        }
    }
}

fn default_messaging_base_url() -> String {
    "https://secure.mcommons.com/api".to_string()
}

fn default_oip_sloth() -> i64 {
    210045
}

/// Campaign content API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignsConfig {
    /// Content API base URL.
    #[serde(default = "default_campaigns_base_url")]
    pub api_base_url: String,

    /// Optional API key sent with content requests.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Allowlist of campaign ids loaded in bulk at startup.
    #[serde(default)]
    pub ids: Vec<i64>,

    /// Seconds between directory refreshes. Zero disables the refresh task.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl Default for CampaignsConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_campaigns_base_url(),
            api_key: None,
            ids: Vec::new(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

fn default_campaigns_base_url() -> String {
    "https://api.example.org/v1".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    3600
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("textline").join("textline.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "textline.db".to_string())
}

/// Conversation engine tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Minimum trimmed length for caption / why_participated answers.
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_text_length: default_min_text_length(),
        }
    }
}

fn default_min_text_length() -> usize {
    3
}

/// The settings the chatbot route cannot process a webhook without.
///
/// Extracted (and therefore re-checked) per request so that a partially
/// configured deployment answers HTTP 500 instead of crashing the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatbotSettings {
    pub cmd_member_support: String,
    pub cmd_reportback: String,
    pub cmd_clear_cache: String,
    pub oip_chatbot: i64,
    pub oip_agentview: i64,
}

impl TextlineConfig {
    /// Resolve the required chatbot settings, naming every missing key.
    pub fn chatbot_settings(&self) -> Result<ChatbotSettings, TextlineError> {
        let mut missing = Vec::new();

        if self.commands.member_support.is_none() {
            missing.push("commands.member_support");
        }
        if self.commands.reportback.is_none() {
            missing.push("commands.reportback");
        }
        if self.messaging.oip_chatbot.is_none() {
            missing.push("messaging.oip_chatbot");
        }
        if self.messaging.oip_agentview.is_none() {
            missing.push("messaging.oip_agentview");
        }

        if !missing.is_empty() {
            return Err(TextlineError::Config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        }

        Ok(ChatbotSettings {
            cmd_member_support: self.commands.member_support.clone().unwrap_or_default(),
            cmd_reportback: self.commands.reportback.clone().unwrap_or_default(),
            cmd_clear_cache: self.commands.clear_cache.clone(),
            oip_chatbot: self.messaging.oip_chatbot.unwrap_or_default(),
            oip_agentview: self.messaging.oip_agentview.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_every_section() {
        let config = TextlineConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.commands.clear_cache, "clear cache");
        assert_eq!(config.engine.min_text_length, 3);
        assert!(!config.messaging.disabled);
    }

    #[test]
    fn chatbot_settings_names_all_missing_keys() {
        let config = TextlineConfig::default();
        let err = config.chatbot_settings().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("commands.member_support"));
        assert!(msg.contains("commands.reportback"));
        assert!(msg.contains("messaging.oip_chatbot"));
        assert!(msg.contains("messaging.oip_agentview"));
    }

    #[test]
    fn chatbot_settings_resolve_when_configured() {
        let toml_str = r#"
[commands]
member_support = "q"
reportback = "start"

[messaging]
oip_chatbot = 100
oip_agentview = 200
"#;
        let config: TextlineConfig = toml::from_str(toml_str).unwrap();
        let settings = config.chatbot_settings().unwrap();
        assert_eq!(settings.cmd_member_support, "q");
        assert_eq!(settings.cmd_reportback, "start");
        assert_eq!(settings.cmd_clear_cache, "clear cache");
        assert_eq!(settings.oip_chatbot, 100);
        assert_eq!(settings.oip_agentview, 200);
    }

    #[test]
    fn sections_deny_unknown_fields() {
        let toml_str = r#"
[messaging]
opt_in_chatbot = 100
"#;
        assert!(toml::from_str::<TextlineConfig>(toml_str).is_err());
    }
}
