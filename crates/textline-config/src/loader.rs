// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./textline.toml` > `~/.config/textline/textline.toml`
//! > `/etc/textline/textline.toml` with environment variable overrides via the
//! `TEXTLINE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TextlineConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/textline/textline.toml` (system-wide)
/// 3. `~/.config/textline/textline.toml` (user XDG config)
/// 4. `./textline.toml` (local directory)
/// 5. `TEXTLINE_*` environment variables
pub fn load_config() -> Result<TextlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TextlineConfig::default()))
        .merge(Toml::file("/etc/textline/textline.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("textline/textline.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("textline.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TextlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TextlineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TextlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TextlineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TEXTLINE_COMMANDS_MEMBER_SUPPORT` must
/// map to `commands.member_support`, not `commands.member.support`.
fn env_provider() -> Env {
    Env::prefixed("TEXTLINE_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("commands_", "commands.", 1)
            .replacen("messaging_", "messaging.", 1)
            .replacen("campaigns_", "campaigns.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("engine_", "engine.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[server]
port = 8080

[campaigns]
ids = [1104, 2710]
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.campaigns.ids, vec![1104, 2710]);
        // Untouched sections keep defaults.
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.storage.database_path.is_empty(), false);
    }
}
