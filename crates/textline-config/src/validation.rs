// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and sane intervals.

use thiserror::Error;

use crate::model::TextlineConfig;

/// A configuration problem found during load or validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration could not be loaded or deserialized.
    #[error("config load error: {0}")]
    Load(String),

    /// A loaded value failed a semantic check.
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TextlineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation(
            "server.host must not be empty".to_string(),
        ));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation(
            "storage.database_path must not be empty".to_string(),
        ));
    }

    if config.campaigns.api_base_url.trim().is_empty() {
        errors.push(ConfigError::Validation(
            "campaigns.api_base_url must not be empty".to_string(),
        ));
    }

    if config.messaging.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation(
            "messaging.base_url must not be empty".to_string(),
        ));
    }

    if config.engine.min_text_length == 0 {
        errors.push(ConfigError::Validation(
            "engine.min_text_length must be at least 1".to_string(),
        ));
    }

    // Command keywords, when set, must survive the lowercased-trim
    // comparison the engine performs.
    for (key, value) in [
        ("commands.member_support", &config.commands.member_support),
        ("commands.reportback", &config.commands.reportback),
    ] {
        if let Some(keyword) = value
            && keyword.trim().is_empty()
        {
            errors.push(ConfigError::Validation(format!(
                "{key} must not be blank when set"
            )));
        }
    }

    if config.commands.clear_cache.trim().is_empty() {
        errors.push(ConfigError::Validation(
            "commands.clear_cache must not be blank".to_string(),
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
