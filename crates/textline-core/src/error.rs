// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Textline chatbot backend.

use thiserror::Error;

/// The primary error type used across all Textline components.
///
/// Leaf components (stores, API clients, the messaging gateway) raise these;
/// the webhook boundary handles them once and answers HTTP 500. The
/// conversation engine itself never constructs one -- it is pure and degrades
/// to an error reply instead.
#[derive(Debug, Error)]
pub enum TextlineError {
    /// Configuration errors (missing required settings, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Campaign content API errors (fetch failure, unparseable record).
    #[error("campaign provider error: {message}")]
    Campaign {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Messaging gateway errors (profile update / dispatch failure).
    #[error("messaging error: {message}")]
    Messaging {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An entity that was expected to exist could not be resolved.
    #[error("{what} not found: {id}")]
    NotFound { what: String, id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TextlineError {
    /// Shorthand for a not-found error with a displayable id.
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            what: what.to_string(),
            id: id.to_string(),
        }
    }
}
