// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Textline chatbot backend.
//!
//! This crate provides the foundational trait definitions, error type, domain
//! types, and pure validation predicates used throughout the Textline
//! workspace. The campaign content API and the outbound messaging platform
//! are reached only through the adapter traits defined here.

pub mod error;
pub mod traits;
pub mod types;
pub mod validate;

// Re-export key items at crate root for ergonomic imports.
pub use error::TextlineError;
pub use traits::{CampaignProvider, MessagingGateway};
pub use types::{
    Campaign, CampaignStatus, Draft, InboundMessage, ProfileFields, Signup, User,
};
