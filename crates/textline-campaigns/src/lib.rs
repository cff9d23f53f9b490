// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Campaign directory cache and content API client.
//!
//! The directory holds the process-wide campaign id and keyword indexes,
//! loaded in bulk at startup and refreshed out-of-band; lookups during a
//! conversation turn are read-only. The normalizer accepts both campaign
//! record schemas the content service speaks.

pub mod content_api;
pub mod directory;
pub mod normalize;

pub use content_api::ContentApi;
pub use directory::CampaignDirectory;
