// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Textline integration tests.
//!
//! Provides mock adapters and fixture helpers for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockCampaignProvider`] - canned campaign records behind the provider seam
//! - [`RecordingMessagingGateway`] - captures profile updates for assertion
//! - [`harness`] - tempfile-backed database and campaign fixtures

pub mod harness;
pub mod mock_messaging;
pub mod mock_provider;

pub use harness::{legacy_campaign_json, temp_database};
pub use mock_messaging::{ProfileUpdateCall, RecordingMessagingGateway};
pub use mock_provider::MockCampaignProvider;
