// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Textline's external collaborators.

pub mod campaign_provider;
pub mod messaging;

pub use campaign_provider::CampaignProvider;
pub use messaging::MessagingGateway;
