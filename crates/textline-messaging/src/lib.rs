// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mobile Commons messaging gateway client.
//!
//! Textline never sends SMS bodies directly: it updates the subscriber
//! profile with the computed reply and subscribes the member to an opt-in
//! path whose platform-side conversation renders the echoed field.

pub mod gateway;

pub use gateway::MobileCommonsGateway;
