// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP webhook gateway.
//!
//! The boundary adapter between the messaging platform's webhook and the
//! conversation engine: it resolves {user, campaign, signup} for each
//! inbound message, runs the pure transition, persists the result, and
//! dispatches the profile update as a fire-and-forget task.

pub mod handlers;
pub mod server;
pub mod state;

pub use server::{router, start_server};
pub use state::{AppState, ChatbotRuntime};
