// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure conversation state machine for the Textline chatbot backend.
//!
//! Given one inbound turn (message + resolved user, campaign, and signup),
//! [`Engine::transition`] computes the reply, the mutated signup working
//! copy, the opt-in path selection, and the profile-update directive. No
//! I/O happens here; persistence and dispatch are the gateway's job.

pub mod commands;
pub mod engine;
pub mod fields;
pub mod templates;

pub use commands::{Command, CommandSet};
pub use engine::{Engine, OptInPathKind, Turn, TurnOutcome};
pub use fields::DraftField;
