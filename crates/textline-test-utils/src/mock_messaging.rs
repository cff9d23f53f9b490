// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording messaging gateway for assertion in tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use textline_core::{MessagingGateway, ProfileFields, TextlineError};

/// One captured `profile_update` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdateCall {
    pub phone: String,
    pub opt_in_path: i64,
    pub fields: ProfileFields,
}

/// A [`MessagingGateway`] that records every call instead of sending.
///
/// Dispatch is fire-and-forget in the gateway, so tests use
/// [`wait_for_calls`](Self::wait_for_calls) to rendezvous with the spawned
/// task before asserting.
#[derive(Default)]
pub struct RecordingMessagingGateway {
    calls: Mutex<Vec<ProfileUpdateCall>>,
    fail: Mutex<bool>,
}

impl RecordingMessagingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent calls fail after recording.
    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    /// All calls recorded so far.
    pub fn calls(&self) -> Vec<ProfileUpdateCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Wait until at least `count` calls have been recorded.
    ///
    /// Panics after five seconds so a lost dispatch fails the test instead
    /// of hanging it.
    pub async fn wait_for_calls(&self, count: usize) -> Vec<ProfileUpdateCall> {
        let wait = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let calls = self.calls();
                if calls.len() >= count {
                    return calls;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        });
        match wait.await {
            Ok(calls) => calls,
            Err(_) => panic!(
                "timed out waiting for {count} profile update call(s), recorded {}",
                self.calls().len()
            ),
        }
    }
}

#[async_trait]
impl MessagingGateway for RecordingMessagingGateway {
    async fn profile_update(
        &self,
        phone: &str,
        opt_in_path: i64,
        fields: &ProfileFields,
    ) -> Result<(), TextlineError> {
        self.calls.lock().unwrap().push(ProfileUpdateCall {
            phone: phone.to_string(),
            opt_in_path,
            fields: fields.clone(),
        });
        if *self.fail.lock().unwrap() {
            return Err(TextlineError::Messaging {
                message: "mock messaging failure".to_string(),
                source: None,
            });
        }
        Ok(())
    }
}
