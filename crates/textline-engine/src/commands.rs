// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command keyword classification.
//!
//! Commands take priority over content parsing. The keyword strings are
//! operator-configured; matching is case-insensitive on the trimmed message
//! body and must consume the whole body.

/// A recognized conversation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Hand the conversation to a human agent.
    MemberSupport,
    /// Start (or resume intent to start) a reportback submission.
    Reportback,
    /// Reset the in-memory signup association for this user. Handled at the
    /// gateway; the engine treats the text as ordinary content.
    ClearCache,
}

/// The configured command keyword strings.
#[derive(Debug, Clone)]
pub struct CommandSet {
    pub member_support: String,
    pub reportback: String,
    pub clear_cache: String,
}

impl CommandSet {
    /// Classify a message body as a command, or `None` for ordinary content.
    ///
    /// Exact match only: a command keyword embedded in a longer message is
    /// content, not a command.
    pub fn classify(&self, text: &str) -> Option<Command> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case(&self.member_support) {
            Some(Command::MemberSupport)
        } else if trimmed.eq_ignore_ascii_case(&self.reportback) {
            Some(Command::Reportback)
        } else if trimmed.eq_ignore_ascii_case(&self.clear_cache) {
            Some(Command::ClearCache)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands() -> CommandSet {
        CommandSet {
            member_support: "q".into(),
            reportback: "start".into(),
            clear_cache: "clear cache".into(),
        }
    }

    #[test]
    fn classifies_exact_matches_case_insensitively() {
        let cmds = commands();
        assert_eq!(cmds.classify("Q"), Some(Command::MemberSupport));
        assert_eq!(cmds.classify(" start "), Some(Command::Reportback));
        assert_eq!(cmds.classify("Clear Cache"), Some(Command::ClearCache));
    }

    #[test]
    fn embedded_keywords_are_content() {
        let cmds = commands();
        assert_eq!(cmds.classify("start now"), None);
        assert_eq!(cmds.classify("i have a q"), None);
        assert_eq!(cmds.classify(""), None);
    }
}
