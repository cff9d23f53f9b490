// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply message templates and interpolation.
//!
//! Placeholders: `{{title}}`, `{{tagline}}`, `{{noun}}`, `{{verb}}`,
//! `{{quantity}}`. Unknown placeholders are left in place so a typo in an
//! operator-supplied confirmation template is visible rather than silently
//! swallowed.

use textline_core::Campaign;

pub const MENU_SIGNEDUP: &str = "Thanks for joining {{title}}! {{tagline}} \
When you have {{verb}} some {{noun}}, text back the word START to submit your photo.";

pub const MENU_COMPLETED: &str = "You've already submitted for {{title}}. \
Text START to submit more {{noun}}, or Q if you have a question.";

pub const INVALID_CMD_SIGNEDUP: &str = "Sorry, I didn't get that. \
Text START when you have {{verb}} some {{noun}}, or Q if you have a question.";

pub const INVALID_CMD_COMPLETED: &str = "Sorry, I didn't get that. \
Text START to submit more {{noun}} for {{title}}, or Q if you have a question.";

pub const CAMPAIGN_CLOSED: &str = "Sorry, {{title}} is no longer accepting \
submissions. Text Q if you have a question.";

pub const MEMBER_SUPPORT: &str = "What's your question? I'll try my best to \
answer it.";

pub const ASK_QUANTITY: &str = "How many {{noun}} have you {{verb}} so far? \
Please text back a number (e.g. 3).";

pub const ASK_PHOTO: &str = "Send a photo of the {{noun}} you've {{verb}}.";

pub const ASK_CAPTION: &str = "Great! Now text back a caption for your photo \
(what's happening in it?).";

pub const ASK_WHY_PARTICIPATED: &str = "Last question: why is {{title}} \
important to you?";

pub const RB_CONFIRMATION: &str = "Got it! You've {{verb}} {{quantity}} \
{{noun}} for {{title}}. Thanks for making a difference!";

/// Reply used when the conversation cannot be tied to a campaign. Makes no
/// assumptions about state.
pub const GENERIC_ERROR: &str = "Sorry, something went wrong on our end. \
Please try again later.";

/// Interpolate campaign placeholders (and optionally a quantity) into a
/// template.
pub fn render(template: &str, campaign: &Campaign, quantity: Option<i64>) -> String {
    let mut out = template
        .replace("{{title}}", &campaign.title)
        .replace("{{tagline}}", &campaign.tagline)
        .replace("{{noun}}", &campaign.rb_noun)
        .replace("{{verb}}", &campaign.rb_verb);
    if let Some(q) = quantity {
        out = out.replace("{{quantity}}", &q.to_string());
    }
    out
}

/// Render the reportback confirmation, preferring the campaign's own
/// template over the built-in default.
pub fn render_confirmation(campaign: &Campaign, quantity: i64) -> String {
    let template = campaign
        .msg_rb_confirmation
        .as_deref()
        .unwrap_or(RB_CONFIRMATION);
    render(template, campaign, Some(quantity))
}
