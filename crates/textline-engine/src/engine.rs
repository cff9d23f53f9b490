// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation transition function.
//!
//! Pure: no I/O, cannot fail. Inconsistent inputs degrade to the generic
//! error reply with no state change. Branch precedence: member_support >
//! campaign closed > draft routing > reportback > menus.

use tracing::warn;

use textline_core::{Campaign, Draft, InboundMessage, ProfileFields, Signup, User};

use crate::commands::{Command, CommandSet};
use crate::fields::{self, DraftField};
use crate::templates;

/// Which opt-in path the profile update should route the subscriber through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptInPathKind {
    /// The default chatbot conversation path.
    Chatbot,
    /// The human agent-view path, selected for member support.
    AgentView,
}

/// One inbound turn: the message plus everything the gateway resolved for it.
///
/// `signup` is a working copy; the engine mutates it and hands it back in the
/// outcome for the gateway to persist.
#[derive(Debug)]
pub struct Turn<'a> {
    pub message: &'a InboundMessage,
    pub user: &'a User,
    pub campaign: Option<&'a Campaign>,
    pub signup: Option<Signup>,
}

/// Everything the gateway needs to act on a turn.
#[derive(Debug)]
pub struct TurnOutcome {
    /// Reply text for the webhook response.
    pub reply: String,
    /// The (possibly mutated) signup working copy.
    pub signup: Option<Signup>,
    /// Opt-in path selection for the profile update.
    pub opt_in: OptInPathKind,
    /// Profile fields to apply via the messaging gateway.
    pub profile: ProfileFields,
    /// Whether the signup working copy differs from what was loaded and
    /// needs a save.
    pub state_changed: bool,
}

/// The conversation state machine.
pub struct Engine {
    commands: CommandSet,
    min_text_length: usize,
}

impl Engine {
    pub fn new(commands: CommandSet, min_text_length: usize) -> Self {
        Self {
            commands,
            min_text_length,
        }
    }

    /// Compute the next state and reply for one inbound turn.
    pub fn transition(&self, turn: Turn<'_>) -> TurnOutcome {
        // clear_cache is a gateway concern; past that point the text is
        // ordinary content.
        let command = self
            .commands
            .classify(&turn.message.args)
            .filter(|c| *c != Command::ClearCache);

        let profile_link = if turn.message.profile_id.is_none() {
            Some(turn.user.id.clone())
        } else {
            None
        };

        let (reply, signup, opt_in, state_changed) = self.route(&turn, command);

        TurnOutcome {
            profile: ProfileFields {
                chatbot_response: reply.clone(),
                profile_id: profile_link,
            },
            reply,
            signup,
            opt_in,
            state_changed,
        }
    }

    fn route(
        &self,
        turn: &Turn<'_>,
        command: Option<Command>,
    ) -> (String, Option<Signup>, OptInPathKind, bool) {
        // Member support is answered in every state, including closed
        // campaigns and mid-draft.
        if command == Some(Command::MemberSupport) {
            return (
                templates::MEMBER_SUPPORT.to_string(),
                turn.signup.clone(),
                OptInPathKind::AgentView,
                false,
            );
        }

        let Some(campaign) = turn.campaign else {
            warn!(user = %turn.user.id, "no campaign resolved for turn");
            return (
                templates::GENERIC_ERROR.to_string(),
                turn.signup.clone(),
                OptInPathKind::Chatbot,
                false,
            );
        };

        if campaign.is_closed() {
            return (
                templates::render(templates::CAMPAIGN_CLOSED, campaign, None),
                turn.signup.clone(),
                OptInPathKind::Chatbot,
                false,
            );
        }

        let Some(mut signup) = turn.signup.clone() else {
            warn!(
                user = %turn.user.id,
                campaign = campaign.id,
                "no signup resolved for turn"
            );
            return (
                templates::GENERIC_ERROR.to_string(),
                None,
                OptInPathKind::Chatbot,
                false,
            );
        };

        if let Some(draft) = signup.draft.take() {
            return self.route_draft(turn.message, campaign, signup, draft, command);
        }

        if command == Some(Command::Reportback) {
            signup.draft = Some(Draft::default());
            return (
                templates::render(DraftField::Quantity.prompt(), campaign, None),
                Some(signup),
                OptInPathKind::Chatbot,
                true,
            );
        }

        let template = if signup.is_completed() {
            if turn.message.keyword.is_some() {
                templates::MENU_COMPLETED
            } else {
                templates::INVALID_CMD_COMPLETED
            }
        } else if turn.message.keyword.is_some() {
            templates::MENU_SIGNEDUP
        } else {
            templates::INVALID_CMD_SIGNEDUP
        };
        (
            templates::render(template, campaign, None),
            Some(signup),
            OptInPathKind::Chatbot,
            false,
        )
    }

    /// Route inbound content to the first uncollected draft field. Keywords
    /// arriving mid-draft are prospective field values, not navigation.
    fn route_draft(
        &self,
        message: &InboundMessage,
        campaign: &Campaign,
        mut signup: Signup,
        mut draft: Draft,
        command: Option<Command>,
    ) -> (String, Option<Signup>, OptInPathKind, bool) {
        let Some(field) = fields::first_uncollected(&draft) else {
            // A complete draft should have been finalized at collection
            // time; repair the inconsistency here.
            return Self::finalize(campaign, signup, draft);
        };

        // Reportback mid-draft does not restart; keep collecting.
        if command == Some(Command::Reportback) {
            signup.draft = Some(draft);
            return (
                templates::render(field.prompt(), campaign, None),
                Some(signup),
                OptInPathKind::Chatbot,
                false,
            );
        }

        if !field.collect(&mut draft, message, self.min_text_length) {
            signup.draft = Some(draft);
            return (
                templates::render(field.prompt(), campaign, None),
                Some(signup),
                OptInPathKind::Chatbot,
                false,
            );
        }

        match fields::first_uncollected(&draft) {
            Some(next) => {
                signup.draft = Some(draft);
                (
                    templates::render(next.prompt(), campaign, None),
                    Some(signup),
                    OptInPathKind::Chatbot,
                    true,
                )
            }
            None => Self::finalize(campaign, signup, draft),
        }
    }

    /// Set the submitted total, clear the draft, and emit the confirmation.
    /// The caller persists both changes in one save.
    fn finalize(
        campaign: &Campaign,
        mut signup: Signup,
        draft: Draft,
    ) -> (String, Option<Signup>, OptInPathKind, bool) {
        let quantity = draft.quantity.unwrap_or_default();
        signup.total_quantity_submitted = Some(quantity);
        signup.draft = None;
        (
            templates::render_confirmation(campaign, quantity),
            Some(signup),
            OptInPathKind::Chatbot,
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textline_core::CampaignStatus;

    fn engine() -> Engine {
        Engine::new(
            CommandSet {
                member_support: "q".into(),
                reportback: "start".into(),
                clear_cache: "clear cache".into(),
            },
            3,
        )
    }

    fn campaign() -> Campaign {
        Campaign {
            id: 1104,
            title: "Teens for Jeans".into(),
            tagline: "Donate jeans for homeless youth.".into(),
            status: CampaignStatus::Active,
            rb_noun: "jeans".into(),
            rb_verb: "collected".into(),
            msg_rb_confirmation: None,
            keywords: vec!["jeans".into()],
            current_run_id: None,
        }
    }

    fn user() -> User {
        User {
            id: "u-1".into(),
            phone: "15555551234".into(),
            profile_id: Some("ns-1".into()),
            current_campaign: None,
        }
    }

    fn signup() -> Signup {
        Signup {
            id: 1,
            user_id: "u-1".into(),
            campaign_id: 1104,
            total_quantity_submitted: None,
            draft: None,
        }
    }

    fn text_msg(args: &str) -> InboundMessage {
        InboundMessage {
            phone: "15555551234".into(),
            args: args.into(),
            profile_id: Some("ns-1".into()),
            ..Default::default()
        }
    }

    fn keyword_msg(keyword: &str) -> InboundMessage {
        InboundMessage {
            keyword: Some(keyword.into()),
            ..text_msg(keyword)
        }
    }

    fn turn<'a>(
        message: &'a InboundMessage,
        user: &'a User,
        campaign: Option<&'a Campaign>,
        signup: Option<Signup>,
    ) -> Turn<'a> {
        Turn {
            message,
            user,
            campaign,
            signup,
        }
    }

    #[test]
    fn keyword_entry_on_fresh_signup_yields_signedup_menu() {
        let (c, u) = (campaign(), user());
        let msg = keyword_msg("jeans");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(signup())));
        assert!(out.reply.contains("Thanks for joining Teens for Jeans"));
        assert!(!out.state_changed);
        let s = out.signup.unwrap();
        assert!(s.total_quantity_submitted.is_none());
        assert!(s.draft.is_none());
        assert_eq!(out.opt_in, OptInPathKind::Chatbot);
    }

    #[test]
    fn non_command_text_yields_invalid_cmd_signedup() {
        let (c, u) = (campaign(), user());
        let msg = text_msg("hello there");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(signup())));
        assert!(out.reply.contains("didn't get that"));
        assert!(out.reply.contains("collected some jeans"));
        assert!(!out.state_changed);
    }

    #[test]
    fn completed_signup_menus() {
        let (c, u) = (campaign(), user());
        let mut s = signup();
        s.total_quantity_submitted = Some(5);

        let msg = keyword_msg("jeans");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(s.clone())));
        assert!(out.reply.contains("already submitted"));
        assert!(!out.state_changed);

        let msg = text_msg("what now");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(s)));
        assert!(out.reply.contains("didn't get that"));
        assert!(out.reply.contains("more jeans"));
    }

    #[test]
    fn closed_campaign_answers_closed_for_everything_but_support() {
        let mut c = campaign();
        c.status = CampaignStatus::Closed;
        let u = user();

        let msg = keyword_msg("jeans");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(signup())));
        assert!(out.reply.contains("no longer accepting"));
        assert!(!out.state_changed);

        let msg = text_msg("start");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(signup())));
        assert!(out.reply.contains("no longer accepting"));

        let msg = text_msg("q");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(signup())));
        assert_eq!(out.reply, templates::MEMBER_SUPPORT);
        assert_eq!(out.opt_in, OptInPathKind::AgentView);
    }

    #[test]
    fn reportback_starts_a_draft() {
        let (c, u) = (campaign(), user());
        let msg = text_msg("START");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(signup())));
        assert!(out.reply.contains("How many jeans"));
        assert!(out.state_changed);
        let s = out.signup.unwrap();
        assert_eq!(s.draft, Some(Draft::default()));
        assert!(s.total_quantity_submitted.is_none());
    }

    #[test]
    fn invalid_quantity_reprompts_without_state_change() {
        let (c, u) = (campaign(), user());
        let mut s = signup();
        s.draft = Some(Draft::default());

        let msg = text_msg("a lot");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(s)));
        assert!(out.reply.contains("How many jeans"));
        assert!(!out.state_changed);
        assert_eq!(out.signup.unwrap().draft, Some(Draft::default()));
    }

    #[test]
    fn valid_quantity_advances_to_photo() {
        let (c, u) = (campaign(), user());
        let mut s = signup();
        s.draft = Some(Draft::default());

        let msg = text_msg(" 12 ");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(s)));
        assert!(out.reply.contains("Send a photo"));
        assert!(out.state_changed);
        let draft = out.signup.unwrap().draft.unwrap();
        assert_eq!(draft.quantity, Some(12));
        assert!(draft.photo.is_none());
    }

    #[test]
    fn text_during_photo_step_reprompts_photo() {
        let (c, u) = (campaign(), user());
        let mut s = signup();
        s.draft = Some(Draft {
            quantity: Some(12),
            ..Default::default()
        });

        let msg = text_msg("here is my photo");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(s)));
        assert!(out.reply.contains("Send a photo"));
        assert!(!out.state_changed);
    }

    #[test]
    fn final_field_completes_the_submission() {
        let (c, u) = (campaign(), user());
        let mut s = signup();
        s.draft = Some(Draft {
            quantity: Some(12),
            photo: Some("https://example.org/p.jpg".into()),
            caption: Some("twelve pairs".into()),
            why_participated: None,
        });

        let msg = text_msg("my whole school pitched in");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(s)));
        assert!(out.reply.contains("collected 12 jeans"));
        assert!(out.state_changed);
        let s = out.signup.unwrap();
        assert_eq!(s.total_quantity_submitted, Some(12));
        assert!(s.draft.is_none());
    }

    #[test]
    fn keyword_during_draft_is_a_field_value() {
        let (c, u) = (campaign(), user());
        let mut s = signup();
        s.draft = Some(Draft {
            quantity: Some(3),
            photo: Some("https://example.org/p.jpg".into()),
            caption: None,
            why_participated: None,
        });

        // "jeans" arrives as a keyword re-entry but a caption is pending.
        let msg = keyword_msg("jeans");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(s)));
        assert!(out.state_changed);
        let draft = out.signup.unwrap().draft.unwrap();
        assert_eq!(draft.caption.as_deref(), Some("jeans"));
    }

    #[test]
    fn member_support_during_draft_leaves_draft_untouched() {
        let (c, u) = (campaign(), user());
        let mut s = signup();
        let draft = Draft {
            quantity: Some(3),
            ..Default::default()
        };
        s.draft = Some(draft.clone());

        let msg = text_msg("Q");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(s)));
        assert_eq!(out.reply, templates::MEMBER_SUPPORT);
        assert_eq!(out.opt_in, OptInPathKind::AgentView);
        assert!(!out.state_changed);
        assert_eq!(out.signup.unwrap().draft, Some(draft));
    }

    #[test]
    fn reportback_during_draft_does_not_restart() {
        let (c, u) = (campaign(), user());
        let mut s = signup();
        s.draft = Some(Draft {
            quantity: Some(3),
            ..Default::default()
        });

        let msg = text_msg("start");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(s)));
        assert!(out.reply.contains("Send a photo"));
        assert!(!out.state_changed);
        assert_eq!(out.signup.unwrap().draft.unwrap().quantity, Some(3));
    }

    #[test]
    fn missing_campaign_degrades_to_generic_error() {
        let u = user();
        let msg = text_msg("hello");
        let out = engine().transition(turn(&msg, &u, None, None));
        assert_eq!(out.reply, templates::GENERIC_ERROR);
        assert!(!out.state_changed);
        assert!(out.signup.is_none());
    }

    #[test]
    fn profile_linkage_only_when_inbound_lacked_it() {
        let (c, u) = (campaign(), user());

        let mut msg = keyword_msg("jeans");
        msg.profile_id = None;
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(signup())));
        assert_eq!(out.profile.profile_id.as_deref(), Some("u-1"));
        assert_eq!(out.profile.chatbot_response, out.reply);

        let msg = keyword_msg("jeans");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(signup())));
        assert!(out.profile.profile_id.is_none());
    }

    #[test]
    fn clear_cache_text_is_ordinary_content_here() {
        let (c, u) = (campaign(), user());
        let msg = text_msg("clear cache");
        let out = engine().transition(turn(&msg, &u, Some(&c), Some(signup())));
        assert!(out.reply.contains("didn't get that"));
    }
}
