// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered draft-field descriptors.
//!
//! Collection order is fixed: quantity, photo, caption, why_participated.
//! A field counts as collected only once its validator has accepted an
//! inbound message; rejection re-prompts the same field.

use textline_core::{validate, Draft, InboundMessage};

use crate::templates;

/// One field of a reportback draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Quantity,
    Photo,
    Caption,
    WhyParticipated,
}

/// The fixed collection order.
pub const FIELD_ORDER: [DraftField; 4] = [
    DraftField::Quantity,
    DraftField::Photo,
    DraftField::Caption,
    DraftField::WhyParticipated,
];

impl DraftField {
    /// The prompt template asking the user for this field.
    pub fn prompt(self) -> &'static str {
        match self {
            DraftField::Quantity => templates::ASK_QUANTITY,
            DraftField::Photo => templates::ASK_PHOTO,
            DraftField::Caption => templates::ASK_CAPTION,
            DraftField::WhyParticipated => templates::ASK_WHY_PARTICIPATED,
        }
    }

    fn is_collected(self, draft: &Draft) -> bool {
        match self {
            DraftField::Quantity => draft.quantity.is_some(),
            DraftField::Photo => draft.photo.is_some(),
            DraftField::Caption => draft.caption.is_some(),
            DraftField::WhyParticipated => draft.why_participated.is_some(),
        }
    }

    /// Validate the inbound against this field and, on success, write the
    /// value into the draft. Returns whether the field was collected.
    pub fn collect(self, draft: &mut Draft, msg: &InboundMessage, min_text_len: usize) -> bool {
        match self {
            DraftField::Quantity => match validate::parse_quantity(&msg.args) {
                Some(quantity) => {
                    draft.quantity = Some(quantity);
                    true
                }
                None => false,
            },
            DraftField::Photo => {
                if msg.is_photo_post() {
                    draft.photo = msg.image_url.clone();
                    true
                } else {
                    false
                }
            }
            DraftField::Caption => {
                if validate::is_valid_text(&msg.args, min_text_len) {
                    draft.caption = Some(msg.args.trim().to_string());
                    true
                } else {
                    false
                }
            }
            DraftField::WhyParticipated => {
                if validate::is_valid_text(&msg.args, min_text_len) {
                    draft.why_participated = Some(msg.args.trim().to_string());
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// The first field of the fixed order that has not been collected yet, or
/// `None` when the draft is complete.
pub fn first_uncollected(draft: &Draft) -> Option<DraftField> {
    FIELD_ORDER
        .iter()
        .copied()
        .find(|field| !field.is_collected(draft))
}
