// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signup CRUD operations, including the embedded draft columns.

use rusqlite::params;

use textline_core::{Draft, Signup, TextlineError};

use crate::database::Database;

const SIGNUP_COLUMNS: &str = "id, user_id, campaign_id, total_quantity_submitted,
     draft_active, draft_quantity, draft_photo, draft_caption, draft_why_participated";

fn row_to_signup(row: &rusqlite::Row<'_>) -> Result<Signup, rusqlite::Error> {
    let draft_active: bool = row.get(4)?;
    let draft = if draft_active {
        Some(Draft {
            quantity: row.get(5)?,
            photo: row.get(6)?,
            caption: row.get(7)?,
            why_participated: row.get(8)?,
        })
    } else {
        None
    };
    Ok(Signup {
        id: row.get(0)?,
        user_id: row.get(1)?,
        campaign_id: row.get(2)?,
        total_quantity_submitted: row.get(3)?,
        draft,
    })
}

/// Return the signup for (user, campaign), creating an empty one if absent.
///
/// The UNIQUE(user_id, campaign_id) constraint plus `ON CONFLICT DO NOTHING`
/// keeps this idempotent under concurrent first-contact requests: two racing
/// pipelines both land on the same row.
pub async fn find_or_create(
    db: &Database,
    user_id: &str,
    campaign_id: i64,
) -> Result<Signup, TextlineError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Signup, rusqlite::Error> {
            conn.execute(
                "INSERT INTO signups (user_id, campaign_id) VALUES (?1, ?2)
                 ON CONFLICT(user_id, campaign_id) DO NOTHING",
                params![user_id, campaign_id],
            )?;
            conn.query_row(
                &format!(
                    "SELECT {SIGNUP_COLUMNS} FROM signups
                     WHERE user_id = ?1 AND campaign_id = ?2"
                ),
                params![user_id, campaign_id],
                row_to_signup,
            )
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a signup by id.
pub async fn find_by_id(db: &Database, id: i64) -> Result<Option<Signup>, TextlineError> {
    db.connection()
        .call(move |conn| -> Result<Option<Signup>, rusqlite::Error> {
            let result = conn.query_row(
                &format!("SELECT {SIGNUP_COLUMNS} FROM signups WHERE id = ?1"),
                params![id],
                row_to_signup,
            );
            match result {
                Ok(signup) => Ok(Some(signup)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Persist a full replacement of the signup's mutable fields.
///
/// Draft fields and total_quantity_submitted are written together in one
/// statement, so completing a draft (set total, clear draft) is atomic.
/// Last-write-wins; the field set written is authoritative.
pub async fn save(db: &Database, signup: &Signup) -> Result<(), TextlineError> {
    let signup = signup.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            let draft = signup.draft.clone().unwrap_or_default();
            conn.execute(
                "UPDATE signups
                 SET total_quantity_submitted = ?1,
                     draft_active = ?2,
                     draft_quantity = ?3,
                     draft_photo = ?4,
                     draft_caption = ?5,
                     draft_why_participated = ?6,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?7",
                params![
                    signup.total_quantity_submitted,
                    signup.draft.is_some(),
                    draft.quantity,
                    draft.photo,
                    draft.caption,
                    draft.why_participated,
                    signup.id,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
