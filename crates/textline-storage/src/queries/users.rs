// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User identity CRUD operations.

use rusqlite::params;

use textline_core::{TextlineError, User};

use crate::database::Database;

fn row_to_user(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        phone: row.get(1)?,
        profile_id: row.get(2)?,
        current_campaign: row.get(3)?,
    })
}

/// Find the user for a phone number, creating one if absent.
///
/// Idempotent under concurrent calls: the UNIQUE(phone) constraint plus
/// `ON CONFLICT DO UPDATE` makes this a single atomic upsert. A supplied
/// profile id fills in a missing one but never overwrites an existing one.
pub async fn find_or_create(
    db: &Database,
    phone: &str,
    profile_id: Option<&str>,
) -> Result<User, TextlineError> {
    let phone = phone.to_string();
    let profile_id = profile_id.map(|s| s.to_string());
    let new_id = uuid::Uuid::new_v4().to_string();

    db.connection()
        .call(move |conn| -> Result<User, rusqlite::Error> {
            conn.execute(
                "INSERT INTO users (id, phone, profile_id) VALUES (?1, ?2, ?3)
                 ON CONFLICT(phone) DO UPDATE
                 SET profile_id = COALESCE(users.profile_id, excluded.profile_id)",
                params![new_id, phone, profile_id],
            )?;
            conn.query_row(
                "SELECT id, phone, profile_id, current_campaign
                 FROM users WHERE phone = ?1",
                params![phone],
                row_to_user,
            )
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Record the campaign the user last interacted with.
pub async fn set_current_campaign(
    db: &Database,
    user_id: &str,
    campaign_id: i64,
) -> Result<(), TextlineError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "UPDATE users
                 SET current_campaign = ?1,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![campaign_id, user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by phone number.
pub async fn find_by_phone(db: &Database, phone: &str) -> Result<Option<User>, TextlineError> {
    let phone = phone.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<User>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT id, phone, profile_id, current_campaign
                 FROM users WHERE phone = ?1",
                params![phone],
                row_to_user,
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
