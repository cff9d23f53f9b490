// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture helpers shared across integration tests.

use serde_json::json;
use tempfile::TempDir;

use textline_storage::Database;

/// Open a migrated database in a fresh temp directory.
///
/// The returned [`TempDir`] must be kept alive for the lifetime of the
/// database; dropping it deletes the file out from under the connection.
pub async fn temp_database() -> (Database, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("textline.db");
    let db = Database::open(path.to_str().expect("utf-8 temp path"))
        .await
        .expect("open temp database");
    (db, dir)
}

/// A minimal active legacy-schema campaign record.
pub fn legacy_campaign_json(id: i64, title: &str, keywords: &[&str]) -> serde_json::Value {
    json!({
        "legacyCampaignId": id,
        "legacyCampaignRunId": id * 10,
        "title": title,
        "tagline": format!("{title} tagline."),
        "status": "active",
        "reportbackInfo": {
            "noun": "jeans",
            "verb": "collected"
        },
        "keywords": keywords
    })
}
