// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Campaign record normalization.
//!
//! The content service returns campaigns in one of two shapes: a legacy flat
//! record carrying `legacyCampaignId` / `legacyCampaignRunId`, or a nested
//! "current run" record where the run id lives under
//! `campaign_runs.current.<language_code>`. Both normalize into the one
//! [`Campaign`] shape the rest of the system consumes.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use textline_core::{Campaign, CampaignStatus, TextlineError};

const DEFAULT_RB_NOUN: &str = "things";
const DEFAULT_RB_VERB: &str = "done";

/// A numeric id that the service may serialize as a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Num(i64),
    Str(String),
}

impl RawId {
    fn as_i64(&self) -> Option<i64> {
        match self {
            RawId::Num(n) => Some(*n),
            RawId::Str(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReportbackInfo {
    #[serde(default)]
    noun: Option<String>,
    #[serde(default)]
    verb: Option<String>,
    #[serde(default)]
    confirmation_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawEndDate {
    date: String,
}

/// Legacy flat schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyRecord {
    legacy_campaign_id: RawId,
    #[serde(default)]
    legacy_campaign_run_id: Option<RawId>,
    title: String,
    #[serde(default)]
    tagline: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    end_date: Option<RawEndDate>,
    #[serde(default)]
    reportback_info: Option<RawReportbackInfo>,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawLanguage {
    language_code: String,
}

#[derive(Debug, Deserialize)]
struct RawRunRef {
    id: RawId,
}

#[derive(Debug, Deserialize)]
struct RawCampaignRuns {
    current: std::collections::HashMap<String, RawRunRef>,
}

/// Nested current-run schema.
#[derive(Debug, Deserialize)]
struct CurrentRunRecord {
    id: RawId,
    title: String,
    #[serde(default)]
    tagline: Option<String>,
    #[serde(default)]
    status: Option<String>,
    language: RawLanguage,
    campaign_runs: RawCampaignRuns,
    #[serde(default, rename = "reportbackInfo")]
    reportback_info: Option<RawReportbackInfo>,
    #[serde(default)]
    keywords: Vec<String>,
}

/// Normalize a raw campaign record of either schema into a [`Campaign`].
pub fn normalize(record: &serde_json::Value) -> Result<Campaign, TextlineError> {
    // The current-run schema is the only one carrying `campaign_runs`.
    if record.get("campaign_runs").is_some() {
        let raw: CurrentRunRecord =
            serde_json::from_value(record.clone()).map_err(|e| TextlineError::Campaign {
                message: "unparseable current-run campaign record".to_string(),
                source: Some(Box::new(e)),
            })?;
        return normalize_current_run(raw);
    }

    let raw: LegacyRecord =
        serde_json::from_value(record.clone()).map_err(|e| TextlineError::Campaign {
            message: "unparseable legacy campaign record".to_string(),
            source: Some(Box::new(e)),
        })?;
    normalize_legacy(raw)
}

fn normalize_legacy(raw: LegacyRecord) -> Result<Campaign, TextlineError> {
    let id = raw.legacy_campaign_id.as_i64().ok_or_else(|| {
        TextlineError::Campaign {
            message: "legacy record has non-numeric legacyCampaignId".to_string(),
            source: None,
        }
    })?;
    let status = derive_status(raw.status.as_deref(), raw.end_date.as_ref());
    let rb = raw.reportback_info.unwrap_or_default();

    Ok(Campaign {
        id,
        title: raw.title,
        tagline: raw.tagline.unwrap_or_default(),
        status,
        rb_noun: rb.noun.unwrap_or_else(|| DEFAULT_RB_NOUN.to_string()),
        rb_verb: rb.verb.unwrap_or_else(|| DEFAULT_RB_VERB.to_string()),
        msg_rb_confirmation: rb.confirmation_message,
        keywords: lowercase_keywords(raw.keywords),
        current_run_id: raw.legacy_campaign_run_id.and_then(|r| r.as_i64()),
    })
}

fn normalize_current_run(raw: CurrentRunRecord) -> Result<Campaign, TextlineError> {
    let id = raw.id.as_i64().ok_or_else(|| TextlineError::Campaign {
        message: "current-run record has non-numeric id".to_string(),
        source: None,
    })?;
    // The run id is keyed by the record's own language code.
    let current_run_id = raw
        .campaign_runs
        .current
        .get(&raw.language.language_code)
        .and_then(|run| run.id.as_i64());
    let status = derive_status(raw.status.as_deref(), None);
    let rb = raw.reportback_info.unwrap_or_default();

    Ok(Campaign {
        id,
        title: raw.title,
        tagline: raw.tagline.unwrap_or_default(),
        status,
        rb_noun: rb.noun.unwrap_or_else(|| DEFAULT_RB_NOUN.to_string()),
        rb_verb: rb.verb.unwrap_or_else(|| DEFAULT_RB_VERB.to_string()),
        msg_rb_confirmation: rb.confirmation_message,
        keywords: lowercase_keywords(raw.keywords),
        current_run_id,
    })
}

/// An explicit `closed` status wins; with no status, a past end date closes
/// the campaign; otherwise it is active.
fn derive_status(status: Option<&str>, end_date: Option<&RawEndDate>) -> CampaignStatus {
    if let Some(status) = status {
        return if status.eq_ignore_ascii_case("closed") {
            CampaignStatus::Closed
        } else {
            CampaignStatus::Active
        };
    }

    if let Some(end) = end_date
        && let Some(parsed) = parse_end_date(&end.date)
        && parsed < Utc::now()
    {
        return CampaignStatus::Closed;
    }

    CampaignStatus::Active
}

/// End dates arrive either as RFC 3339 or as `YYYY-MM-DD HH:MM:SS`.
fn parse_end_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

fn lowercase_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
