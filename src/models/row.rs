//! Flattened output records written to the response stream

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Language column value when the upstream reports none.
pub const UNKNOWN_LANGUAGE: &str = "N/A";

/// Member column value when commits have no attributable login.
pub const UNKNOWN_MEMBER: &str = "Unknown Member";

/// One week of one contributor's activity in one repository, flattened to
/// the column names the downstream consumer binds to. The serialized
/// names are a wire contract and must be reproduced exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsRow {
    #[serde(rename = "Repository Owner")]
    pub owner: String,
    #[serde(rename = "Repository Name")]
    pub repository: String,
    #[serde(rename = "Repository Created On")]
    pub created_on: String,
    #[serde(rename = "Repository Language")]
    pub language: String,
    #[serde(rename = "Repository Size")]
    pub size: u64,
    #[serde(rename = "Repository Private")]
    pub private: bool,
    #[serde(rename = "Team Member")]
    pub member: String,
    #[serde(rename = "Week Date")]
    pub week_date: String,
    #[serde(rename = "Code Additions")]
    pub additions: i64,
    #[serde(rename = "Code Deletions")]
    pub deletions: i64,
    #[serde(rename = "Code Commits")]
    pub commits: i64,
}

/// Terminal record appended in-band when a failure occurs after the
/// response stream has begun. The 200 status is committed by then, so the
/// error travels inside the array instead of reaching the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamErrorMarker {
    pub message: String,
    pub code: u16,
}

/// Format an epoch second as `DD-MMM-YYYY`, the date shape the consumer
/// expects in every date column.
pub fn format_day(epoch_seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch_seconds, 0)
        .unwrap_or_default()
        .format("%d-%b-%Y")
        .to_string()
}
