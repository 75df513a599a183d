//! Contributor statistics payload types
//!
//! Mirrors the GitHub `stats/contributors` wire format, which keys the
//! weekly counters with single letters.

use serde::Deserialize;

/// Author block of a contributor stats entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContributorRef {
    pub login: String,
}

/// One contributor's weekly history for one repository. `author` is null
/// upstream for commits that could not be attributed to an account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContributorStats {
    #[serde(default)]
    pub author: Option<ContributorRef>,
    pub weeks: Vec<WeekStat>,
}

/// One week of activity. `w` is the epoch second of the week start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WeekStat {
    #[serde(rename = "w")]
    pub week_start: i64,
    #[serde(rename = "a")]
    pub additions: i64,
    #[serde(rename = "d")]
    pub deletions: i64,
    #[serde(rename = "c")]
    pub commits: i64,
}

impl WeekStat {
    /// Whether the week carries any activity at all. All-zero weeks are
    /// filler in the upstream payload and never reach the output.
    pub fn has_activity(&self) -> bool {
        self.additions + self.deletions + self.commits > 0
    }
}
