//! Contributor statistics retrieval and row flattening

use std::collections::HashMap;

use tracing::debug;

use crate::models::row::{format_day, UNKNOWN_LANGUAGE, UNKNOWN_MEMBER};
use crate::models::{ContributorStats, RepoSummary, StatsRow};
use crate::services::github::{HostingApi, RemoteError};
use crate::services::retry::{self, RetryConfig};

/// Fetch the contributor statistics for one repository.
///
/// An empty result means the upstream has not finished computing them
/// yet; callers treat it as zero entries, not a failure.
pub async fn fetch_contributor_stats(
    api: &dyn HostingApi,
    retry_config: &RetryConfig,
    repo: &RepoSummary,
) -> Result<Vec<ContributorStats>, RemoteError> {
    retry::invoke(retry_config, || {
        api.contributor_stats(&repo.owner.login, &repo.name)
    })
    .await
}

/// Expand one contributor entry into flat rows, one per week with
/// activity. All-zero weeks carry no information and are dropped.
pub fn flatten_entry(repo: &RepoSummary, entry: &ContributorStats, member: &str) -> Vec<StatsRow> {
    entry
        .weeks
        .iter()
        .filter(|week| week.has_activity())
        .map(|week| StatsRow {
            owner: repo.owner.login.clone(),
            repository: repo.name.clone(),
            created_on: repo.created_at.format("%d-%b-%Y").to_string(),
            language: repo
                .language
                .clone()
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
            size: repo.size,
            private: repo.private,
            member: member.to_string(),
            week_date: format_day(week.week_start),
            additions: week.additions,
            deletions: week.deletions,
            commits: week.commits,
        })
        .collect()
}

/// Request-scoped contributor display names.
///
/// With profile resolution off this is a pass-through on the login. With
/// it on, each unique login costs one profile lookup, memoized for the
/// rest of the request. Lookups are best-effort: a failed or nameless
/// profile falls back to the login rather than failing an in-flight
/// stream.
pub struct MemberNames {
    resolve_profiles: bool,
    cache: HashMap<String, String>,
}

impl MemberNames {
    pub fn new(resolve_profiles: bool) -> Self {
        Self {
            resolve_profiles,
            cache: HashMap::new(),
        }
    }

    /// The display name for an entry's author; `None` means the upstream
    /// could not attribute the commits to an account.
    pub async fn display_name(
        &mut self,
        api: &dyn HostingApi,
        retry_config: &RetryConfig,
        login: Option<&str>,
    ) -> String {
        let Some(login) = login else {
            return UNKNOWN_MEMBER.to_string();
        };
        if !self.resolve_profiles {
            return login.to_string();
        }
        if let Some(name) = self.cache.get(login) {
            return name.clone();
        }

        let name = match retry::invoke(retry_config, || api.get_user(login)).await {
            Ok(profile) => profile.name.unwrap_or_else(|| login.to_string()),
            Err(err) => {
                debug!("profile lookup for {login} failed, using login: {err}");
                login.to_string()
            }
        };
        self.cache.insert(login.to_string(), name.clone());
        name
    }
}
