//! Scripted hosting-API doubles shared by the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::models::{
    ContributorRef, ContributorStats, RepoOwner, RepoSummary, TeamSummary, UserProfile, WeekStat,
};
use crate::services::github::{HostingApi, RemoteError};

pub fn repo(owner: &str, name: &str) -> RepoSummary {
    RepoSummary {
        name: name.to_string(),
        owner: RepoOwner {
            login: owner.to_string(),
        },
        created_at: Utc.with_ymd_and_hms(2019, 1, 26, 19, 1, 12).unwrap(),
        language: Some("Rust".to_string()),
        size: 1207,
        private: false,
    }
}

pub fn week(week_start: i64, additions: i64, deletions: i64, commits: i64) -> WeekStat {
    WeekStat {
        week_start,
        additions,
        deletions,
        commits,
    }
}

pub fn entry(login: Option<&str>, weeks: Vec<WeekStat>) -> ContributorStats {
    ContributorStats {
        author: login.map(|login| ContributorRef {
            login: login.to_string(),
        }),
        weeks,
    }
}

/// Hosting API double serving canned payloads and counting calls.
/// Endpoints with no scripted answer behave like the upstream: listings
/// and lookups answer 404, stats answer empty (still computing).
#[derive(Default)]
pub struct StubApi {
    pub own_repos: Vec<RepoSummary>,
    pub org_repos: HashMap<String, Vec<RepoSummary>>,
    pub user_repos: HashMap<String, Vec<RepoSummary>>,
    pub single_repos: HashMap<(String, String), RepoSummary>,
    pub teams: HashMap<String, Vec<TeamSummary>>,
    pub team_repos: HashMap<(String, String), Vec<RepoSummary>>,
    pub stats: HashMap<(String, String), Result<Vec<ContributorStats>, RemoteError>>,
    pub users: HashMap<String, UserProfile>,
    pub stats_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
}

impl StubApi {
    pub fn with_stats(
        mut self,
        owner: &str,
        name: &str,
        result: Result<Vec<ContributorStats>, RemoteError>,
    ) -> Self {
        self.stats
            .insert((owner.to_string(), name.to_string()), result);
        self
    }
}

#[async_trait]
impl HostingApi for StubApi {
    async fn list_own_repos(&self, _affiliation: &str) -> Result<Vec<RepoSummary>, RemoteError> {
        Ok(self.own_repos.clone())
    }

    async fn list_org_repos(&self, org: &str) -> Result<Vec<RepoSummary>, RemoteError> {
        self.org_repos
            .get(org)
            .cloned()
            .ok_or_else(|| RemoteError::not_found("Not Found"))
    }

    async fn list_user_repos(&self, owner: &str) -> Result<Vec<RepoSummary>, RemoteError> {
        self.user_repos
            .get(owner)
            .cloned()
            .ok_or_else(|| RemoteError::not_found("Not Found"))
    }

    async fn get_repo(&self, owner: &str, name: &str) -> Result<RepoSummary, RemoteError> {
        self.single_repos
            .get(&(owner.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| RemoteError::not_found("Not Found"))
    }

    async fn list_teams(&self, org: &str) -> Result<Vec<TeamSummary>, RemoteError> {
        self.teams
            .get(org)
            .cloned()
            .ok_or_else(|| RemoteError::not_found("Not Found"))
    }

    async fn list_team_repos(
        &self,
        org: &str,
        team: &str,
    ) -> Result<Vec<RepoSummary>, RemoteError> {
        self.team_repos
            .get(&(org.to_string(), team.to_string()))
            .cloned()
            .ok_or_else(|| RemoteError::not_found("Not Found"))
    }

    async fn contributor_stats(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<ContributorStats>, RemoteError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        match self.stats.get(&(owner.to_string(), name.to_string())) {
            Some(result) => result.clone(),
            None => Ok(Vec::new()),
        }
    }

    async fn get_user(&self, login: &str) -> Result<UserProfile, RemoteError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .get(login)
            .cloned()
            .ok_or_else(|| RemoteError::not_found("Not Found"))
    }
}
