//! GitHub API client
//!
//! Wraps the REST endpoints the pipeline needs behind one call-per-operation
//! methods, normalizing every response into a payload or a classified
//! [`RemoteError`]. Raw routes with explicit status handling are required
//! here: the contributor-stats endpoint answers 202/204 with an empty body
//! while GitHub computes the data asynchronously, which typed JSON clients
//! reject.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::models::{ContributorStats, RepoSummary, TeamSummary, UserProfile};

/// Default API root; overridable for GitHub Enterprise deployments.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Classified outcome of one GitHub call.
///
/// `Status { 401 | 404 }` is terminal: the upstream will keep rejecting
/// the same input, so the retrying invoker must not spend attempts on it.
/// Every other variant is treated as transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Upstream answered with a non-success HTTP status
    #[error("{message}")]
    Status { code: u16, message: String },

    /// The request never produced an HTTP response
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected payload shape
    #[error("invalid response payload: {0}")]
    Decode(String),
}

impl RemoteError {
    fn from_status(status: StatusCode) -> Self {
        Self::Status {
            code: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        }
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::Status {
            code: 404,
            message: message.into(),
        }
    }

    /// HTTP-style code for this failure. Transport and decode failures
    /// have no upstream status and report as 500.
    pub fn code(&self) -> u16 {
        match self {
            Self::Status { code, .. } => *code,
            Self::Transport(_) | Self::Decode(_) => 500,
        }
    }

    /// Terminal failures are caller-input errors: unauthorized tokens and
    /// unknown resources. Retrying them wastes quota and time.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Status { code: 401 | 404, .. })
    }
}

/// Operations the pipeline needs from the hosting platform. Implemented
/// by [`GithubClient`]; tests substitute scripted stubs.
#[async_trait]
pub trait HostingApi: Send + Sync {
    /// Repositories of the authenticated identity, filtered by affiliation.
    async fn list_own_repos(&self, affiliation: &str) -> Result<Vec<RepoSummary>, RemoteError>;

    /// Repositories owned by an organization.
    async fn list_org_repos(&self, org: &str) -> Result<Vec<RepoSummary>, RemoteError>;

    /// Repositories owned by an arbitrary user login.
    async fn list_user_repos(&self, owner: &str) -> Result<Vec<RepoSummary>, RemoteError>;

    /// A single repository's details.
    async fn get_repo(&self, owner: &str, name: &str) -> Result<RepoSummary, RemoteError>;

    /// Teams of an organization.
    async fn list_teams(&self, org: &str) -> Result<Vec<TeamSummary>, RemoteError>;

    /// Repositories of one team, addressed by slug.
    async fn list_team_repos(&self, org: &str, team: &str)
        -> Result<Vec<RepoSummary>, RemoteError>;

    /// Per-contributor weekly statistics for one repository. Empty while
    /// the upstream is still computing them.
    async fn contributor_stats(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<ContributorStats>, RemoteError>;

    /// A user profile, for display-name enrichment.
    async fn get_user(&self, login: &str) -> Result<UserProfile, RemoteError>;
}

/// Authenticated GitHub REST client. One underlying `GET` per operation;
/// listings lean on `per_page=100` upstream enumeration rather than
/// explicit pagination.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    token: String,
    api_url: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            api_url: api_url.into(),
        }
    }

    /// GET a route and deserialize the payload; 200 is the only success.
    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T, RemoteError> {
        let (status, response) = self.get(route).await?;
        if status != StatusCode::OK {
            return Err(RemoteError::from_status(status));
        }
        response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    /// GET a collection route. 202 and 204 mean the upstream is still
    /// computing the data asynchronously and yield an empty collection.
    async fn get_collection<T: DeserializeOwned>(
        &self,
        route: &str,
    ) -> Result<Vec<T>, RemoteError> {
        let (status, response) = self.get(route).await?;
        match status {
            StatusCode::OK => response
                .json()
                .await
                .map_err(|e| RemoteError::Decode(e.to_string())),
            StatusCode::ACCEPTED | StatusCode::NO_CONTENT => Ok(Vec::new()),
            other => Err(RemoteError::from_status(other)),
        }
    }

    async fn get(&self, route: &str) -> Result<(StatusCode, reqwest::Response), RemoteError> {
        let url = format!("{}{}", self.api_url, route);
        let response = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "gitlink")
            .header("Authorization", format!("token {}", self.token))
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        info!(
            "GET {} {} {}",
            status.as_u16(),
            response.url(),
            status.canonical_reason().unwrap_or("")
        );
        Ok((status, response))
    }
}

#[async_trait]
impl HostingApi for GithubClient {
    async fn list_own_repos(&self, affiliation: &str) -> Result<Vec<RepoSummary>, RemoteError> {
        self.get_collection(&format!("/user/repos?affiliation={affiliation}&per_page=100"))
            .await
    }

    async fn list_org_repos(&self, org: &str) -> Result<Vec<RepoSummary>, RemoteError> {
        self.get_collection(&format!("/orgs/{org}/repos?per_page=100"))
            .await
    }

    async fn list_user_repos(&self, owner: &str) -> Result<Vec<RepoSummary>, RemoteError> {
        self.get_collection(&format!("/users/{owner}/repos?per_page=100"))
            .await
    }

    async fn get_repo(&self, owner: &str, name: &str) -> Result<RepoSummary, RemoteError> {
        self.get_json(&format!("/repos/{owner}/{name}")).await
    }

    async fn list_teams(&self, org: &str) -> Result<Vec<TeamSummary>, RemoteError> {
        self.get_collection(&format!("/orgs/{org}/teams?per_page=100"))
            .await
    }

    async fn list_team_repos(
        &self,
        org: &str,
        team: &str,
    ) -> Result<Vec<RepoSummary>, RemoteError> {
        self.get_collection(&format!("/orgs/{org}/teams/{team}/repos?per_page=100"))
            .await
    }

    async fn contributor_stats(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<ContributorStats>, RemoteError> {
        self.get_collection(&format!("/repos/{owner}/{name}/stats/contributors"))
            .await
    }

    async fn get_user(&self, login: &str) -> Result<UserProfile, RemoteError> {
        self.get_json(&format!("/users/{login}")).await
    }
}
