//! Repository model and related GitHub payload types

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Owner block of a repository payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// Repository descriptor, sourced verbatim from the GitHub API and
/// read-only within the pipeline
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub owner: RepoOwner,
    pub created_at: DateTime<Utc>,
    /// Primary language; null upstream for repositories without code
    #[serde(default)]
    pub language: Option<String>,
    /// Size in kilobytes
    pub size: u64,
    pub private: bool,
}

/// Team entry from the organization teams listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamSummary {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

/// User profile, fetched when display-name enrichment is enabled
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_summary_deserializes_github_payload() {
        let payload = serde_json::json!({
            "id": 1296269,
            "name": "atlas",
            "full_name": "acme/atlas",
            "owner": { "login": "acme", "id": 1 },
            "private": false,
            "created_at": "2019-01-26T19:01:12Z",
            "language": "Rust",
            "size": 1207,
            "forks_count": 9
        });

        let repo: RepoSummary = serde_json::from_value(payload).unwrap();
        assert_eq!(repo.name, "atlas");
        assert_eq!(repo.owner.login, "acme");
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.size, 1207);
        assert!(!repo.private);
    }

    #[test]
    fn repo_summary_accepts_null_language() {
        let payload = serde_json::json!({
            "name": "empty",
            "owner": { "login": "acme" },
            "private": true,
            "created_at": "2021-03-04T00:00:00Z",
            "language": null,
            "size": 0
        });

        let repo: RepoSummary = serde_json::from_value(payload).unwrap();
        assert_eq!(repo.language, None);
        assert!(repo.private);
    }

    #[test]
    fn team_summary_deserializes_github_payload() {
        let payload = serde_json::json!({
            "id": 42,
            "name": "Core",
            "slug": "core-team",
            "permission": "pull"
        });

        let team: TeamSummary = serde_json::from_value(payload).unwrap();
        assert_eq!(team.name, "Core");
        assert_eq!(team.slug, "core-team");
    }

    #[test]
    fn user_profile_name_defaults_to_none() {
        let payload = serde_json::json!({ "login": "octocat" });
        let profile: UserProfile = serde_json::from_value(payload).unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.name, None);
    }
}
