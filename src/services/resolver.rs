//! Repository resolution
//!
//! Turns a request selector into the ordered repository set it names.
//! Path parsing stays in the handlers; every variant's semantics live in
//! the single `match` below, and every remote call goes through the
//! retrying invoker.

use crate::models::{RepoSummary, Selector};
use crate::services::github::{HostingApi, RemoteError};
use crate::services::retry::{self, RetryConfig};

/// Resolve `selector` into repository descriptors, in upstream order.
///
/// `affiliation` applies only to the logged-in-user selector and names
/// the membership semantics the deployment wants (owner, collaborator,
/// organization member, or any comma-joined subset).
pub async fn resolve_repositories(
    api: &dyn HostingApi,
    selector: &Selector,
    retry_config: &RetryConfig,
    affiliation: &str,
) -> Result<Vec<RepoSummary>, RemoteError> {
    match selector {
        Selector::LoggedInUser => {
            retry::invoke(retry_config, || api.list_own_repos(affiliation)).await
        }
        Selector::Organization { name } => {
            retry::invoke(retry_config, || api.list_org_repos(name)).await
        }
        Selector::Owner { name } => {
            retry::invoke(retry_config, || api.list_user_repos(name)).await
        }
        Selector::OwnerRepo { owner, name } => {
            let repo = retry::invoke(retry_config, || api.get_repo(owner, name)).await?;
            Ok(vec![repo])
        }
        Selector::Team { organization, team } => {
            let teams = retry::invoke(retry_config, || api.list_teams(organization)).await?;
            let matched = teams
                .iter()
                .find(|t| {
                    t.name.eq_ignore_ascii_case(team) || t.slug.eq_ignore_ascii_case(team)
                })
                .ok_or_else(|| {
                    RemoteError::not_found(format!(
                        "team {team} not found in organization {organization}"
                    ))
                })?;
            retry::invoke(retry_config, || {
                api.list_team_repos(organization, &matched.slug)
            })
            .await
        }
    }
}
