//! Contributor statistics handlers
//!
//! Decode the request path into a selector, resolve the repository set,
//! and stream the flattened rows. Path parsing lives here; selector
//! semantics live in `services::resolver`.

use std::sync::Arc;

use actix_web::http::header::{ContentType, AUTHORIZATION};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::error::{AppError, TOKEN_GUIDANCE};
use crate::models::Selector;
use crate::services::github::{GithubClient, HostingApi};
use crate::services::resolver;
use crate::services::stream::{self, StreamOptions};
use crate::AppState;

/// Query parameters accepted by every stats route.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub token: Option<String>,
}

/// Register the stats routes.
///
/// Routes with more specific paths must come before less specific ones
/// to ensure proper matching in actix-web.
pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(logged_in_user_stats))
        .route("/users/{owner}", web::get().to(owner_stats))
        .route("/{organization}/team/{team}", web::get().to(team_stats))
        .route("/{owner}/{repository}", web::get().to(repository_stats))
        .route("/{organization}", web::get().to(organization_stats));
}

/// GET /
///
/// Stats for the repositories of the identity behind the token.
pub async fn logged_in_user_stats(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    respond(&req, &state, &query, Selector::LoggedInUser).await
}

/// GET /users/{owner}
///
/// Stats for the repositories owned by an arbitrary user login.
pub async fn owner_stats(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    respond(&req, &state, &query, Selector::Owner { name }).await
}

/// GET /{organization}
///
/// Stats for all repositories owned by an organization.
pub async fn organization_stats(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    respond(&req, &state, &query, Selector::Organization { name }).await
}

/// GET /{owner}/{repository}
///
/// Stats for a single repository.
pub async fn repository_stats(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    let (owner, name) = path.into_inner();
    respond(&req, &state, &query, Selector::OwnerRepo { owner, name }).await
}

/// GET /{organization}/team/{team}
///
/// Stats for the repositories of one team, matched by name or slug.
pub async fn team_stats(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    let (organization, team) = path.into_inner();
    respond(&req, &state, &query, Selector::Team { organization, team }).await
}

/// Resolve the repository set up front, then hand the rest of the
/// pipeline a committed 200 streaming body. Resolution failures happen
/// before the first byte and still surface as plain HTTP errors.
async fn respond(
    req: &HttpRequest,
    state: &web::Data<AppState>,
    query: &web::Query<StatsQuery>,
    selector: Selector,
) -> Result<HttpResponse, AppError> {
    let token = access_token(req, query)?;
    let client: Arc<dyn HostingApi> =
        Arc::new(GithubClient::new(token, state.config.github_api_url.clone()));

    let retry_config = state.config.retry();
    let repos = resolver::resolve_repositories(
        client.as_ref(),
        &selector,
        &retry_config,
        &state.config.user_affiliation,
    )
    .await?;

    let options = StreamOptions {
        retry: retry_config,
        resolve_member_names: state.config.resolve_member_names,
    };
    let rows = stream::stream_rows(client, repos, options);

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .streaming(rows))
}

/// Pull the access token from `Authorization: token <value>` (a `Bearer`
/// prefix is accepted equivalently) or the `token` query parameter.
pub fn access_token(
    req: &HttpRequest,
    query: &web::Query<StatsQuery>,
) -> Result<String, AppError> {
    if let Some(header) = req.headers().get(AUTHORIZATION) {
        let value = header
            .to_str()
            .map_err(|_| unauthorized("the Authorization header is not valid UTF-8"))?;
        let token = value
            .strip_prefix("token ")
            .or_else(|| value.strip_prefix("Bearer "))
            .unwrap_or(value)
            .trim();
        if token.is_empty() {
            return Err(unauthorized("the Authorization header carries no token"));
        }
        return Ok(token.to_string());
    }

    if let Some(token) = query.token.as_deref() {
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    Err(unauthorized("no access token provided"))
}

fn unauthorized(reason: &str) -> AppError {
    AppError::Unauthorized(format!("{reason}; {TOKEN_GUIDANCE}"))
}
