//! GitLink - GitHub contributor statistics connector
//!
//! Adapts the nested GitHub REST API into a flat, incrementally streamed
//! JSON array of per-contributor weekly statistics rows for BI consumers.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::{Config, ConfigError};
pub use error::{AppError, TOKEN_GUIDANCE};

// Re-export specific items to avoid ambiguous glob re-exports
pub use models::{
    ContributorRef, ContributorStats, RepoOwner, RepoSummary, Selector, StatsRow,
    StreamErrorMarker, TeamSummary, UserProfile, WeekStat,
};

pub use services::{
    GithubClient, HostingApi, RemoteError, RetryConfig, StreamOptions, DEFAULT_API_URL,
};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
}
