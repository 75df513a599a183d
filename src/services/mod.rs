pub mod github;
pub mod resolver;
pub mod retry;
pub mod stats;
pub mod stream;

#[cfg(test)]
pub mod testing;

pub use github::{GithubClient, HostingApi, RemoteError, DEFAULT_API_URL};
pub use resolver::resolve_repositories;
pub use retry::RetryConfig;
pub use stats::{fetch_contributor_stats, flatten_entry, MemberNames};
pub use stream::{stream_rows, StreamOptions};
