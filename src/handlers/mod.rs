pub mod stats;
pub mod status;


pub use stats::{
    configure_stats_routes, logged_in_user_stats, organization_stats, owner_stats,
    repository_stats, team_stats,
};
pub use status::status;
