//! Request selector identifying which repository set to report on

/// The caller's intent, decoded from the request path by the routing
/// layer. Built once per request and handed to the resolver, which owns
/// the semantics of each variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Repositories of the identity behind the access token
    LoggedInUser,
    /// All repositories owned by an organization
    Organization { name: String },
    /// All repositories owned by an arbitrary user login
    Owner { name: String },
    /// A single repository
    OwnerRepo { owner: String, name: String },
    /// Repositories of one team within an organization, matched
    /// case-insensitively by display name or slug
    Team { organization: String, team: String },
}
