//! Shared error classification for the domain services.

use thiserror::Error;

/// The transport-facing class of a service failure.
///
/// Transport layers map each class to a distinct status code, so every
/// service error must resolve to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself was malformed.
    Validation,
    /// The request referenced something that does not exist.
    NotFound,
    /// The cart is not serviceable at the requested location.
    Infeasible,
    /// A storage or collaborator fault; the caller may retry.
    Internal,
}

/// A catalog lookup failure.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The underlying query failed.
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
