//! Error types for people API operations.
//!
//! This module provides error handling for the client contract and the
//! test-account lifecycle layer, following Rust's error handling best
//! practices with detailed error information.

use crate::resource::{EmailAddress, PersonId};

/// Result alias used throughout the crate.
pub type PeopleResult<T> = Result<T, PeopleError>;

/// Result alias for value-object and shape validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Main error type for people API operations.
///
/// Covers the error conditions surfaced by the [`PeopleApi`](crate::api::PeopleApi)
/// contract and by the account lifecycle helpers built on top of it.
#[derive(Debug, thiserror::Error)]
pub enum PeopleError {
    /// A resource failed shape validation (for example, an account came back
    /// from a create call without an id).
    #[error("validation error: {0}")]
    InvalidPerson(#[from] ValidationError),

    /// A lookup by email address matched more than one account. An email
    /// address identifies at most one account, so this is a backend
    /// inconsistency and is never retried.
    #[error("email address '{email}' matches {count} accounts, expected at most one")]
    DuplicateEmail { email: EmailAddress, count: usize },

    /// The targeted account does not exist.
    #[error("person not found: {id}")]
    PersonNotFound { id: PersonId },

    /// An account with one of the requested email addresses already exists.
    #[error("email address '{email}' is already in use")]
    EmailInUse { email: EmailAddress },

    /// The named license is not part of the platform catalog.
    #[error("unknown license: '{name}'")]
    UnknownLicense { name: String },

    /// Errors from a user-provided API implementation (for example an HTTP
    /// transport sitting behind the [`PeopleApi`](crate::api::PeopleApi) trait).
    #[error("account API error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PeopleError {
    /// Wrap a foreign backend error.
    ///
    /// Intended for downstream [`PeopleApi`](crate::api::PeopleApi)
    /// implementations whose transports produce their own error types.
    pub fn provider(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Box::new(source))
    }
}

/// Shape validation errors for people resources.
///
/// These occur when resource data violates the structural rules the platform
/// guarantees, such as a created account arriving without an id.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The account id is missing or empty.
    #[error("person id is missing")]
    MissingId,

    /// An email address value was empty.
    #[error("email address must not be empty")]
    EmptyEmail,

    /// An email address value was malformed.
    #[error("invalid email address: '{value}'")]
    InvalidEmailAddress { value: String },

    /// An account requires at least one email address.
    #[error("a person requires at least one email address")]
    NoEmails,

    /// A license id value was empty.
    #[error("license id must not be empty")]
    EmptyLicenseId,
}

/// Aggregate error returned by registry teardown.
///
/// Teardown is best-effort: every tracked account gets a deletion attempt and
/// the individual failures are collected here rather than aborting on the
/// first one.
#[derive(Debug, thiserror::Error)]
#[error("teardown left {} test account(s) undeleted", .failures.len())]
pub struct TeardownError {
    /// One entry per account whose deletion failed.
    pub failures: Vec<TeardownFailure>,
}

/// A single failed deletion during registry teardown.
#[derive(Debug)]
pub struct TeardownFailure {
    /// The logical key the account was registered under.
    pub key: String,
    /// The id of the account that could not be deleted.
    pub person_id: PersonId,
    /// The underlying deletion error.
    pub source: PeopleError,
}
