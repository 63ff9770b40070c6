//! The typed contract of the remote people API.
//!
//! This module defines the trait a concrete account backend must implement.
//! The crate ships [`InMemoryPeopleApi`](crate::providers::InMemoryPeopleApi)
//! as a reference implementation; an HTTP transport against the real platform
//! would implement the same trait without the lifecycle layer noticing.
//!
//! # Key Types
//!
//! - [`PeopleApi`] - Main trait for account backends

use crate::error::PeopleResult;
use crate::resource::{CreatePerson, PeopleQuery, Person, PersonId, RequestContext, UpdatePerson};
use std::future::Future;

/// Account operations exposed by the messaging platform.
///
/// Implementations own transport, authentication and pagination; callers see
/// complete results and typed errors. All operations carry a
/// [`RequestContext`] for log correlation.
///
/// # Design Notes
///
/// - **`get` returns `Option`**: non-existence is an answer, not an error,
///   so teardown verification can ask "is it gone?" without error juggling.
/// - **`delete` of a missing account is an error**: deletion is always
///   targeted at an account the caller believes exists.
/// - **`list` returns the full result set**: transparent pagination is the
///   implementation's concern; the query's `max` only hints at page size.
pub trait PeopleApi: Send + Sync {
    /// Create an account owning the requested email addresses.
    ///
    /// # Returns
    /// The created account with its backend-assigned id and creation time.
    fn create(
        &self,
        request: CreatePerson,
        context: &RequestContext,
    ) -> impl Future<Output = PeopleResult<Person>> + Send;

    /// Fetch an account by id.
    ///
    /// # Returns
    /// `Some(person)` if the account exists, `None` if it does not.
    fn get(
        &self,
        id: &PersonId,
        context: &RequestContext,
    ) -> impl Future<Output = PeopleResult<Option<Person>>> + Send;

    /// List accounts matching the query filters.
    ///
    /// Results are consistently ordered across calls.
    fn list(
        &self,
        query: &PeopleQuery,
        context: &RequestContext,
    ) -> impl Future<Output = PeopleResult<Vec<Person>>> + Send;

    /// Update an account's mutable attributes.
    ///
    /// The id is immutable; `update` carries only attribute changes.
    ///
    /// # Returns
    /// The account state after the update.
    fn update(
        &self,
        id: &PersonId,
        update: UpdatePerson,
        context: &RequestContext,
    ) -> impl Future<Output = PeopleResult<Person>> + Send;

    /// Delete an account.
    ///
    /// Deleting an account that does not exist fails with
    /// [`PeopleError::PersonNotFound`](crate::error::PeopleError::PersonNotFound).
    fn delete(
        &self,
        id: &PersonId,
        context: &RequestContext,
    ) -> impl Future<Output = PeopleResult<()>> + Send;

    /// The account that owns the authenticated session.
    fn me(&self, context: &RequestContext) -> impl Future<Output = PeopleResult<Person>> + Send;
}
