//! Session-scoped registry of named test accounts.

use crate::api::PeopleApi;
use crate::error::{PeopleResult, TeardownError, TeardownFailure};
use crate::lifecycle::email::EmailAddressProvider;
use crate::lifecycle::{TestAccountProfile, provision_person};
use crate::resource::{LicensePool, Person, RequestContext};
use log::{debug, warn};
use std::collections::HashMap;

/// Keyed cache of ephemeral test accounts.
///
/// Each logical key names one account for the lifetime of the registry. The
/// account is created lazily on first access and deleted when the registry is
/// disposed, so a whole test session can share a handful of accounts and
/// still leave the backend clean.
///
/// The registry is single-use: [`dispose`](Self::dispose) consumes it, and
/// there is no way to resurrect an entry afterwards. Dropping a registry
/// without disposing it leaks the accounts (deletion needs the async backend)
/// and logs a warning instead.
///
/// ## Examples
///
/// ```rust
/// use people_client::{
///     InMemoryPeopleApi, SequentialEmailAddresses, TestPersonRegistry,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = InMemoryPeopleApi::new();
/// let mut registry = TestPersonRegistry::new(
///     api.clone(),
///     SequentialEmailAddresses::new(),
///     api.license_pool(),
/// );
///
/// let first = registry.get_or_create("not_a_member").await?;
/// let again = registry.get_or_create("not_a_member").await?;
/// assert_eq!(first.id, again.id);
///
/// registry.dispose().await?;
/// # Ok(())
/// # }
/// ```
pub struct TestPersonRegistry<P, E>
where
    P: PeopleApi,
    E: EmailAddressProvider,
{
    api: P,
    emails: E,
    licenses: LicensePool,
    profile: TestAccountProfile,
    people: HashMap<String, Person>,
}

impl<P, E> TestPersonRegistry<P, E>
where
    P: PeopleApi,
    E: EmailAddressProvider,
{
    /// Create an empty registry with the default account profile.
    pub fn new(api: P, emails: E, licenses: LicensePool) -> Self {
        Self::with_profile(api, emails, licenses, TestAccountProfile::default())
    }

    /// Create an empty registry with a custom account profile.
    pub fn with_profile(
        api: P,
        emails: E,
        licenses: LicensePool,
        profile: TestAccountProfile,
    ) -> Self {
        Self {
            api,
            emails,
            licenses,
            profile,
            people: HashMap::new(),
        }
    }

    /// The account registered under `key`, provisioning it on first access.
    ///
    /// At most one account exists per key: repeated calls return the cached
    /// account without touching the backend again.
    pub async fn get_or_create(&mut self, key: &str) -> PeopleResult<Person> {
        if let Some(person) = self.people.get(key) {
            debug!("returning cached account {} for key '{}'", person.id, key);
            return Ok(person.clone());
        }
        let context = RequestContext::with_generated_id();
        debug!(
            "no account for key '{}' yet, provisioning (request: {})",
            key, context.request_id
        );
        let person = provision_person(
            &self.api,
            &self.emails,
            &self.licenses,
            &self.profile,
            &context,
        )
        .await?;
        self.people.insert(key.to_string(), person.clone());
        Ok(person)
    }

    /// Iterate over every account currently tracked by the registry.
    pub fn all(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// Number of tracked accounts.
    pub fn count(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Delete every tracked account from the backend.
    ///
    /// Teardown is best-effort: a failed deletion does not stop the
    /// remaining ones. Failures are collected into the returned
    /// [`TeardownError`], and the registry is emptied either way.
    pub async fn dispose(mut self) -> Result<(), TeardownError> {
        let people = std::mem::take(&mut self.people);
        let context = RequestContext::with_generated_id();
        let mut failures = Vec::new();
        for (key, person) in people {
            if let Err(source) = self.api.delete(&person.id, &context).await {
                warn!(
                    "failed to delete test account '{}' ({}): {} (request: {})",
                    key, person.id, source, context.request_id
                );
                failures.push(TeardownFailure {
                    key,
                    person_id: person.id,
                    source,
                });
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(TeardownError { failures })
        }
    }
}

impl<P, E> Drop for TestPersonRegistry<P, E>
where
    P: PeopleApi,
    E: EmailAddressProvider,
{
    fn drop(&mut self) {
        if !self.people.is_empty() {
            warn!(
                "test person registry dropped with {} undeleted account(s); \
                 call dispose() before the end of the session",
                self.people.len()
            );
        }
    }
}
