//! Test-account lifecycle management.
//!
//! Ephemeral accounts are expensive to create and must not outlive the test
//! session that created them. This module provides the pieces that manage
//! that lifecycle deterministically:
//!
//! - [`TestPersonRegistry`] - session-scoped keyed cache of test accounts
//!   with explicit teardown
//! - [`with_temp_person`] - a single account scoped to one block, deleted on
//!   every exit path
//! - [`provision_person`] / [`find_by_email`] - the shared acquire-or-create
//!   path both of the above use
//! - [`EmailAddressProvider`] - source of fresh unique addresses
//! - [`TestAccountProfile`] - fixed attributes stamped onto provisioned
//!   accounts

pub mod email;
pub mod registry;
pub mod temp;

pub use email::{EmailAddressProvider, SequentialEmailAddresses};
pub use registry::TestPersonRegistry;
pub use temp::with_temp_person;

use crate::api::PeopleApi;
use crate::error::{PeopleError, PeopleResult};
use crate::resource::{
    CreatePerson, EmailAddress, LicensePool, PeopleQuery, Person, RequestContext,
};
use log::{debug, info};

/// Fixed attributes for provisioned test accounts.
///
/// Test accounts share a recognizable set of names so they are easy to spot
/// (and bulk-clean) in a shared workspace, and a default license so they can
/// actually use the platform. Configure with chained setters:
///
/// ```rust
/// use people_client::TestAccountProfile;
///
/// let profile = TestAccountProfile::new()
///     .display_name("integration test account")
///     .default_license("Messaging");
/// ```
#[derive(Debug, Clone)]
pub struct TestAccountProfile {
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    /// Catalog name of the license granted to new accounts.
    pub default_license: String,
}

impl TestAccountProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = value.into();
        self
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = value.into();
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = value.into();
        self
    }

    pub fn default_license(mut self, value: impl Into<String>) -> Self {
        self.default_license = value.into();
        self
    }
}

impl Default for TestAccountProfile {
    fn default() -> Self {
        Self {
            display_name: "people-client".to_string(),
            first_name: "people-client".to_string(),
            last_name: "people-client".to_string(),
            default_license: "Messaging".to_string(),
        }
    }
}

/// Look up the account owning an email address.
///
/// An address identifies at most one account. More than one match means the
/// backend is inconsistent and the lookup fails with
/// [`PeopleError::DuplicateEmail`] rather than picking one arbitrarily.
///
/// # Returns
/// `Some(person)` for exactly one match, `None` for no match.
pub async fn find_by_email<P: PeopleApi>(
    api: &P,
    email: &EmailAddress,
    context: &RequestContext,
) -> PeopleResult<Option<Person>> {
    let mut matches = api
        .list(&PeopleQuery::new().email(email.clone()), context)
        .await?;
    if matches.len() > 1 {
        return Err(PeopleError::DuplicateEmail {
            email: email.clone(),
            count: matches.len(),
        });
    }
    Ok(matches.pop())
}

/// Acquire a test account for a freshly generated email address.
///
/// Draws the next address from the provider and reuses the existing account
/// for it if one is already on the backend; otherwise creates one with the
/// profile's fixed names and default license. The returned account is shape
/// validated, so a backend handing back an id-less resource fails here
/// instead of poisoning later assertions.
pub async fn provision_person<P, E>(
    api: &P,
    emails: &E,
    licenses: &LicensePool,
    profile: &TestAccountProfile,
    context: &RequestContext,
) -> PeopleResult<Person>
where
    P: PeopleApi,
    E: EmailAddressProvider + ?Sized,
{
    let address = emails.next_address();
    if let Some(existing) = find_by_email(api, &address, context).await? {
        debug!(
            "reusing account {} for {} (request: {})",
            existing.id, address, context.request_id
        );
        return Ok(existing);
    }

    let license = licenses.resolve(&profile.default_license)?;
    let request = CreatePerson::new(vec![address.clone()])
        .display_name(profile.display_name.as_str())
        .first_name(profile.first_name.as_str())
        .last_name(profile.last_name.as_str())
        .license(license);
    let person = api.create(request, context).await?;
    person.validate()?;
    info!(
        "provisioned test account {} for {} (request: {})",
        person.id, address, context.request_id
    );
    Ok(person)
}
