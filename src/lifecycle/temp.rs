//! Single-use ephemeral accounts with guaranteed release.

use crate::api::PeopleApi;
use crate::error::PeopleResult;
use crate::lifecycle::email::EmailAddressProvider;
use crate::lifecycle::{TestAccountProfile, provision_person};
use crate::resource::{LicensePool, Person, RequestContext};
use futures::FutureExt;
use log::warn;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// Run `body` with an account that exists only for the duration of the call.
///
/// The account is acquired through the same lookup-or-create path as the
/// registry and deleted on every exit path: when `body` succeeds, when it
/// returns an error, and when it panics (the panic is resumed after
/// cleanup). Use this for tests that must observe a pristine account rather
/// than one shared across the session.
///
/// A failed cleanup surfaces as the call's error on the success path; after
/// a body error or panic the original failure wins and the cleanup error is
/// only logged.
///
/// ## Examples
///
/// ```rust
/// use people_client::{
///     InMemoryPeopleApi, SequentialEmailAddresses, TestAccountProfile, with_temp_person,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = InMemoryPeopleApi::new();
/// let emails = SequentialEmailAddresses::new();
/// let licenses = api.license_pool();
/// let profile = TestAccountProfile::default();
///
/// let id = with_temp_person(&api, &emails, &licenses, &profile, |person| async move {
///     Ok(person.id)
/// })
/// .await?;
///
/// // The account is gone once the block returns.
/// # let context = people_client::RequestContext::with_generated_id();
/// # use people_client::PeopleApi;
/// assert!(api.get(&id, &context).await?.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn with_temp_person<P, E, F, Fut, T>(
    api: &P,
    emails: &E,
    licenses: &LicensePool,
    profile: &TestAccountProfile,
    body: F,
) -> PeopleResult<T>
where
    P: PeopleApi,
    E: EmailAddressProvider,
    F: FnOnce(Person) -> Fut,
    Fut: Future<Output = PeopleResult<T>>,
{
    let context = RequestContext::with_generated_id();
    let person = provision_person(api, emails, licenses, profile, &context).await?;
    let id = person.id.clone();

    let outcome = AssertUnwindSafe(body(person)).catch_unwind().await;
    let cleanup = api.delete(&id, &context).await;

    match outcome {
        Err(panic) => {
            if let Err(err) = cleanup {
                warn!(
                    "failed to delete temporary account {} after panic: {} (request: {})",
                    id, err, context.request_id
                );
            }
            std::panic::resume_unwind(panic)
        }
        Ok(Ok(value)) => {
            cleanup?;
            Ok(value)
        }
        Ok(Err(body_err)) => {
            if let Err(cleanup_err) = cleanup {
                warn!(
                    "failed to delete temporary account {}: {} (request: {})",
                    id, cleanup_err, context.request_id
                );
            }
            Err(body_err)
        }
    }
}
