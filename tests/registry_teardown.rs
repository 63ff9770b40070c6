//! Teardown and guaranteed-release behavior of the lifecycle layer.

mod common;

use common::TestBackend;
use futures::FutureExt;
use people_client::{PeopleApi, PeopleError, PersonId, RequestContext, with_temp_person};
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

fn context() -> RequestContext {
    RequestContext::with_generated_id()
}

#[tokio::test]
async fn dispose_deletes_every_tracked_account() {
    let backend = TestBackend::new();
    let mut registry = backend.registry();
    let mut ids = Vec::new();
    for key in ["member", "not_a_member", "moderator"] {
        ids.push(registry.get_or_create(key).await.unwrap().id);
    }

    registry.dispose().await.unwrap();

    let context = context();
    for id in ids {
        assert!(
            backend.api.get(&id, &context).await.unwrap().is_none(),
            "account {id} survived teardown"
        );
    }
}

#[tokio::test]
async fn dispose_of_an_empty_registry_is_a_no_op() {
    let backend = TestBackend::new();
    let registry = backend.registry();
    assert!(registry.is_empty());
    registry.dispose().await.unwrap();
}

#[tokio::test]
async fn dispose_is_best_effort_on_partial_failure() {
    let backend = TestBackend::new();
    let mut registry = backend.registry();
    let doomed = registry.get_or_create("deleted_out_of_band").await.unwrap();
    let survivor_a = registry.get_or_create("member").await.unwrap();
    let survivor_b = registry.get_or_create("not_a_member").await.unwrap();

    let context = context();
    // Delete one account behind the registry's back so its teardown fails.
    backend.api.delete(&doomed.id, &context).await.unwrap();

    let err = registry.dispose().await.unwrap_err();
    assert_eq!(err.failures.len(), 1);
    assert_eq!(err.failures[0].person_id, doomed.id);
    assert_eq!(err.failures[0].key, "deleted_out_of_band");
    assert!(matches!(
        err.failures[0].source,
        PeopleError::PersonNotFound { .. }
    ));

    // The failure did not stop the remaining deletions.
    for id in [survivor_a.id, survivor_b.id] {
        assert!(backend.api.get(&id, &context).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn dropping_without_dispose_leaks_the_accounts() {
    let backend = TestBackend::new();
    let mut registry = backend.registry();
    let person = registry.get_or_create("not_a_member").await.unwrap();

    drop(registry);

    // Drop cannot reach the async backend; the account stays behind.
    let leaked = backend.api.get(&person.id, &context()).await.unwrap();
    assert!(leaked.is_some());
}

#[tokio::test]
async fn temp_person_is_released_on_success() {
    let backend = TestBackend::new();
    let emails = people_client::SequentialEmailAddresses::new();

    let id = with_temp_person(
        &backend.api,
        &emails,
        &backend.licenses,
        &backend.profile,
        |person| async move {
            assert!(person.validate().is_ok());
            Ok(person.id)
        },
    )
    .await
    .unwrap();

    assert!(backend.api.get(&id, &context()).await.unwrap().is_none());
}

#[tokio::test]
async fn temp_person_is_released_when_the_body_fails() {
    let backend = TestBackend::new();
    let emails = people_client::SequentialEmailAddresses::new();
    let seen: Arc<Mutex<Option<PersonId>>> = Arc::new(Mutex::new(None));

    let captured = Arc::clone(&seen);
    let result: Result<(), _> = with_temp_person(
        &backend.api,
        &emails,
        &backend.licenses,
        &backend.profile,
        |person| async move {
            *captured.lock().unwrap() = Some(person.id.clone());
            Err(PeopleError::UnknownLicense {
                name: "simulated failure".to_string(),
            })
        },
    )
    .await;

    assert!(matches!(result, Err(PeopleError::UnknownLicense { .. })));
    let id = seen.lock().unwrap().clone().expect("body ran");
    assert!(backend.api.get(&id, &context()).await.unwrap().is_none());
}

#[tokio::test]
async fn temp_person_is_released_when_the_body_panics() {
    let backend = TestBackend::new();
    let emails = people_client::SequentialEmailAddresses::new();
    let seen: Arc<Mutex<Option<PersonId>>> = Arc::new(Mutex::new(None));

    let captured = Arc::clone(&seen);
    let outcome = AssertUnwindSafe(with_temp_person(
        &backend.api,
        &emails,
        &backend.licenses,
        &backend.profile,
        |person| async move {
            *captured.lock().unwrap() = Some(person.id.clone());
            // A failing assertion, exactly as a test body would produce one.
            assert!(person.emails.is_empty(), "temp account owns an address");
            Ok(())
        },
    ))
    .catch_unwind()
    .await;

    assert!(outcome.is_err(), "the body's panic is resumed");
    let id = seen.lock().unwrap().clone().expect("body ran");
    assert!(backend.api.get(&id, &context()).await.unwrap().is_none());
}
