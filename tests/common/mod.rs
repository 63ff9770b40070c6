//! Common test utilities for people-client integration tests.
//!
//! Provides a bundled backend-plus-lifecycle fixture and the validity
//! helpers the tests assert with.

use people_client::{
    InMemoryPeopleApi, LicensePool, Person, SequentialEmailAddresses, TestAccountProfile,
    TestPersonRegistry,
};

/// Initialize test logging once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fresh in-memory backend plus the collaborators the lifecycle layer needs.
pub struct TestBackend {
    pub api: InMemoryPeopleApi,
    pub licenses: LicensePool,
    pub profile: TestAccountProfile,
}

impl TestBackend {
    pub fn new() -> Self {
        init_logging();
        let api = InMemoryPeopleApi::new();
        let licenses = api.license_pool();
        Self {
            api,
            licenses,
            profile: TestAccountProfile::default(),
        }
    }

    /// A registry over this backend with a fresh email sequence.
    pub fn registry(&self) -> TestPersonRegistry<InMemoryPeopleApi, SequentialEmailAddresses> {
        TestPersonRegistry::new(
            self.api.clone(),
            SequentialEmailAddresses::new(),
            self.licenses.clone(),
        )
    }
}

/// A person is valid when it satisfies the platform's structural rules.
pub fn is_valid_person(person: &Person) -> bool {
    person.validate().is_ok()
}

/// Every person in the iterable is valid.
pub fn are_valid_people<'a>(people: impl IntoIterator<Item = &'a Person>) -> bool {
    people.into_iter().all(is_valid_person)
}
