//! In-memory implementation of the people API contract.
//!
//! This module provides a thread-safe in-memory account backend using HashMap
//! and RwLock. It is designed for testing and development: the lifecycle
//! layer is exercised against it, and downstream consumers can use it as a
//! drop-in double for a real transport.
//!
//! # Features
//!
//! * Thread-safe concurrent access with async RwLock
//! * Email uniqueness enforced at creation time
//! * Consistent ordering for list operations
//! * Operation counters for asserting backend traffic in tests
//!
//! # Example Usage
//!
//! ```rust
//! use people_client::{CreatePerson, EmailAddress, InMemoryPeopleApi, PeopleApi, RequestContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = InMemoryPeopleApi::new();
//! let context = RequestContext::with_generated_id();
//!
//! let person = api
//!     .create(
//!         CreatePerson::new(vec![EmailAddress::new("jo@example.com".to_string())?])
//!             .display_name("Jo"),
//!         &context,
//!     )
//!     .await?;
//!
//! assert!(api.get(&person.id, &context).await?.is_some());
//! # Ok(())
//! # }
//! ```

use crate::api::PeopleApi;
use crate::error::{PeopleError, PeopleResult, ValidationError};
use crate::resource::{
    CreatePerson, EmailAddress, License, LicenseId, LicensePool, PeopleQuery, Person, PersonId,
    RequestContext, UpdatePerson,
};
use chrono::Utc;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory account backend.
///
/// The handle is cheaply cloneable; clones share the same underlying state,
/// so a test can hold one handle for assertions while the lifecycle layer
/// owns another.
#[derive(Debug, Clone)]
pub struct InMemoryPeopleApi {
    people: Arc<RwLock<HashMap<PersonId, Person>>>,
    counters: Arc<RwLock<OpCounters>>,
    catalog: Arc<Vec<License>>,
    owner: PersonId,
}

#[derive(Debug, Default, Clone, Copy)]
struct OpCounters {
    create_calls: u64,
    update_calls: u64,
    delete_calls: u64,
    list_calls: u64,
    page_fetches: u64,
}

/// Statistics about the in-memory backend state.
///
/// Used by tests to assert how much traffic an operation actually produced,
/// e.g. that a cached registry lookup issued no second create call.
#[derive(Debug, Clone, Copy)]
pub struct InMemoryStats {
    /// Number of accounts currently stored, including the owner account.
    pub total_people: usize,
    pub create_calls: u64,
    pub update_calls: u64,
    pub delete_calls: u64,
    pub list_calls: u64,
    /// Number of page fetches performed by list operations. A list call with
    /// a `max` page-size hint counts one fetch per page of results.
    pub page_fetches: u64,
}

impl InMemoryPeopleApi {
    /// Create a backend with the default license catalog and owner account.
    pub fn new() -> Self {
        let catalog = vec![License::new(
            LicenseId::new_unchecked("lic-messaging".to_string()),
            "Messaging",
        )];
        let owner = Person {
            id: PersonId::generate(),
            emails: vec![EmailAddress::new_unchecked(
                "workspace-owner@example.com".to_string(),
            )],
            display_name: "Workspace Owner".to_string(),
            first_name: "Workspace".to_string(),
            last_name: "Owner".to_string(),
            licenses: catalog.iter().map(|l| l.id.clone()).collect(),
            created: Utc::now(),
        };
        Self::with_state(catalog, owner)
    }

    /// Start building a backend with a custom catalog or owner.
    pub fn builder() -> InMemoryPeopleApiBuilder {
        InMemoryPeopleApiBuilder::default()
    }

    fn with_state(catalog: Vec<License>, owner: Person) -> Self {
        let owner_id = owner.id.clone();
        let mut people = HashMap::new();
        people.insert(owner_id.clone(), owner);
        Self {
            people: Arc::new(RwLock::new(people)),
            counters: Arc::new(RwLock::new(OpCounters::default())),
            catalog: Arc::new(catalog),
            owner: owner_id,
        }
    }

    /// The platform license catalog as a name-to-id pool.
    pub fn license_pool(&self) -> LicensePool {
        LicensePool::from_catalog(self.catalog.iter().cloned())
    }

    /// Current backend statistics.
    pub async fn stats(&self) -> InMemoryStats {
        let counters = *self.counters.read().await;
        InMemoryStats {
            total_people: self.people.read().await.len(),
            create_calls: counters.create_calls,
            update_calls: counters.update_calls,
            delete_calls: counters.delete_calls,
            list_calls: counters.list_calls,
            page_fetches: counters.page_fetches,
        }
    }

    /// Insert an account directly, bypassing uniqueness checks and counters.
    ///
    /// This exists to seed backend state for tests, including states a
    /// healthy backend would refuse to produce, such as two accounts sharing
    /// an email address.
    pub async fn insert_unchecked(&self, person: Person) {
        self.people.write().await.insert(person.id.clone(), person);
    }

    /// Remove every account except the owner and reset the counters.
    pub async fn clear(&self) {
        let mut people = self.people.write().await;
        people.retain(|id, _| *id == self.owner);
        *self.counters.write().await = OpCounters::default();
    }

    async fn email_in_use(&self, request: &CreatePerson) -> Option<EmailAddress> {
        let people = self.people.read().await;
        for person in people.values() {
            for email in &request.emails {
                if person.emails.contains(email) {
                    return Some(email.clone());
                }
            }
        }
        None
    }
}

impl Default for InMemoryPeopleApi {
    fn default() -> Self {
        Self::new()
    }
}

impl PeopleApi for InMemoryPeopleApi {
    async fn create(&self, request: CreatePerson, context: &RequestContext) -> PeopleResult<Person> {
        if request.emails.is_empty() {
            return Err(ValidationError::NoEmails.into());
        }
        if let Some(email) = self.email_in_use(&request).await {
            return Err(PeopleError::EmailInUse { email });
        }
        let person = Person {
            id: PersonId::generate(),
            emails: request.emails,
            display_name: request.display_name,
            first_name: request.first_name,
            last_name: request.last_name,
            licenses: request.licenses,
            created: Utc::now(),
        };
        self.people
            .write()
            .await
            .insert(person.id.clone(), person.clone());
        self.counters.write().await.create_calls += 1;
        info!(
            "created account {} (request: {})",
            person.id, context.request_id
        );
        Ok(person)
    }

    async fn get(&self, id: &PersonId, context: &RequestContext) -> PeopleResult<Option<Person>> {
        debug!("fetching account {} (request: {})", id, context.request_id);
        Ok(self.people.read().await.get(id).cloned())
    }

    async fn list(
        &self,
        query: &PeopleQuery,
        context: &RequestContext,
    ) -> PeopleResult<Vec<Person>> {
        let mut results: Vec<Person> = {
            let people = self.people.read().await;
            people
                .values()
                .filter(|person| query.matches(person))
                .cloned()
                .collect()
        };
        results.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

        // A zero page size is meaningless and treated as "no hint".
        let page_size = query.max.filter(|max| *max > 0);
        let pages = match page_size {
            Some(size) => (results.len().div_ceil(size) as u64).max(1),
            None => 1,
        };
        {
            let mut counters = self.counters.write().await;
            counters.list_calls += 1;
            counters.page_fetches += pages;
        }
        debug!(
            "listed {} account(s) over {} page(s) (request: {})",
            results.len(),
            pages,
            context.request_id
        );
        Ok(results)
    }

    async fn update(
        &self,
        id: &PersonId,
        update: UpdatePerson,
        context: &RequestContext,
    ) -> PeopleResult<Person> {
        let mut people = self.people.write().await;
        let person = people
            .get_mut(id)
            .ok_or_else(|| PeopleError::PersonNotFound { id: id.clone() })?;
        if let Some(display_name) = update.display_name {
            person.display_name = display_name;
        }
        if let Some(first_name) = update.first_name {
            person.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            person.last_name = last_name;
        }
        if let Some(licenses) = update.licenses {
            person.licenses = licenses;
        }
        let updated = person.clone();
        drop(people);
        self.counters.write().await.update_calls += 1;
        debug!("updated account {} (request: {})", id, context.request_id);
        Ok(updated)
    }

    async fn delete(&self, id: &PersonId, context: &RequestContext) -> PeopleResult<()> {
        let removed = self.people.write().await.remove(id);
        if removed.is_none() {
            return Err(PeopleError::PersonNotFound { id: id.clone() });
        }
        self.counters.write().await.delete_calls += 1;
        info!("deleted account {} (request: {})", id, context.request_id);
        Ok(())
    }

    async fn me(&self, context: &RequestContext) -> PeopleResult<Person> {
        debug!(
            "fetching session owner {} (request: {})",
            self.owner, context.request_id
        );
        self.people
            .read()
            .await
            .get(&self.owner)
            .cloned()
            .ok_or_else(|| PeopleError::PersonNotFound {
                id: self.owner.clone(),
            })
    }
}

/// Builder for [`InMemoryPeopleApi`] with a custom license catalog or owner.
#[derive(Debug, Default)]
pub struct InMemoryPeopleApiBuilder {
    licenses: Vec<License>,
    owner: Option<CreatePerson>,
}

impl InMemoryPeopleApiBuilder {
    /// Add a license to the platform catalog.
    pub fn license(mut self, license: License) -> Self {
        self.licenses.push(license);
        self
    }

    /// Use a custom owner account for `me`.
    pub fn owner(mut self, owner: CreatePerson) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Build the backend, seeding the owner account.
    pub fn build(self) -> PeopleResult<InMemoryPeopleApi> {
        let mut catalog = self.licenses;
        if catalog.is_empty() {
            catalog.push(License::new(
                LicenseId::new_unchecked("lic-messaging".to_string()),
                "Messaging",
            ));
        }
        let owner_request = match self.owner {
            Some(request) => request,
            None => CreatePerson::new(vec![EmailAddress::new_unchecked(
                "workspace-owner@example.com".to_string(),
            )])
            .display_name("Workspace Owner")
            .first_name("Workspace")
            .last_name("Owner"),
        };
        if owner_request.emails.is_empty() {
            return Err(ValidationError::NoEmails.into());
        }
        let owner = Person {
            id: PersonId::generate(),
            emails: owner_request.emails,
            display_name: owner_request.display_name,
            first_name: owner_request.first_name,
            last_name: owner_request.last_name,
            licenses: if owner_request.licenses.is_empty() {
                catalog.iter().map(|l| l.id.clone()).collect()
            } else {
                owner_request.licenses
            },
            created: Utc::now(),
        };
        Ok(InMemoryPeopleApi::with_state(catalog, owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RequestContext {
        RequestContext::with_generated_id()
    }

    fn request(email: &str) -> CreatePerson {
        CreatePerson::new(vec![EmailAddress::new(email.to_string()).unwrap()])
            .display_name("Account Under Test")
    }

    #[tokio::test]
    async fn create_rejects_reused_email_addresses() {
        let api = InMemoryPeopleApi::new();
        api.create(request("dup@example.com"), &context())
            .await
            .unwrap();
        let err = api
            .create(request("dup@example.com"), &context())
            .await
            .unwrap_err();
        assert!(matches!(err, PeopleError::EmailInUse { email } if email.as_str() == "dup@example.com"));
    }

    #[tokio::test]
    async fn create_rejects_empty_email_lists() {
        let api = InMemoryPeopleApi::new();
        let err = api
            .create(CreatePerson::new(Vec::new()), &context())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PeopleError::InvalidPerson(ValidationError::NoEmails)
        ));
    }

    #[tokio::test]
    async fn update_and_delete_require_an_existing_account() {
        let api = InMemoryPeopleApi::new();
        let missing = PersonId::generate();
        assert!(matches!(
            api.update(&missing, UpdatePerson::new(), &context())
                .await
                .unwrap_err(),
            PeopleError::PersonNotFound { .. }
        ));
        assert!(matches!(
            api.delete(&missing, &context()).await.unwrap_err(),
            PeopleError::PersonNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn list_orders_results_by_id() {
        let api = InMemoryPeopleApi::new();
        let ctx = context();
        for n in 0..3 {
            api.create(
                request(&format!("order{n}@example.com")).display_name("Ordered"),
                &ctx,
            )
            .await
            .unwrap();
        }
        let query = PeopleQuery::new().display_name("Ordered");
        let first = api.list(&query, &ctx).await.unwrap();
        let second = api.list(&query, &ctx).await.unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn list_records_one_page_fetch_per_chunk() {
        let api = InMemoryPeopleApi::new();
        let ctx = context();
        for n in 0..3 {
            api.create(
                request(&format!("page{n}@example.com")).display_name("Paged"),
                &ctx,
            )
            .await
            .unwrap();
        }
        api.list(&PeopleQuery::new().display_name("Paged").max(2), &ctx)
            .await
            .unwrap();
        assert_eq!(api.stats().await.page_fetches, 2);
    }

    #[tokio::test]
    async fn clear_retains_the_owner_account() {
        let api = InMemoryPeopleApi::new();
        let ctx = context();
        api.create(request("gone@example.com"), &ctx).await.unwrap();
        api.clear().await;
        let stats = api.stats().await;
        assert_eq!(stats.total_people, 1);
        assert_eq!(stats.create_calls, 0);
        assert!(api.me(&ctx).await.unwrap().validate().is_ok());
    }

    #[tokio::test]
    async fn builder_seeds_catalog_and_owner() {
        let meetings = License::new(LicenseId::new("lic-meetings".to_string()).unwrap(), "Meetings");
        let api = InMemoryPeopleApi::builder()
            .license(meetings)
            .owner(
                CreatePerson::new(vec![
                    EmailAddress::new("admin@example.com".to_string()).unwrap(),
                ])
                .display_name("Admin"),
            )
            .build()
            .unwrap();
        assert!(api.license_pool().get("Meetings").is_some());
        let me = api.me(&context()).await.unwrap();
        assert_eq!(me.display_name, "Admin");
        assert!(!me.licenses.is_empty());
    }
}
