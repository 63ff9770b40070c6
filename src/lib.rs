//! People API client contract and test-account lifecycle for Rust.
//!
//! Provides the typed contract of a messaging-platform people/account API,
//! an in-memory reference backend, and deterministic lifecycle management
//! for the ephemeral accounts integration tests create.
//!
//! # Core Components
//!
//! - [`PeopleApi`] - Trait for account backends (create/get/list/update/delete/me)
//! - [`TestPersonRegistry`] - Session-scoped cache of named test accounts
//! - [`with_temp_person`] - One account scoped to a single block, deleted on
//!   every exit path
//! - [`InMemoryPeopleApi`] - Reference backend for tests and development
//!
//! # Quick Start
//!
//! ```rust
//! use people_client::{InMemoryPeopleApi, SequentialEmailAddresses, TestPersonRegistry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = InMemoryPeopleApi::new();
//! let mut registry = TestPersonRegistry::new(
//!     api.clone(),
//!     SequentialEmailAddresses::new(),
//!     api.license_pool(),
//! );
//!
//! let person = registry.get_or_create("not_a_member").await?;
//! assert_eq!(person.emails[0].as_str(), "test1@example.com");
//!
//! // Same key, same account, no second create call.
//! let same = registry.get_or_create("not_a_member").await?;
//! assert_eq!(person.id, same.id);
//!
//! registry.dispose().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod lifecycle;
pub mod providers;
pub mod resource;

// Re-export commonly used types for convenience
pub use api::PeopleApi;
pub use error::{PeopleError, PeopleResult, TeardownError, TeardownFailure, ValidationError};
pub use lifecycle::{
    EmailAddressProvider, SequentialEmailAddresses, TestAccountProfile, TestPersonRegistry,
    find_by_email, provision_person, with_temp_person,
};
pub use providers::{InMemoryPeopleApi, InMemoryPeopleApiBuilder, InMemoryStats};
pub use resource::{
    CreatePerson, EmailAddress, License, LicenseId, LicensePool, PeopleQuery, Person, PersonId,
    RequestContext, UpdatePerson,
};
