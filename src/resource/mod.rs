//! Resource model for the people API.
//!
//! This module provides the typed account model and the request/query types
//! used by the [`PeopleApi`](crate::api::PeopleApi) contract.
//!
//! # Key Types
//!
//! - [`Person`] - A remote account resource
//! - [`CreatePerson`] / [`UpdatePerson`] - Create and update payloads
//! - [`PersonId`], [`EmailAddress`], [`LicenseId`] - Validated value objects
//! - [`License`] / [`LicensePool`] - Platform entitlements and their lookup
//! - [`RequestContext`] / [`PeopleQuery`] - Per-operation context and filters

pub mod context;
pub mod license;
pub mod person;
pub mod types;

pub use context::{PeopleQuery, RequestContext};
pub use license::{License, LicensePool};
pub use person::{CreatePerson, Person, UpdatePerson};
pub use types::{EmailAddress, LicenseId, PersonId};
