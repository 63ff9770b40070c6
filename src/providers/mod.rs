//! Backend implementations of the [`PeopleApi`](crate::api::PeopleApi) contract.
//!
//! The crate ships a single in-memory reference backend. Transports against
//! the real platform live downstream and implement the same trait.

pub mod in_memory;

pub use in_memory::{InMemoryPeopleApi, InMemoryPeopleApiBuilder, InMemoryStats};
