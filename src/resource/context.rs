//! Request context and query structures for people API operations.

use crate::resource::person::Person;
use crate::resource::types::EmailAddress;
use uuid::Uuid;

/// Request context for people API operations.
///
/// Provides request tracking for logging and auditing purposes. Every
/// operation on the [`PeopleApi`](crate::api::PeopleApi) contract carries one.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request.
    pub request_id: String,
}

impl RequestContext {
    /// Create a new request context with a specific request ID.
    pub fn new(request_id: String) -> Self {
        Self { request_id }
    }

    /// Create a new request context with a generated request ID.
    pub fn with_generated_id() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_generated_id()
    }
}

/// Query parameters for listing accounts.
///
/// All filters are optional; an empty query matches everything. `max` is a
/// page-size hint for the implementation's internal fetching and does not
/// truncate the result set.
#[derive(Debug, Clone, Default)]
pub struct PeopleQuery {
    /// Match accounts owning this email address.
    pub email: Option<EmailAddress>,
    /// Match accounts with exactly this display name.
    pub display_name: Option<String>,
    /// Page-size hint for implementations that fetch in chunks.
    pub max: Option<usize>,
}

impl PeopleQuery {
    /// Create a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: EmailAddress) -> Self {
        self.email = Some(email);
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Whether the given account satisfies every filter in this query.
    pub fn matches(&self, person: &Person) -> bool {
        if let Some(email) = &self.email
            && !person.emails.contains(email)
        {
            return false;
        }
        if let Some(name) = &self.display_name
            && &person.display_name != name
        {
            return false;
        }
        true
    }
}
