//! Sources of fresh email addresses for test accounts.

use crate::error::{ValidationError, ValidationResult};
use crate::resource::EmailAddress;
use std::sync::atomic::{AtomicU64, Ordering};

/// Supplies unique email addresses on demand.
///
/// Every call must return an address not handed out before by this provider
/// instance; account provisioning relies on that to give distinct registry
/// keys distinct accounts.
pub trait EmailAddressProvider: Send + Sync {
    /// The next fresh address.
    fn next_address(&self) -> EmailAddress;
}

/// Counter-based address provider rendering `<prefix><n>@<domain>`.
///
/// The default configuration starts at `test1@example.com` and counts up.
///
/// ## Examples
///
/// ```rust
/// use people_client::{EmailAddressProvider, SequentialEmailAddresses};
///
/// let emails = SequentialEmailAddresses::new();
/// assert_eq!(emails.next_address().as_str(), "test1@example.com");
/// assert_eq!(emails.next_address().as_str(), "test2@example.com");
/// ```
#[derive(Debug)]
pub struct SequentialEmailAddresses {
    prefix: String,
    domain: String,
    next: AtomicU64,
}

impl SequentialEmailAddresses {
    /// Provider with the default `test*@example.com` format.
    pub fn new() -> Self {
        Self {
            prefix: "test".to_string(),
            domain: "example.com".to_string(),
            next: AtomicU64::new(1),
        }
    }

    /// Provider with a custom local-part prefix and domain.
    ///
    /// The parts are validated up front so that every rendered address is a
    /// well-formed [`EmailAddress`].
    pub fn with_format(
        prefix: impl Into<String>,
        domain: impl Into<String>,
    ) -> ValidationResult<Self> {
        let prefix = prefix.into();
        let domain = domain.into();
        // Validate the rendered shape once; all later counters only change digits.
        let probe = format!("{prefix}1@{domain}");
        if prefix.is_empty() || EmailAddress::new(probe.clone()).is_err() {
            return Err(ValidationError::InvalidEmailAddress { value: probe });
        }
        Ok(Self {
            prefix,
            domain,
            next: AtomicU64::new(1),
        })
    }
}

impl Default for SequentialEmailAddresses {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailAddressProvider for SequentialEmailAddresses {
    fn next_address(&self) -> EmailAddress {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        EmailAddress::new_unchecked(format!("{}{}@{}", self.prefix, n, self.domain))
    }
}
