//! Value objects for people API identifiers.
//!
//! Type-safe wrappers around account ids, email addresses and license ids
//! with validation enforced at construction time.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A validated account identifier.
///
/// Ids are assigned by the backend at creation and are immutable for the
/// lifetime of the account. Construction rejects empty values, so a
/// `PersonId` held by a caller always refers to a well-formed identifier.
///
/// ## Examples
///
/// ```rust
/// use people_client::PersonId;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let id = PersonId::new("2819c223-7f76-453a-919d-413861904646".to_string())?;
///     assert!(!id.as_str().is_empty());
///
///     let invalid = PersonId::new("".to_string());
///     assert!(invalid.is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    /// Create a new `PersonId` with validation.
    pub fn new(value: String) -> ValidationResult<Self> {
        if value.is_empty() {
            return Err(ValidationError::MissingId);
        }
        Ok(Self(value))
    }

    /// Generate a fresh random id, as the backend does at account creation.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the string representation of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id and return the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated email address.
///
/// An email address identifies at most one account on the platform, which is
/// why lookups by address are expected to return zero or one match.
///
/// ## Validation Rules
///
/// - Must not be empty
/// - Must contain exactly one `@` with text on both sides
/// - Must not contain whitespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new `EmailAddress` with validation.
    ///
    /// # Arguments
    ///
    /// * `value` - The address string to validate and wrap
    ///
    /// # Returns
    ///
    /// * `Ok(EmailAddress)` - If the value is valid
    /// * `Err(ValidationError)` - If the value violates validation rules
    pub fn new(value: String) -> ValidationResult<Self> {
        if value.is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        let mut parts = value.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty()
            || domain.is_empty()
            || parts.next().is_some()
            || value.chars().any(char::is_whitespace)
        {
            return Err(ValidationError::InvalidEmailAddress { value });
        }
        Ok(Self(value))
    }

    /// Create an `EmailAddress` without validation.
    ///
    /// Only for values already known to be well-formed, such as addresses
    /// rendered from pre-validated components.
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Get the string representation of the address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the address and return the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated license identifier.
///
/// Licenses are platform entitlements; an account holds a set of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LicenseId(String);

impl LicenseId {
    /// Create a new `LicenseId` with validation.
    pub fn new(value: String) -> ValidationResult<Self> {
        if value.is_empty() {
            return Err(ValidationError::EmptyLicenseId);
        }
        Ok(Self(value))
    }

    /// Create a `LicenseId` from a value known to be non-empty.
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Get the string representation of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
