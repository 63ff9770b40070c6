//! The `Person` account resource and its create/update payloads.

use crate::error::{ValidationError, ValidationResult};
use crate::resource::types::{EmailAddress, LicenseId, PersonId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A remote account resource.
///
/// Identity is the `id` field, assigned by the backend at creation and
/// immutable thereafter. Email addresses are an ordered sequence; the first
/// entry is the primary address. Wire representation uses the platform's
/// camelCase attribute names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Backend-assigned unique identifier.
    pub id: PersonId,
    /// Ordered email addresses; the first entry is primary.
    pub emails: Vec<EmailAddress>,
    /// Name shown in rosters and message headers.
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    /// Entitlements held by this account.
    pub licenses: BTreeSet<LicenseId>,
    /// When the backend created the account.
    pub created: DateTime<Utc>,
}

impl Person {
    /// Check that this resource satisfies the platform's structural rules.
    ///
    /// A valid person has a non-empty id and at least one well-formed email
    /// address. Deserialized data bypasses value-object constructors, so
    /// callers receiving resources from an untrusted backend should validate
    /// before relying on them.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.id.as_str().is_empty() {
            return Err(ValidationError::MissingId);
        }
        if self.emails.is_empty() {
            return Err(ValidationError::NoEmails);
        }
        for email in &self.emails {
            if email.as_str().is_empty() {
                return Err(ValidationError::EmptyEmail);
            }
        }
        Ok(())
    }

    /// The primary email address, if the account has any.
    pub fn primary_email(&self) -> Option<&EmailAddress> {
        self.emails.first()
    }
}

/// Payload for creating an account.
///
/// Construct with the email addresses the account should own, then chain the
/// optional attributes:
///
/// ```rust
/// use people_client::{CreatePerson, EmailAddress, LicenseId};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let request = CreatePerson::new(vec![EmailAddress::new(
///         "new.hire@example.com".to_string(),
///     )?])
///     .display_name("New Hire")
///     .first_name("New")
///     .last_name("Hire")
///     .license(LicenseId::new("lic-messaging".to_string())?);
///     assert_eq!(request.emails.len(), 1);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePerson {
    pub emails: Vec<EmailAddress>,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub licenses: BTreeSet<LicenseId>,
}

impl CreatePerson {
    /// Start a create payload owning the given addresses.
    pub fn new(emails: Vec<EmailAddress>) -> Self {
        Self {
            emails,
            display_name: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            licenses: BTreeSet::new(),
        }
    }

    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = value.into();
        self
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = value.into();
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = value.into();
        self
    }

    /// Grant a license to the new account.
    pub fn license(mut self, license: LicenseId) -> Self {
        self.licenses.insert(license);
        self
    }
}

/// Payload for updating an account.
///
/// Carries only the attributes being changed; `None` fields are left
/// untouched by the backend. The id itself cannot be updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePerson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<BTreeSet<LicenseId>>,
}

impl UpdatePerson {
    /// Start an empty update payload.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = Some(value.into());
        self
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn licenses(mut self, licenses: BTreeSet<LicenseId>) -> Self {
        self.licenses = Some(licenses);
        self
    }

    /// True when no attribute change has been requested.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.licenses.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_person() -> Person {
        Person {
            id: PersonId::new("p-1".to_string()).unwrap(),
            emails: vec![EmailAddress::new("one@example.com".to_string()).unwrap()],
            display_name: "One".to_string(),
            first_name: "One".to_string(),
            last_name: "Person".to_string(),
            licenses: BTreeSet::new(),
            created: Utc::now(),
        }
    }

    #[test]
    fn valid_person_passes_validation() {
        assert!(sample_person().validate().is_ok());
    }

    #[test]
    fn person_without_emails_fails_validation() {
        let mut person = sample_person();
        person.emails.clear();
        assert_eq!(person.validate().unwrap_err(), ValidationError::NoEmails);
    }

    #[test]
    fn primary_email_is_the_first_entry() {
        let mut person = sample_person();
        person
            .emails
            .push(EmailAddress::new("two@example.com".to_string()).unwrap());
        assert_eq!(person.primary_email().unwrap().as_str(), "one@example.com");
    }

    #[test]
    fn person_serializes_with_camel_case_names() {
        let value = serde_json::to_value(sample_person()).unwrap();
        assert!(value.get("displayName").is_some());
        assert!(value.get("firstName").is_some());
        assert!(value.get("lastName").is_some());
        assert!(value.get("display_name").is_none());
    }

    #[test]
    fn update_payload_tracks_requested_changes() {
        assert!(UpdatePerson::new().is_empty());
        let update = UpdatePerson::new().display_name("Renamed");
        assert!(!update.is_empty());
        assert_eq!(update.display_name.as_deref(), Some("Renamed"));
        assert!(update.first_name.is_none());
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let value = serde_json::to_value(UpdatePerson::new()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
