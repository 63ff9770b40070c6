//! Platform licenses and the name-to-id lookup used when provisioning.

use crate::error::{PeopleError, PeopleResult};
use crate::resource::types::LicenseId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A platform entitlement, such as messaging or meetings access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: LicenseId,
    /// Human-readable name, e.g. `"Messaging"`. Lookup key in [`LicensePool`].
    pub name: String,
}

impl License {
    pub fn new(id: LicenseId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Mapping from license display name to license id.
///
/// Built from the platform's license catalog and consulted when provisioning
/// test accounts, which are granted a default license by name.
#[derive(Debug, Clone, Default)]
pub struct LicensePool {
    by_name: HashMap<String, LicenseId>,
}

impl LicensePool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from a license catalog. Later entries win on name clashes.
    pub fn from_catalog(licenses: impl IntoIterator<Item = License>) -> Self {
        let mut pool = Self::new();
        for license in licenses {
            pool.insert(license);
        }
        pool
    }

    pub fn insert(&mut self, license: License) {
        self.by_name.insert(license.name, license.id);
    }

    /// Look up a license id by name.
    pub fn get(&self, name: &str) -> Option<&LicenseId> {
        self.by_name.get(name)
    }

    /// Look up a license id by name, failing if the catalog does not carry it.
    pub fn resolve(&self, name: &str) -> PeopleResult<LicenseId> {
        self.by_name
            .get(name)
            .cloned()
            .ok_or_else(|| PeopleError::UnknownLicense {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_the_catalog_id() {
        let id = LicenseId::new("lic-messaging".to_string()).unwrap();
        let pool = LicensePool::from_catalog([License::new(id.clone(), "Messaging")]);
        assert_eq!(pool.resolve("Messaging").unwrap(), id);
    }

    #[test]
    fn resolve_fails_for_unknown_names() {
        let pool = LicensePool::new();
        assert!(matches!(
            pool.resolve("Meetings"),
            Err(PeopleError::UnknownLicense { name }) if name == "Meetings"
        ));
    }
}
