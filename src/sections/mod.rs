//! Builders for the homepage sections. Each maps N descriptors to N sections
//! in the same order.

pub mod collections;
pub mod projects;
pub mod zine;

use crate::error::FetchError;
use std::collections::HashMap;

pub use collections::{CollectionDescriptor, CollectionSection, CuratedCollections};
pub use projects::{AppsWeLove, ProjectDescriptor, ProjectSection};
pub use zine::{CulturePost, CultureZine};

/// Override value when present and non-empty, canonical value otherwise.
pub(crate) fn or_canonical(override_value: Option<&str>, canonical: &str) -> String {
    match override_value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => canonical.to_string(),
    }
}

/// Look up a descriptor's canonical record in a batch-by-key response.
pub(crate) fn canonical_record<'a, V>(
    batch: &'a HashMap<String, V>,
    resource: &'static str,
    key: &str,
) -> Result<&'a V, FetchError> {
    batch
        .get(key)
        .ok_or_else(|| FetchError::MissingCanonicalRecord {
            resource,
            key: key.to_string(),
        })
}
