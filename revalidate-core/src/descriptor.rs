//! Resource identity.
//!
//! The validator never loads a resource. It only needs the resource's entity
//! tag and last modification instant, supplied through [`ResourceDescriptor`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tag::EntityTag;

/// Identity of the resource a request addresses.
///
/// Implementations are responsible for their own thread-safety when fetching
/// identity metadata. An empty etag is treated exactly like a missing one.
pub trait ResourceDescriptor {
    /// Entity tag of the current representation, if the resource has a stable identity.
    fn etag(&self) -> Option<&str>;

    /// Last modification instant, if the resource has a time-based identity.
    fn last_modified(&self) -> Option<DateTime<Utc>>;

    /// Returns the normalized entity tag, or `None` if absent or empty.
    fn entity_tag(&self) -> Option<EntityTag> {
        self.etag().and_then(EntityTag::new)
    }
}

impl<T: ResourceDescriptor + ?Sized> ResourceDescriptor for &T {
    fn etag(&self) -> Option<&str> {
        (**self).etag()
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        (**self).last_modified()
    }
}

impl<T: ResourceDescriptor + ?Sized> ResourceDescriptor for Box<T> {
    fn etag(&self) -> Option<&str> {
        (**self).etag()
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        (**self).last_modified()
    }
}

impl<T: ResourceDescriptor + ?Sized> ResourceDescriptor for Arc<T> {
    fn etag(&self) -> Option<&str> {
        (**self).etag()
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        (**self).last_modified()
    }
}

/// A plain [`ResourceDescriptor`] value.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use revalidate_core::{Resource, ResourceDescriptor};
///
/// let resource = Resource::new()
///     .with_etag("\"v1\"")
///     .with_last_modified(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
///
/// assert_eq!(resource.entity_tag().unwrap().as_str(), "v1");
/// assert!(resource.last_modified().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    etag: Option<EntityTag>,
    #[serde(default)]
    last_modified: Option<DateTime<Utc>>,
}

impl Resource {
    /// Creates a resource with no identity at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entity tag. Empty values leave the tag unset.
    pub fn with_etag(mut self, etag: &str) -> Self {
        self.etag = EntityTag::new(etag);
        self
    }

    /// Sets the last modification instant.
    pub fn with_last_modified(mut self, instant: DateTime<Utc>) -> Self {
        self.last_modified = Some(instant);
        self
    }
}

impl ResourceDescriptor for Resource {
    fn etag(&self) -> Option<&str> {
        self.etag.as_ref().map(EntityTag::as_str)
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    fn entity_tag(&self) -> Option<EntityTag> {
        self.etag.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Borrowed<'a> {
        etag: &'a str,
    }

    impl ResourceDescriptor for Borrowed<'_> {
        fn etag(&self) -> Option<&str> {
            Some(self.etag)
        }

        fn last_modified(&self) -> Option<DateTime<Utc>> {
            None
        }
    }

    #[test]
    fn test_empty_etag_is_absent() {
        let resource = Borrowed { etag: "" };
        assert!(resource.entity_tag().is_none());
        assert!(Resource::new().with_etag("").entity_tag().is_none());
    }

    #[test]
    fn test_blanket_impls() {
        let resource = Arc::new(Resource::new().with_etag("x"));
        assert_eq!(resource.etag(), Some("x"));
        let boxed: Box<dyn ResourceDescriptor> = Box::new(Borrowed { etag: "\"y\"" });
        assert_eq!(boxed.entity_tag().unwrap().as_str(), "y");
    }
}
