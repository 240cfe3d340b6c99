//! Sanitized conditional request values.
//!
//! [`RequestConditionals`] is built once per request and never modified
//! afterwards. It can only be assembled through [`RequestConditionalsBuilder`],
//! whose setters accept already-typed values, so a raw header string can
//! never end up in a semantic field.

use chrono::{DateTime, SubsecRound, Utc};

use crate::age::AgeDirective;
use crate::tag::TagCondition;

/// The conditional and cache-control state of one request.
///
/// # Examples
///
/// ```
/// use revalidate_core::{AgeDirective, EntityTag, RequestConditionals, TagCondition};
///
/// let conditionals = RequestConditionals::builder()
///     .not_matching_etag(TagCondition::Tag(EntityTag::new("v1").unwrap()))
///     .max_age(AgeDirective::from_i64(0))
///     .build();
///
/// assert!(conditionals.has_conditionals());
/// assert_eq!(conditionals.max_age(), Some(AgeDirective::from_i64(0)));
/// assert!(conditionals.matching_etag().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConditionals {
    matching_etag: Option<TagCondition>,
    not_matching_etag: Option<TagCondition>,
    modified_since: Option<DateTime<Utc>>,
    not_modified_since: Option<DateTime<Utc>>,
    no_cache: bool,
    no_store: bool,
    no_transform: bool,
    cache_only: bool,
    max_age: Option<AgeDirective>,
    max_stale_age: Option<AgeDirective>,
    min_fresh_age: Option<AgeDirective>,
    present: bool,
}

impl RequestConditionals {
    /// Creates a new [`RequestConditionalsBuilder`].
    pub fn builder() -> RequestConditionalsBuilder {
        RequestConditionalsBuilder::default()
    }

    /// `If-Match` condition.
    pub fn matching_etag(&self) -> Option<&TagCondition> {
        self.matching_etag.as_ref()
    }

    /// `If-None-Match` condition.
    pub fn not_matching_etag(&self) -> Option<&TagCondition> {
        self.not_matching_etag.as_ref()
    }

    /// `If-Modified-Since` instant.
    pub fn modified_since(&self) -> Option<DateTime<Utc>> {
        self.modified_since
    }

    /// `If-Unmodified-Since` instant.
    pub fn not_modified_since(&self) -> Option<DateTime<Utc>> {
        self.not_modified_since
    }

    /// `Cache-Control: no-cache`.
    pub fn no_cache(&self) -> bool {
        self.no_cache
    }

    /// `Cache-Control: no-store`.
    pub fn no_store(&self) -> bool {
        self.no_store
    }

    /// `Cache-Control: no-transform`.
    pub fn no_transform(&self) -> bool {
        self.no_transform
    }

    /// `Cache-Control: only-if-cached`.
    pub fn cache_only(&self) -> bool {
        self.cache_only
    }

    /// `Cache-Control: max-age`.
    pub fn max_age(&self) -> Option<AgeDirective> {
        self.max_age
    }

    /// `Cache-Control: max-stale` (or `s-maxage`).
    pub fn max_stale_age(&self) -> Option<AgeDirective> {
        self.max_stale_age
    }

    /// `Cache-Control: min-fresh`.
    pub fn min_fresh_age(&self) -> Option<AgeDirective> {
        self.min_fresh_age
    }

    /// Returns `true` when the client opted out of validation entirely.
    pub fn bypasses_validation(&self) -> bool {
        self.no_cache || self.no_store
    }

    /// Returns `true` if any recognized conditional or cache-control header
    /// was present on the request, even one whose value was discarded as
    /// malformed.
    pub fn has_conditionals(&self) -> bool {
        self.present
    }

    /// Returns `true` if at least one `If-*` precondition survived parsing.
    pub fn has_preconditions(&self) -> bool {
        self.matching_etag.is_some()
            || self.not_matching_etag.is_some()
            || self.modified_since.is_some()
            || self.not_modified_since.is_some()
    }
}

/// Builder for [`RequestConditionals`].
///
/// Every setter also marks the request as carrying conditional headers.
#[derive(Debug, Clone, Default)]
pub struct RequestConditionalsBuilder {
    inner: RequestConditionals,
}

impl RequestConditionalsBuilder {
    /// Sets the `If-Match` condition.
    pub fn matching_etag(mut self, condition: TagCondition) -> Self {
        self.inner.matching_etag = Some(condition);
        self.seen()
    }

    /// Sets the `If-None-Match` condition.
    pub fn not_matching_etag(mut self, condition: TagCondition) -> Self {
        self.inner.not_matching_etag = Some(condition);
        self.seen()
    }

    /// Sets the `If-Modified-Since` instant, truncated to whole seconds.
    pub fn modified_since(mut self, instant: DateTime<Utc>) -> Self {
        self.inner.modified_since = Some(instant.trunc_subsecs(0));
        self.seen()
    }

    /// Sets the `If-Unmodified-Since` instant, truncated to whole seconds.
    pub fn not_modified_since(mut self, instant: DateTime<Utc>) -> Self {
        self.inner.not_modified_since = Some(instant.trunc_subsecs(0));
        self.seen()
    }

    /// Sets `no-cache`.
    pub fn no_cache(mut self, value: bool) -> Self {
        self.inner.no_cache = value;
        self.seen()
    }

    /// Sets `no-store`.
    pub fn no_store(mut self, value: bool) -> Self {
        self.inner.no_store = value;
        self.seen()
    }

    /// Sets `no-transform`.
    pub fn no_transform(mut self, value: bool) -> Self {
        self.inner.no_transform = value;
        self.seen()
    }

    /// Sets `only-if-cached`.
    pub fn cache_only(mut self, value: bool) -> Self {
        self.inner.cache_only = value;
        self.seen()
    }

    /// Sets `max-age`.
    pub fn max_age(mut self, age: AgeDirective) -> Self {
        self.inner.max_age = Some(age);
        self.seen()
    }

    /// Sets `max-stale`.
    pub fn max_stale_age(mut self, age: AgeDirective) -> Self {
        self.inner.max_stale_age = Some(age);
        self.seen()
    }

    /// Sets `min-fresh`.
    pub fn min_fresh_age(mut self, age: AgeDirective) -> Self {
        self.inner.min_fresh_age = Some(age);
        self.seen()
    }

    /// Marks that a recognized header was present, without setting a value.
    ///
    /// Parsers call this when a header was found but its value was discarded.
    pub fn seen(mut self) -> Self {
        self.inner.present = true;
        self
    }

    /// Builds the immutable [`RequestConditionals`].
    pub fn build(self) -> RequestConditionals {
        self.inner
    }
}
