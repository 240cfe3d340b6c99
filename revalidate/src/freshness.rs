//! Freshness arithmetic for `304` candidates.
//!
//! A request that matched the client's copy can still be answered with a full
//! response when its own `Cache-Control` directives say that copy is too old.

use chrono::{DateTime, Utc};
use revalidate_core::RequestConditionals;

/// Which request directive judged the resource stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// `max-age` is unbounded (`-1`) or the age exceeds it.
    MaxAge,
    /// `max-stale` is unbounded, exceeds the staleness, or is below the freshness lifetime.
    MaxStale,
    /// `min-fresh` is unbounded or the remaining lifetime is shorter.
    MinFresh,
}

impl StaleReason {
    /// Returns the directive name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            StaleReason::MaxAge => "max-age",
            StaleReason::MaxStale => "max-stale",
            StaleReason::MinFresh => "min-fresh",
        }
    }
}

/// Age figures in whole seconds.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, Utc};
/// use revalidate::freshness::{Freshness, StaleReason};
/// use revalidate::{AgeDirective, RequestConditionals};
///
/// let now = Utc::now();
/// let conditionals = RequestConditionals::builder()
///     .max_age(AgeDirective::from_i64(60))
///     .build();
///
/// let freshness = Freshness::new(&conditionals, now - TimeDelta::seconds(90), now);
/// assert_eq!(freshness.age(), 90);
/// assert_eq!(freshness.lifetime(), 60);
/// assert_eq!(freshness.staleness(), 30);
/// assert_eq!(freshness.stale_reason(&conditionals), Some(StaleReason::MaxAge));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freshness {
    age: i64,
    lifetime: i64,
    staleness: i64,
}

impl Freshness {
    /// Computes the figures for a resource modified at `last_modified`, as of `now`.
    ///
    /// The lifetime is the request's `max-age` when present and non-negative, else `0`.
    pub fn new(
        conditionals: &RequestConditionals,
        last_modified: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let age = now.signed_duration_since(last_modified).num_seconds();
        let lifetime = conditionals
            .max_age()
            .map(|max_age| max_age.seconds())
            .filter(|seconds| *seconds >= 0)
            .unwrap_or(0);
        Self {
            age,
            lifetime,
            staleness: (age - lifetime).max(0),
        }
    }

    /// Seconds since the last modification.
    pub fn age(&self) -> i64 {
        self.age
    }

    /// Freshness lifetime.
    pub fn lifetime(&self) -> i64 {
        self.lifetime
    }

    /// Seconds past the freshness lifetime, never negative.
    pub fn staleness(&self) -> i64 {
        self.staleness
    }

    /// Returns the first directive, in `max-age`, `max-stale`, `min-fresh`
    /// order, that judges the resource stale.
    pub fn stale_reason(&self, conditionals: &RequestConditionals) -> Option<StaleReason> {
        if let Some(max_age) = conditionals.max_age()
            && (max_age.is_unbounded() || self.age > max_age.seconds())
        {
            return Some(StaleReason::MaxAge);
        }

        if let Some(max_stale) = conditionals.max_stale_age()
            && (max_stale.is_unbounded()
                || max_stale.seconds() > self.staleness
                || self.lifetime > max_stale.seconds())
        {
            return Some(StaleReason::MaxStale);
        }

        if let Some(min_fresh) = conditionals.min_fresh_age()
            && (min_fresh.is_unbounded() || self.lifetime - self.age < min_fresh.seconds())
        {
            return Some(StaleReason::MinFresh);
        }

        None
    }
}
