//! The cache validator.
//!
//! Validation runs in three steps:
//!
//! 1. `no-cache` or `no-store` bypasses validation: `200`.
//! 2. Preconditions run in [`PRECONDITION_ORDER`]; the first rule that
//!    resolves decides, and at most one rule produces a `304` candidate.
//!    If every rule continues, the result is `200`.
//! 3. A `304` candidate for a resource with a timestamp is checked against
//!    the request's freshness directives and becomes `200` when stale.

use chrono::{DateTime, Utc};
use http::Method;
use revalidate_core::{RequestConditionals, ResourceDescriptor, ValidationStatus};
use tracing::{debug, debug_span, field};

use crate::freshness::Freshness;
use crate::precondition::{PRECONDITION_ORDER, Precondition, RuleOutcome, Subject};

/// Evaluates [`RequestConditionals`] against a [`ResourceDescriptor`].
///
/// The validator holds no state; it is total over its inputs and always
/// returns one of the three [`ValidationStatus`] values.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, Utc};
/// use http::Method;
/// use revalidate::{CacheValidator, RequestConditionals, Resource, ValidationStatus};
///
/// let now = Utc::now();
/// let modified = now - TimeDelta::hours(1);
/// let conditionals = RequestConditionals::builder()
///     .modified_since(modified)
///     .build();
///
/// let resource = Resource::new().with_last_modified(modified);
/// let status = CacheValidator::new().validate_at(&conditionals, &resource, &Method::GET, now);
///
/// assert_eq!(status, ValidationStatus::NotModified);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheValidator;

impl CacheValidator {
    /// Creates a validator.
    pub fn new() -> Self {
        CacheValidator
    }

    /// Validates using the current wall-clock time.
    pub fn validate<D>(
        &self,
        conditionals: &RequestConditionals,
        resource: &D,
        method: &Method,
    ) -> ValidationStatus
    where
        D: ResourceDescriptor + ?Sized,
    {
        self.validate_at(conditionals, resource, method, Utc::now())
    }

    /// Validates as of `now`.
    pub fn validate_at<D>(
        &self,
        conditionals: &RequestConditionals,
        resource: &D,
        method: &Method,
        now: DateTime<Utc>,
    ) -> ValidationStatus
    where
        D: ResourceDescriptor + ?Sized,
    {
        let span = debug_span!(
            "revalidate.validate",
            method = %method,
            rule = field::Empty,
            status = field::Empty,
        );
        let _enter = span.enter();

        let (rule, status) = self.decide(conditionals, resource, method, now);
        span.record("rule", rule);
        span.record("status", status.code());
        status
    }

    fn decide<D>(
        &self,
        conditionals: &RequestConditionals,
        resource: &D,
        method: &Method,
        now: DateTime<Utc>,
    ) -> (&'static str, ValidationStatus)
    where
        D: ResourceDescriptor + ?Sized,
    {
        if conditionals.bypasses_validation() {
            return ("bypass", ValidationStatus::Ok);
        }

        let subject = Subject::new(resource, method);
        let mut candidate: Option<Precondition> = None;
        for rule in PRECONDITION_ORDER {
            match rule.evaluate(conditionals, &subject) {
                RuleOutcome::Continue => {}
                RuleOutcome::Resolved(status) => return (rule.as_str(), status),
                RuleOutcome::NotModifiedCandidate => {
                    candidate = Some(rule);
                    break;
                }
            }
        }

        let Some(rule) = candidate else {
            return ("none", ValidationStatus::Ok);
        };

        // Resources without a timestamp are not subject to freshness checks.
        let Some(last_modified) = subject.last_modified() else {
            return (rule.as_str(), ValidationStatus::NotModified);
        };

        let freshness = Freshness::new(conditionals, last_modified, now);
        match freshness.stale_reason(conditionals) {
            Some(reason) => {
                debug!(
                    directive = reason.as_str(),
                    age = freshness.age(),
                    lifetime = freshness.lifetime(),
                    staleness = freshness.staleness(),
                    "not-modified candidate is stale for the client"
                );
                (reason.as_str(), ValidationStatus::Ok)
            }
            None => (rule.as_str(), ValidationStatus::NotModified),
        }
    }
}
