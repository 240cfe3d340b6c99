//! Ordered precondition rules.
//!
//! Rules run in [`PRECONDITION_ORDER`]. Each either lets evaluation continue,
//! resolves the request outright, or yields the single `304` candidate. The
//! order is significant: reordering changes results for requests that carry
//! more than one conditional header.

use chrono::{DateTime, SubsecRound, Utc};
use http::Method;
use revalidate_core::{
    EntityTag, RequestConditionals, ResourceDescriptor, TagCondition, ValidationStatus,
};

/// A conditional request header rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precondition {
    /// `If-Match`
    IfMatch,
    /// `If-None-Match`
    IfNoneMatch,
    /// `If-Unmodified-Since`
    IfUnmodifiedSince,
    /// `If-Modified-Since`
    IfModifiedSince,
}

/// Evaluation order of the precondition rules.
pub const PRECONDITION_ORDER: [Precondition; 4] = [
    Precondition::IfMatch,
    Precondition::IfNoneMatch,
    Precondition::IfUnmodifiedSince,
    Precondition::IfModifiedSince,
];

/// Result of a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The header is absent or satisfied; evaluate the next rule.
    Continue,
    /// The request is decided; no further rule runs.
    Resolved(ValidationStatus),
    /// The client's copy matches; subject to the freshness check.
    NotModifiedCandidate,
}

/// Resource identity and request method, as seen by the rules.
#[derive(Debug, Clone)]
pub struct Subject {
    etag: Option<EntityTag>,
    last_modified: Option<DateTime<Utc>>,
    safe_method: bool,
}

impl Subject {
    /// Captures the identity of `resource` for a request made with `method`.
    ///
    /// The timestamp is truncated to whole seconds, the resolution of an
    /// HTTP-date, so that it can equal a client-supplied date.
    pub fn new<D>(resource: &D, method: &Method) -> Self
    where
        D: ResourceDescriptor + ?Sized,
    {
        Self {
            etag: resource.entity_tag(),
            last_modified: resource.last_modified().map(|t| t.trunc_subsecs(0)),
            safe_method: *method == Method::GET || *method == Method::HEAD,
        }
    }

    /// Entity tag of the resource.
    pub fn etag(&self) -> Option<&EntityTag> {
        self.etag.as_ref()
    }

    /// Last modification instant, truncated to seconds.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// Returns `true` for `GET` and `HEAD`.
    pub fn is_safe_method(&self) -> bool {
        self.safe_method
    }
}

impl Precondition {
    /// Lower-case header name of the rule.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Precondition::IfMatch => "if-match",
            Precondition::IfNoneMatch => "if-none-match",
            Precondition::IfUnmodifiedSince => "if-unmodified-since",
            Precondition::IfModifiedSince => "if-modified-since",
        }
    }

    /// Evaluates the rule.
    pub fn evaluate(&self, conditionals: &RequestConditionals, subject: &Subject) -> RuleOutcome {
        use RuleOutcome::{Continue, NotModifiedCandidate, Resolved};
        use ValidationStatus::PreconditionFailed;

        match self {
            Precondition::IfMatch => {
                let Some(condition) = conditionals.matching_etag() else {
                    return Continue;
                };
                match &subject.etag {
                    Some(etag) if condition.matches(etag) => Continue,
                    _ => Resolved(PreconditionFailed),
                }
            }
            Precondition::IfNoneMatch => {
                let Some(condition) = conditionals.not_matching_etag() else {
                    return Continue;
                };
                let Some(etag) = subject.etag.as_ref().filter(|_| subject.safe_method) else {
                    return Resolved(PreconditionFailed);
                };
                match condition {
                    TagCondition::Any => Resolved(ValidationStatus::Ok),
                    TagCondition::Tag(tag) if tag != etag => Resolved(ValidationStatus::Ok),
                    TagCondition::Tag(_) => NotModifiedCandidate,
                }
            }
            Precondition::IfUnmodifiedSince => {
                let Some(since) = conditionals.not_modified_since() else {
                    return Continue;
                };
                match subject.last_modified {
                    Some(modified) if modified <= since => Continue,
                    _ => Resolved(PreconditionFailed),
                }
            }
            Precondition::IfModifiedSince => {
                let Some(since) = conditionals.modified_since() else {
                    return Continue;
                };
                if !subject.safe_method {
                    return Continue;
                }
                match subject.last_modified {
                    Some(modified) if modified > since => Resolved(ValidationStatus::Ok),
                    Some(modified) if modified == since => NotModifiedCandidate,
                    // Older than the client's baseline, or no timestamp at all.
                    _ => Resolved(PreconditionFailed),
                }
            }
        }
    }
}
