//! Request-level facade.
//!
//! [`Revalidator`] wires parsing, validation and response header emission
//! together for callers that hold an `http` request.

use chrono::{DateTime, Utc};
use http::HeaderMap;
use http::request::Parts;
use revalidate_core::{RequestConditionals, ResourceDescriptor, ValidationStatus};
use revalidate_http::ConditionalsParser;

use crate::config::Config;
use crate::validator::CacheValidator;

/// Outcome of [`Revalidator::evaluate`].
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// Status to respond with.
    pub status: ValidationStatus,
    /// Cache headers to attach. Empty for `412`.
    pub headers: HeaderMap,
}

/// Parses a request's conditional headers and validates them against a resource.
#[derive(Debug, Clone, Default)]
pub struct Revalidator {
    config: Config,
    parser: ConditionalsParser,
    validator: CacheValidator,
}

impl Revalidator {
    /// Creates a revalidator from configuration.
    pub fn new(config: Config) -> Self {
        let parser = ConditionalsParser::new(config.parser.clone());
        Self {
            config,
            parser,
            validator: CacheValidator::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parses the conditional headers of a request.
    pub fn conditionals(&self, headers: &HeaderMap) -> RequestConditionals {
        self.parser.parse(headers)
    }

    /// Evaluates a request using the current wall-clock time.
    pub fn evaluate<D>(&self, parts: &Parts, resource: &D) -> Evaluation
    where
        D: ResourceDescriptor + ?Sized,
    {
        self.evaluate_at(parts, resource, Utc::now())
    }

    /// Evaluates a request as of `now`.
    ///
    /// Requests without any recognized conditional or cache-control header
    /// skip validation and always get `200`.
    pub fn evaluate_at<D>(&self, parts: &Parts, resource: &D, now: DateTime<Utc>) -> Evaluation
    where
        D: ResourceDescriptor + ?Sized,
    {
        let conditionals = self.conditionals(&parts.headers);
        let status = if conditionals.has_conditionals() {
            self.validator
                .validate_at(&conditionals, resource, &parts.method, now)
        } else {
            ValidationStatus::Ok
        };

        let headers = match status {
            ValidationStatus::PreconditionFailed => HeaderMap::new(),
            ValidationStatus::Ok | ValidationStatus::NotModified => {
                self.config.response.headers(resource, now)
            }
        };

        Evaluation { status, headers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;
    use revalidate_core::Resource;

    fn parts(builder: http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_unconditional_request_is_ok() {
        let evaluation = Revalidator::default().evaluate(
            &parts(Request::get("/")),
            &Resource::new().with_etag("abc"),
        );
        assert_eq!(evaluation.status, ValidationStatus::Ok);
        assert_eq!(evaluation.headers["etag"], "\"abc\"");
    }

    #[test]
    fn test_precondition_failed_has_no_headers() {
        let evaluation = Revalidator::default().evaluate(
            &parts(Request::put("/").header("if-match", "\"old\"")),
            &Resource::new().with_etag("new"),
        );
        assert_eq!(evaluation.status, ValidationStatus::PreconditionFailed);
        assert!(evaluation.headers.is_empty());
    }
}
