#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Configuration types.
///
/// [`Config`] combines the parser settings and the response cache directives
/// and can be loaded from YAML.
pub mod config;

/// Freshness arithmetic applied to `304` candidates.
pub mod freshness;

/// Ordered precondition rules.
///
/// [`PRECONDITION_ORDER`](precondition::PRECONDITION_ORDER) fixes the
/// RFC 7232 evaluation order: `If-Match`, `If-None-Match`,
/// `If-Unmodified-Since`, `If-Modified-Since`.
pub mod precondition;

mod revalidator;
mod validator;

pub use config::{Config, ConfigError};
pub use revalidator::{Evaluation, Revalidator};
pub use validator::CacheValidator;

pub use revalidate_core::{
    AgeDirective, EntityTag, RequestConditionals, RequestConditionalsBuilder, Resource,
    ResourceDescriptor, TagCondition, ValidationStatus,
};
pub use revalidate_http::{
    ConditionalsParser, FromHeaders, HeaderValidationError, ParserConfig, ResponseDirectives,
};

/// The `revalidate` prelude.
///
/// ```rust
/// use revalidate::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CacheValidator, FromHeaders, RequestConditionals, Resource, ResourceDescriptor,
        Revalidator, ValidationStatus,
    };
}
