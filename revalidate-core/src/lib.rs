#![warn(missing_docs)]
//! # revalidate-core
//!
//! Core types for conditional request validation.
//!
//! This crate does no parsing: it holds the already-sanitized values
//! a validator works with, but knows nothing about how they were read off the
//! wire. `revalidate-http` builds these values from HTTP headers and
//! `revalidate` turns them into a decision.
//!
//! ## Overview
//!
//! - [`RequestConditionals`] - what the client asked for (`If-Match`,
//!   `If-None-Match`, `If-Modified-Since`, `If-Unmodified-Since`, `Cache-Control`)
//! - [`ResourceDescriptor`] - what the server knows about the resource
//!   (entity tag and last modification instant)
//! - [`ValidationStatus`] - the outcome (`200`, `304` or `412`)
//!
//! Every value in [`RequestConditionals`] is either absent or valid. Malformed
//! input is degraded to "absent" before it reaches this crate, so the types
//! here cannot represent an unparsed header.

pub mod age;
pub mod conditionals;
pub mod descriptor;
pub mod status;
pub mod tag;

pub use age::AgeDirective;
pub use conditionals::{RequestConditionals, RequestConditionalsBuilder};
pub use descriptor::{Resource, ResourceDescriptor};
pub use status::ValidationStatus;
pub use tag::{EntityTag, TagCondition};

#[doc(hidden)]
pub use smol_str::SmolStr;
