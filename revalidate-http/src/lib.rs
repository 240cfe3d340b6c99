#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// `Cache-Control` request directive tokenizer and age parsing.
pub mod cache_control;

/// HTTP-date parsing and formatting.
pub mod date;

/// Error returned by strict header checks.
pub mod error;

mod parser;
mod response;

pub use error::HeaderValidationError;
pub use parser::{ConditionalsParser, FromHeaders, ParserConfig};
pub use response::ResponseDirectives;
