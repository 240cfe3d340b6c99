//! Entity tags and tag conditions.
//!
//! An [`EntityTag`] is an opaque identifier for one representation of a
//! resource. Tags are compared by exact string equality only; this crate has
//! no notion of weak comparison.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Opaque strong entity tag, stored without surrounding quotes.
///
/// # Examples
///
/// ```
/// use revalidate_core::EntityTag;
///
/// let quoted = EntityTag::new("\"abc\"").unwrap();
/// let bare = EntityTag::new("abc").unwrap();
/// assert_eq!(quoted, bare);
/// assert_eq!(quoted.as_str(), "abc");
///
/// assert!(EntityTag::new("\"\"").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityTag(SmolStr);

impl EntityTag {
    /// Creates a tag from a raw value.
    ///
    /// Surrounding whitespace and one pair of surrounding double quotes are
    /// removed. Returns `None` if nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(trimmed);
        if unquoted.is_empty() {
            None
        } else {
            Some(EntityTag(SmolStr::new(unquoted)))
        }
    }

    /// Returns the unquoted tag.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the tag wrapped in double quotes, as sent in an `ETag` header.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of an `If-Match` or `If-None-Match` condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagCondition {
    /// The `*` wildcard: any current representation.
    Any,
    /// A single strong tag.
    Tag(EntityTag),
}

impl TagCondition {
    /// Returns `true` if the condition is the `*` wildcard.
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, TagCondition::Any)
    }

    /// Checks the condition against a resource tag.
    ///
    /// The wildcard matches any tag before any literal comparison takes place.
    pub fn matches(&self, etag: &EntityTag) -> bool {
        match self {
            TagCondition::Any => true,
            TagCondition::Tag(tag) => tag == etag,
        }
    }
}

impl fmt::Display for TagCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagCondition::Any => f.write_str("*"),
            TagCondition::Tag(tag) => write!(f, "\"{tag}\""),
        }
    }
}
