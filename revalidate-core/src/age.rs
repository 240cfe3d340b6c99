//! Clamped `Cache-Control` age values.

use std::fmt;

/// A `max-age`, `max-stale` or `min-fresh` value in seconds.
///
/// Values are clamped on construction: anything negative collapses to the
/// [`UNBOUNDED`](Self::UNBOUNDED) sentinel (`-1`), anything above
/// `i32::MAX` collapses to [`MAX`](Self::MAX).
///
/// # Examples
///
/// ```
/// use revalidate_core::AgeDirective;
///
/// assert_eq!(AgeDirective::from_i64(60).seconds(), 60);
/// assert!(AgeDirective::from_i64(-42).is_unbounded());
/// assert_eq!(AgeDirective::from_i64(i64::MAX), AgeDirective::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgeDirective(i32);

impl AgeDirective {
    /// The `-1` sentinel: unbounded, or stale immediately depending on the directive.
    pub const UNBOUNDED: AgeDirective = AgeDirective(-1);

    /// Largest representable age.
    pub const MAX: AgeDirective = AgeDirective(i32::MAX);

    /// Creates a directive from seconds, clamping to the valid range.
    pub fn from_i64(seconds: i64) -> Self {
        if seconds < 0 {
            Self::UNBOUNDED
        } else {
            AgeDirective(i32::try_from(seconds).unwrap_or(i32::MAX))
        }
    }

    /// Returns the value in seconds. The sentinel is returned as `-1`.
    #[inline]
    pub const fn seconds(&self) -> i64 {
        self.0 as i64
    }

    /// Returns `true` for the `-1` sentinel.
    #[inline]
    pub const fn is_unbounded(&self) -> bool {
        self.0 == -1
    }
}

impl From<i32> for AgeDirective {
    fn from(seconds: i32) -> Self {
        Self::from_i64(i64::from(seconds))
    }
}

impl fmt::Display for AgeDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
