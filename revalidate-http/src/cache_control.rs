//! `Cache-Control` request directive tokenizer.

use std::num::IntErrorKind;

use revalidate_core::AgeDirective;

/// A single `name[=value]` token of a `Cache-Control` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Directive name as written; compare with `eq_ignore_ascii_case`.
    pub name: &'a str,
    /// Unquoted argument, if any.
    pub value: Option<&'a str>,
}

/// Request directives this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownDirective {
    /// `no-cache`
    NoCache,
    /// `no-store`
    NoStore,
    /// `no-transform`
    NoTransform,
    /// `only-if-cached`
    OnlyIfCached,
    /// `max-age=N`
    MaxAge,
    /// `max-stale[=N]`, and the proxy-scoped `s-maxage=N` folded into it
    MaxStale,
    /// `min-fresh=N`
    MinFresh,
}

impl KnownDirective {
    /// Looks up a directive by its case-insensitive name.
    pub fn from_name(name: &str) -> Option<Self> {
        const NAMES: [(&str, KnownDirective); 8] = [
            ("no-cache", KnownDirective::NoCache),
            ("no-store", KnownDirective::NoStore),
            ("no-transform", KnownDirective::NoTransform),
            ("only-if-cached", KnownDirective::OnlyIfCached),
            ("max-age", KnownDirective::MaxAge),
            ("max-stale", KnownDirective::MaxStale),
            ("s-maxage", KnownDirective::MaxStale),
            ("min-fresh", KnownDirective::MinFresh),
        ];
        NAMES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, directive)| *directive)
    }
}

/// Splits a `Cache-Control` value into directives.
///
/// Empty tokens are skipped. Surrounding whitespace and a single pair of
/// double quotes around values are removed.
///
/// ```
/// use revalidate_http::cache_control::directives;
///
/// let tokens: Vec<_> = directives("no-cache, max-age=\"60\" ,, private")
///     .map(|d| (d.name, d.value))
///     .collect();
/// assert_eq!(
///     tokens,
///     vec![("no-cache", None), ("max-age", Some("60")), ("private", None)]
/// );
/// ```
pub fn directives(value: &str) -> impl Iterator<Item = Directive<'_>> {
    value.split(',').filter_map(|token| {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        let directive = match token.split_once('=') {
            Some((name, value)) => {
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                Directive {
                    name: name.trim(),
                    value: Some(value),
                }
            }
            None => Directive {
                name: token,
                value: None,
            },
        };
        Some(directive)
    })
}

/// Parses a delta-seconds argument with clamping.
///
/// Negative numbers become [`AgeDirective::UNBOUNDED`], numbers past
/// `i32::MAX` (including those that do not fit in 64 bits) become
/// [`AgeDirective::MAX`]. Anything non-numeric is `None`, never zero.
///
/// ```
/// use revalidate_core::AgeDirective;
/// use revalidate_http::cache_control::parse_age;
///
/// assert_eq!(parse_age("120"), Some(AgeDirective::from_i64(120)));
/// assert_eq!(parse_age("-5"), Some(AgeDirective::UNBOUNDED));
/// assert_eq!(parse_age("99999999999999999999999"), Some(AgeDirective::MAX));
/// assert_eq!(parse_age("soon"), None);
/// ```
pub fn parse_age(value: &str) -> Option<AgeDirective> {
    match value.trim().parse::<i64>() {
        Ok(seconds) => Some(AgeDirective::from_i64(seconds)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(AgeDirective::MAX),
            IntErrorKind::NegOverflow => Some(AgeDirective::UNBOUNDED),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_directive_case_insensitive() {
        assert_eq!(
            KnownDirective::from_name("Max-Age"),
            Some(KnownDirective::MaxAge)
        );
        assert_eq!(
            KnownDirective::from_name("S-MAXAGE"),
            Some(KnownDirective::MaxStale)
        );
        assert_eq!(KnownDirective::from_name("immutable"), None);
    }

    #[test]
    fn test_parse_age_rejects_non_numeric() {
        assert_eq!(parse_age(""), None);
        assert_eq!(parse_age("1.5"), None);
        assert_eq!(parse_age("0x10"), None);
    }

    #[test]
    fn test_parse_age_negative_overflow() {
        assert_eq!(
            parse_age("-99999999999999999999999"),
            Some(AgeDirective::UNBOUNDED)
        );
    }

    #[test]
    fn test_directive_with_spaces_around_equals() {
        let directive = directives("max-age = 10").next().unwrap();
        assert_eq!(directive.name, "max-age");
        assert_eq!(directive.value, Some("10"));
    }
}
