//! Conditional header parsing.
//!
//! [`ConditionalsParser`] turns request headers into a [`RequestConditionals`].
//! Malformed values never fail the parse: each one is dropped (and logged at
//! `debug`) as if the header had not been sent. The same rules back the
//! strict variant, which reports the first rejected value instead.

use http::HeaderMap;
use http::header::{
    CACHE_CONTROL, HeaderName, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_UNMODIFIED_SINCE,
};
use revalidate_core::{
    AgeDirective, EntityTag, RequestConditionals, RequestConditionalsBuilder, TagCondition,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache_control::{KnownDirective, directives, parse_age};
use crate::date::parse_http_date;
use crate::error::HeaderValidationError;

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Suffixes appended to entity tags by compressing proxies (for example
    /// Apache's `mod_deflate` turns `"abc"` into `"abc-gzip"`). They are
    /// removed before tags are compared.
    pub etag_suffixes: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            etag_suffixes: vec!["-gzip".to_owned(), "-br".to_owned()],
        }
    }
}

/// Recognized request headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    IfMatch,
    IfNoneMatch,
    IfModifiedSince,
    IfUnmodifiedSince,
    CacheControl,
}

impl Field {
    const ALL: [Field; 5] = [
        Field::IfMatch,
        Field::IfNoneMatch,
        Field::IfModifiedSince,
        Field::IfUnmodifiedSince,
        Field::CacheControl,
    ];

    fn header_name(self) -> HeaderName {
        match self {
            Field::IfMatch => IF_MATCH,
            Field::IfNoneMatch => IF_NONE_MATCH,
            Field::IfModifiedSince => IF_MODIFIED_SINCE,
            Field::IfUnmodifiedSince => IF_UNMODIFIED_SINCE,
            Field::CacheControl => CACHE_CONTROL,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.header_name().as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// Raw values of the recognized headers, in arrival order.
/// `None` marks a value with non-ASCII bytes.
#[derive(Debug, Default)]
struct Collected<'a> {
    if_match: Vec<Option<&'a str>>,
    if_none_match: Vec<Option<&'a str>>,
    modified_since: Vec<Option<&'a str>>,
    unmodified_since: Vec<Option<&'a str>>,
    cache_control: Vec<Option<&'a str>>,
}

impl<'a> Collected<'a> {
    fn push(&mut self, field: Field, value: Option<&'a str>) {
        let slot = match field {
            Field::IfMatch => &mut self.if_match,
            Field::IfNoneMatch => &mut self.if_none_match,
            Field::IfModifiedSince => &mut self.modified_since,
            Field::IfUnmodifiedSince => &mut self.unmodified_since,
            Field::CacheControl => &mut self.cache_control,
        };
        slot.push(value);
    }

    fn from_header_map(headers: &'a HeaderMap) -> Self {
        let mut collected = Collected::default();
        for field in Field::ALL {
            for value in headers.get_all(field.header_name()) {
                collected.push(field, value.to_str().ok());
            }
        }
        collected
    }

    fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut collected = Collected::default();
        for (name, value) in pairs {
            if let Some(field) = Field::from_name(name) {
                collected.push(field, Some(value));
            }
        }
        collected
    }
}

/// Builds [`RequestConditionals`] from request headers.
///
/// # Examples
///
/// ```
/// use http::HeaderMap;
/// use revalidate_core::TagCondition;
/// use revalidate_http::ConditionalsParser;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("if-none-match", "\"abc-gzip\"".parse().unwrap());
/// headers.insert("if-modified-since", "not a date".parse().unwrap());
///
/// let conditionals = ConditionalsParser::default().parse(&headers);
///
/// assert!(matches!(
///     conditionals.not_matching_etag(),
///     Some(TagCondition::Tag(tag)) if tag.as_str() == "abc"
/// ));
/// // Malformed values are absent, not errors.
/// assert!(conditionals.modified_since().is_none());
/// assert!(conditionals.has_conditionals());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConditionalsParser {
    config: ParserConfig,
}

impl ConditionalsParser {
    /// Creates a parser with the given configuration.
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a header map, degrading malformed values to absent.
    pub fn parse(&self, headers: &HeaderMap) -> RequestConditionals {
        self.lenient(Collected::from_header_map(headers))
    }

    /// Parses arbitrary `(name, value)` pairs. Names are matched
    /// case-insensitively; unrecognized names are ignored.
    ///
    /// ```
    /// use revalidate_http::ConditionalsParser;
    ///
    /// let conditionals = ConditionalsParser::default()
    ///     .parse_pairs([("Cache-Control", "no-cache"), ("X-Other", "1")]);
    /// assert!(conditionals.no_cache());
    /// ```
    pub fn parse_pairs<'a, I>(&self, pairs: I) -> RequestConditionals
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.lenient(Collected::from_pairs(pairs))
    }

    /// Parses a header map, failing on the first malformed recognized header.
    pub fn parse_strict(
        &self,
        headers: &HeaderMap,
    ) -> Result<RequestConditionals, HeaderValidationError> {
        let (conditionals, rejected) = self.evaluate(Collected::from_header_map(headers));
        match rejected.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(conditionals),
        }
    }

    /// Checks a header map without keeping the parsed values.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), HeaderValidationError> {
        self.parse_strict(headers).map(|_| ())
    }

    fn lenient(&self, collected: Collected<'_>) -> RequestConditionals {
        let (conditionals, rejected) = self.evaluate(collected);
        for error in rejected {
            debug!(header = %error.name(), %error, "discarding malformed conditional header");
        }
        conditionals
    }

    fn evaluate(
        &self,
        collected: Collected<'_>,
    ) -> (RequestConditionals, Vec<HeaderValidationError>) {
        let mut rejected = Vec::new();
        let mut builder = RequestConditionals::builder();

        if !collected.if_match.is_empty() {
            builder = builder.seen();
            match self.tag_condition(IF_MATCH, &collected.if_match) {
                Ok(condition) => builder = builder.matching_etag(condition),
                Err(error) => rejected.push(error),
            }
        }

        if !collected.if_none_match.is_empty() {
            builder = builder.seen();
            match self.tag_condition(IF_NONE_MATCH, &collected.if_none_match) {
                Ok(condition) => builder = builder.not_matching_etag(condition),
                Err(error) => rejected.push(error),
            }
        }

        if let Some(first) = collected.modified_since.first() {
            builder = builder.seen();
            match http_date(IF_MODIFIED_SINCE, *first) {
                Ok(instant) => builder = builder.modified_since(instant),
                Err(error) => rejected.push(error),
            }
        }

        if let Some(first) = collected.unmodified_since.first() {
            builder = builder.seen();
            match http_date(IF_UNMODIFIED_SINCE, *first) {
                Ok(instant) => builder = builder.not_modified_since(instant),
                Err(error) => rejected.push(error),
            }
        }

        if !collected.cache_control.is_empty() {
            builder = builder.seen();
            for line in &collected.cache_control {
                match line {
                    Some(line) => builder = cache_control(builder, line, &mut rejected),
                    None => rejected.push(HeaderValidationError::NonAscii {
                        name: CACHE_CONTROL,
                    }),
                }
            }
        }

        (builder.build(), rejected)
    }

    /// Accepts exactly one strong tag or the `*` wildcard.
    fn tag_condition(
        &self,
        name: HeaderName,
        values: &[Option<&str>],
    ) -> Result<TagCondition, HeaderValidationError> {
        let raw = match values {
            [Some(raw)] => *raw,
            [None] => return Err(HeaderValidationError::NonAscii { name }),
            _ => {
                let joined = values.iter().flatten().copied().collect::<Vec<_>>().join(", ");
                return Err(HeaderValidationError::invalid(
                    name,
                    &joined,
                    "multiple entity tags",
                ));
            }
        };

        let value = raw.trim();
        if value == "*" {
            return Ok(TagCondition::Any);
        }
        if value.contains(',') {
            return Err(HeaderValidationError::invalid(
                name,
                raw,
                "multiple entity tags",
            ));
        }
        if value.contains("W/") {
            return Err(HeaderValidationError::invalid(name, raw, "weak entity tag"));
        }

        // Proxies append the suffix either inside or after the quotes.
        let value = self.strip_suffix(value);
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        let value = self.strip_suffix(value);

        EntityTag::new(value)
            .map(TagCondition::Tag)
            .ok_or_else(|| HeaderValidationError::invalid(name, raw, "empty entity tag"))
    }

    fn strip_suffix<'v>(&self, value: &'v str) -> &'v str {
        self.config
            .etag_suffixes
            .iter()
            .filter(|suffix| !suffix.is_empty())
            .find_map(|suffix| value.strip_suffix(suffix.as_str()))
            .unwrap_or(value)
    }
}

fn http_date(
    name: HeaderName,
    value: Option<&str>,
) -> Result<chrono::DateTime<chrono::Utc>, HeaderValidationError> {
    let value = value.ok_or_else(|| HeaderValidationError::NonAscii { name: name.clone() })?;
    parse_http_date(value)
        .ok_or_else(|| HeaderValidationError::invalid(name, value, "not an HTTP-date"))
}

/// Folds one `Cache-Control` line into the builder. Later directives win.
fn cache_control(
    mut builder: RequestConditionalsBuilder,
    line: &str,
    rejected: &mut Vec<HeaderValidationError>,
) -> RequestConditionalsBuilder {
    for directive in directives(line) {
        let Some(known) = KnownDirective::from_name(directive.name) else {
            continue;
        };
        builder = match known {
            KnownDirective::NoCache => builder.no_cache(true),
            KnownDirective::NoStore => builder.no_store(true),
            KnownDirective::NoTransform => builder.no_transform(true),
            KnownDirective::OnlyIfCached => builder.cache_only(true),
            KnownDirective::MaxStale
                if directive.value.is_none() && directive.name.eq_ignore_ascii_case("max-stale") =>
            {
                builder.max_stale_age(AgeDirective::UNBOUNDED)
            }
            KnownDirective::MaxAge | KnownDirective::MaxStale | KnownDirective::MinFresh => {
                match directive.value.and_then(parse_age) {
                    Some(age) => match known {
                        KnownDirective::MaxAge => builder.max_age(age),
                        KnownDirective::MinFresh => builder.min_fresh_age(age),
                        _ => builder.max_stale_age(age),
                    },
                    None => {
                        rejected.push(HeaderValidationError::invalid(
                            CACHE_CONTROL,
                            line,
                            "non-numeric age directive",
                        ));
                        builder
                    }
                }
            }
        };
    }
    builder
}

/// Parses [`RequestConditionals`] with the default [`ParserConfig`].
pub trait FromHeaders: Sized {
    /// Parses a header map, degrading malformed values to absent.
    fn from_headers(headers: &HeaderMap) -> Self;
}

impl FromHeaders for RequestConditionals {
    fn from_headers(headers: &HeaderMap) -> Self {
        ConditionalsParser::default().parse(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pairs: &[(&str, &str)]) -> RequestConditionals {
        ConditionalsParser::default().parse_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_field_names_case_insensitive() {
        assert_eq!(Field::from_name("IF-NONE-MATCH"), Some(Field::IfNoneMatch));
        assert_eq!(Field::from_name("If-Modified-Since"), Some(Field::IfModifiedSince));
        assert_eq!(Field::from_name("if-range"), None);
    }

    #[test]
    fn test_wildcard() {
        let conditionals = parse(&[("If-Match", " * ")]);
        assert_eq!(conditionals.matching_etag(), Some(&TagCondition::Any));
    }

    #[test]
    fn test_suffix_outside_quotes() {
        let conditionals = parse(&[("If-None-Match", "\"abc\"-br")]);
        assert_eq!(
            conditionals.not_matching_etag(),
            Some(&TagCondition::Tag(EntityTag::new("abc").unwrap()))
        );
    }

    #[test]
    fn test_rejected_tags_are_absent() {
        for raw in ["W/\"abc\"", "\"a\", \"b\"", "\"\"", "\"-gzip\"", ""] {
            let conditionals = parse(&[("If-None-Match", raw)]);
            assert!(conditionals.not_matching_etag().is_none(), "{raw}");
            assert!(conditionals.has_conditionals(), "{raw}");
        }
    }

    #[test]
    fn test_repeated_tag_header_is_absent() {
        let conditionals = parse(&[("If-Match", "\"a\""), ("if-match", "\"b\"")]);
        assert!(conditionals.matching_etag().is_none());
    }

    #[test]
    fn test_bare_max_stale_is_unbounded() {
        let conditionals = parse(&[("Cache-Control", "max-stale")]);
        assert_eq!(conditionals.max_stale_age(), Some(AgeDirective::UNBOUNDED));
    }

    #[test]
    fn test_bare_s_maxage_is_absent() {
        let conditionals = parse(&[("Cache-Control", "s-maxage")]);
        assert_eq!(conditionals.max_stale_age(), None);
    }

    #[test]
    fn test_cache_control_lines_are_combined() {
        let conditionals = parse(&[
            ("Cache-Control", "no-transform"),
            ("Cache-Control", "min-fresh=30, only-if-cached"),
        ]);
        assert!(conditionals.no_transform());
        assert!(conditionals.cache_only());
        assert_eq!(conditionals.min_fresh_age(), Some(AgeDirective::from_i64(30)));
    }
}
