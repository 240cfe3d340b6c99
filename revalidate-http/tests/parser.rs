use chrono::{TimeZone, Utc};
use http::header::{CACHE_CONTROL, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_UNMODIFIED_SINCE};
use http::{HeaderMap, HeaderValue};
use pretty_assertions::assert_eq;
use revalidate_core::{AgeDirective, EntityTag, RequestConditionals, TagCondition};
use revalidate_http::{ConditionalsParser, FromHeaders, HeaderValidationError, ParserConfig};

fn headers(pairs: &[(http::HeaderName, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.append(name.clone(), HeaderValue::from_str(value).unwrap());
    }
    map
}

fn tag(value: &str) -> TagCondition {
    TagCondition::Tag(EntityTag::new(value).unwrap())
}

#[test]
fn test_full_request() {
    let map = headers(&[
        (IF_MATCH, "\"v1\""),
        (IF_NONE_MATCH, "*"),
        (IF_MODIFIED_SINCE, "Sun, 06 Nov 1994 08:49:37 GMT"),
        (IF_UNMODIFIED_SINCE, "Sunday, 06-Nov-94 08:49:37 GMT"),
        (
            CACHE_CONTROL,
            "no-transform, max-age=60, s-maxage=120, min-fresh=5, x-unknown=1",
        ),
    ]);

    let conditionals = RequestConditionals::from_headers(&map);
    let instant = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();

    let expected = RequestConditionals::builder()
        .matching_etag(tag("v1"))
        .not_matching_etag(TagCondition::Any)
        .modified_since(instant)
        .not_modified_since(instant)
        .no_transform(true)
        .max_age(AgeDirective::from_i64(60))
        .max_stale_age(AgeDirective::from_i64(120))
        .min_fresh_age(AgeDirective::from_i64(5))
        .build();

    assert_eq!(conditionals, expected);
}

#[test]
fn test_no_headers() {
    let conditionals = RequestConditionals::from_headers(&HeaderMap::new());
    assert_eq!(conditionals, RequestConditionals::default());
    assert!(!conditionals.has_conditionals());
}

#[test]
fn test_unrelated_headers_are_not_conditionals() {
    let map = headers(&[(http::header::ACCEPT, "text/html")]);
    assert!(!RequestConditionals::from_headers(&map).has_conditionals());
}

#[test]
fn test_malformed_values_degrade_to_absent() {
    let map = headers(&[
        (IF_MATCH, "W/\"weak\""),
        (IF_NONE_MATCH, "\"a\", \"b\""),
        (IF_MODIFIED_SINCE, "tomorrow"),
        (IF_UNMODIFIED_SINCE, ""),
        (CACHE_CONTROL, "max-age=abc, max-stale=, min-fresh=1e3"),
    ]);

    let conditionals = RequestConditionals::from_headers(&map);

    assert!(conditionals.has_conditionals());
    assert!(!conditionals.has_preconditions());
    assert_eq!(conditionals.max_age(), None);
    assert_eq!(conditionals.max_stale_age(), None);
    assert_eq!(conditionals.min_fresh_age(), None);
}

#[test]
fn test_non_ascii_value_is_absent() {
    let mut map = HeaderMap::new();
    map.insert(IF_NONE_MATCH, HeaderValue::from_bytes(b"\"\xff\"").unwrap());

    let conditionals = RequestConditionals::from_headers(&map);
    assert!(conditionals.not_matching_etag().is_none());
    assert!(conditionals.has_conditionals());

    let error = ConditionalsParser::default().check(&map).unwrap_err();
    assert_eq!(error, HeaderValidationError::NonAscii { name: IF_NONE_MATCH });
}

#[test]
fn test_age_clamping() {
    let map = headers(&[(
        CACHE_CONTROL,
        "max-age=-10, max-stale=4294967296, min-fresh=2147483647",
    )]);

    let conditionals = RequestConditionals::from_headers(&map);
    assert_eq!(conditionals.max_age(), Some(AgeDirective::UNBOUNDED));
    assert_eq!(conditionals.max_stale_age(), Some(AgeDirective::MAX));
    assert_eq!(conditionals.min_fresh_age(), Some(AgeDirective::MAX));
}

#[test]
fn test_custom_suffixes() {
    let parser = ConditionalsParser::new(ParserConfig {
        etag_suffixes: vec![";gzip".to_owned()],
    });
    let map = headers(&[(IF_MATCH, "\"abc\";gzip"), (IF_NONE_MATCH, "\"abc-gzip\"")]);

    let conditionals = parser.parse(&map);
    assert_eq!(conditionals.matching_etag(), Some(&tag("abc")));
    assert_eq!(conditionals.not_matching_etag(), Some(&tag("abc-gzip")));
}

#[test]
fn test_strict_reports_offending_header() {
    let map = headers(&[(IF_MODIFIED_SINCE, "yesterday")]);

    let error = ConditionalsParser::default().parse_strict(&map).unwrap_err();
    assert_eq!(error.name(), &IF_MODIFIED_SINCE);
    assert_eq!(error.value(), Some("yesterday"));
    assert_eq!(
        error.to_string(),
        "invalid if-modified-since header value \"yesterday\": not an HTTP-date"
    );
}

#[test]
fn test_strict_accepts_well_formed_request() {
    let map = headers(&[
        (IF_NONE_MATCH, "\"v2\""),
        (CACHE_CONTROL, "max-stale, private"),
    ]);
    let conditionals = ConditionalsParser::default().parse_strict(&map).unwrap();
    assert_eq!(conditionals.not_matching_etag(), Some(&tag("v2")));
    assert_eq!(conditionals.max_stale_age(), Some(AgeDirective::UNBOUNDED));
}

#[test]
fn test_strict_rejects_repeated_tags() {
    let map = headers(&[(IF_MATCH, "\"a\""), (IF_MATCH, "\"b\"")]);
    let error = ConditionalsParser::default().check(&map).unwrap_err();
    assert_eq!(error.value(), Some("\"a\", \"b\""));
}

#[test]
fn test_first_date_wins() {
    let map = headers(&[
        (IF_MODIFIED_SINCE, "Sun, 06 Nov 1994 08:49:37 GMT"),
        (IF_MODIFIED_SINCE, "Mon, 07 Nov 1994 08:49:37 GMT"),
    ]);
    assert_eq!(
        RequestConditionals::from_headers(&map).modified_since(),
        Some(Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap())
    );
}
