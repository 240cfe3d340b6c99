use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use http::request::Parts;
use http::{Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use revalidate::{Config, Resource, Revalidator, ValidationStatus};

fn modified() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap()
}

fn now() -> DateTime<Utc> {
    modified() + TimeDelta::minutes(10)
}

fn parts(method: Method, headers: &[(&str, &str)]) -> Parts {
    let mut builder = Request::builder().method(method).uri("/resource");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(()).unwrap().into_parts().0
}

fn resource() -> Resource {
    Resource::new().with_etag("33a64df5").with_last_modified(modified())
}

fn config() -> Config {
    Config::from_yaml(
        r#"
parser:
  etag_suffixes: ["-gzip"]
response:
  public: true
  max_age: 60
  vary: [accept-encoding]
"#,
    )
    .expect("failed to load config")
}

#[test]
fn test_config_from_yaml() {
    let config = config();
    assert_eq!(config.parser.etag_suffixes, vec!["-gzip"]);
    assert!(config.response.public);
    assert_eq!(config.response.max_age, Some(60));
    assert_eq!(config.response.vary, vec!["accept-encoding"]);
}

#[test]
fn test_config_empty_document_is_default() {
    let config = Config::from_yaml("{}").expect("failed to load config");
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_rejects_wrong_types() {
    let result = Config::from_yaml("response:\n  max_age: soon\n");
    assert!(result.is_err());
}

#[test]
fn test_not_modified_carries_cache_headers() {
    let revalidator = Revalidator::new(config());
    let evaluation = revalidator.evaluate_at(
        &parts(Method::GET, &[("if-none-match", "\"33a64df5-gzip\"")]),
        &resource(),
        now(),
    );

    assert_eq!(evaluation.status, ValidationStatus::NotModified);
    assert_eq!(StatusCode::from(evaluation.status), StatusCode::NOT_MODIFIED);
    assert_eq!(evaluation.headers["cache-control"], "public, max-age=60");
    assert_eq!(evaluation.headers["etag"], "\"33a64df5\"");
    assert_eq!(
        evaluation.headers["last-modified"],
        "Wed, 21 Oct 2015 07:28:00 GMT"
    );
    assert_eq!(evaluation.headers["expires"], "Wed, 21 Oct 2015 07:39:00 GMT");
    assert_eq!(evaluation.headers["vary"], "accept-encoding");
}

#[test]
fn test_http_date_round_trip_through_headers() {
    let evaluation = Revalidator::default().evaluate_at(
        &parts(
            Method::HEAD,
            &[("if-modified-since", "Wednesday, 21-Oct-15 07:28:00 GMT")],
        ),
        &resource(),
        now(),
    );
    assert_eq!(evaluation.status, ValidationStatus::NotModified);
}

#[test]
fn test_request_max_age_forces_full_response() {
    let evaluation = Revalidator::default().evaluate_at(
        &parts(
            Method::GET,
            &[
                ("if-modified-since", "Wed, 21 Oct 2015 07:28:00 GMT"),
                ("cache-control", "max-age=0"),
            ],
        ),
        &resource(),
        now(),
    );
    assert_eq!(evaluation.status, ValidationStatus::Ok);
    assert_eq!(evaluation.headers["etag"], "\"33a64df5\"");
}

#[test]
fn test_failed_precondition() {
    let evaluation = Revalidator::new(config()).evaluate_at(
        &parts(Method::PUT, &[("if-match", "\"stale\"")]),
        &resource(),
        now(),
    );
    assert_eq!(evaluation.status, ValidationStatus::PreconditionFailed);
    assert_eq!(
        StatusCode::from(evaluation.status),
        StatusCode::PRECONDITION_FAILED
    );
    assert!(evaluation.headers.is_empty());
}

#[test]
fn test_malformed_header_is_ignored() {
    let evaluation = Revalidator::default().evaluate_at(
        &parts(Method::GET, &[("if-modified-since", "yesterday")]),
        &Resource::new(),
        now(),
    );
    assert_eq!(evaluation.status, ValidationStatus::Ok);
}

#[test]
fn test_weak_tag_is_ignored() {
    let evaluation = Revalidator::default().evaluate_at(
        &parts(Method::GET, &[("if-none-match", "W/\"33a64df5\"")]),
        &resource(),
        now(),
    );
    assert_eq!(evaluation.status, ValidationStatus::Ok);
}

#[test]
fn test_no_store_bypasses_preconditions() {
    let evaluation = Revalidator::default().evaluate_at(
        &parts(
            Method::DELETE,
            &[("if-match", "\"stale\""), ("cache-control", "no-store")],
        ),
        &resource(),
        now(),
    );
    assert_eq!(evaluation.status, ValidationStatus::Ok);
}

#[test]
fn test_conditionals_accessor() {
    let revalidator = Revalidator::default();
    let conditionals = revalidator.conditionals(
        &parts(Method::GET, &[("cache-control", "max-stale")]).headers,
    );
    assert!(conditionals.has_conditionals());
    assert!(conditionals.max_stale_age().unwrap().is_unbounded());
}
