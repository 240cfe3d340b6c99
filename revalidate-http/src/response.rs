//! Response cache header serialization.
//!
//! [`ResponseDirectives`] describes how a response may be cached and, given
//! the resource identity, renders the `Cache-Control`, `ETag`,
//! `Last-Modified`, `Expires`, `Vary` and `Age` headers sent with a full or
//! not-modified response.

use chrono::{DateTime, TimeDelta, Utc};
use http::header::{AGE, CACHE_CONTROL, ETAG, EXPIRES, HeaderName, LAST_MODIFIED, VARY};
use http::{HeaderMap, HeaderValue};
use revalidate_core::ResourceDescriptor;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::format_http_date;

/// Response cache directives.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use revalidate_core::Resource;
/// use revalidate_http::ResponseDirectives;
///
/// let directives = ResponseDirectives {
///     public: true,
///     max_age: Some(60),
///     ..Default::default()
/// };
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let headers = directives.headers(&Resource::new().with_etag("v1"), now);
///
/// assert_eq!(headers["cache-control"], "public, max-age=60");
/// assert_eq!(headers["etag"], "\"v1\"");
/// assert_eq!(headers["expires"], "Mon, 01 Jan 2024 00:01:00 GMT");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseDirectives {
    /// `public`
    pub public: bool,
    /// `private`
    pub private: bool,
    /// `no-cache`
    pub no_cache: bool,
    /// `no-store`
    pub no_store: bool,
    /// `no-transform`
    pub no_transform: bool,
    /// `must-revalidate`
    pub must_revalidate: bool,
    /// `proxy-revalidate`
    pub proxy_revalidate: bool,
    /// `max-age=N`, also drives `Expires`.
    pub max_age: Option<u32>,
    /// `s-maxage=N`
    pub s_maxage: Option<u32>,
    /// Request header names listed in `Vary`.
    pub vary: Vec<String>,
}

impl ResponseDirectives {
    /// Renders the `Cache-Control` value, or `None` when no directive is set.
    ///
    /// Directives appear in a fixed order: `public`, `private`, `no-cache`,
    /// `no-store`, `no-transform`, `must-revalidate`, `proxy-revalidate`,
    /// `max-age`, `s-maxage`.
    pub fn cache_control(&self) -> Option<String> {
        let flags = [
            (self.public, "public"),
            (self.private, "private"),
            (self.no_cache, "no-cache"),
            (self.no_store, "no-store"),
            (self.no_transform, "no-transform"),
            (self.must_revalidate, "must-revalidate"),
            (self.proxy_revalidate, "proxy-revalidate"),
        ];
        let mut parts: Vec<String> = flags
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, name)| (*name).to_owned())
            .collect();
        if let Some(max_age) = self.max_age {
            parts.push(format!("max-age={max_age}"));
        }
        if let Some(s_maxage) = self.s_maxage {
            parts.push(format!("s-maxage={s_maxage}"));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Renders the response cache headers for `resource` as of `now`.
    ///
    /// `ETag` is always double-quoted. `Age` is only emitted when the resource
    /// has a timestamp that is not in the future. Values that cannot be
    /// represented as header values are skipped.
    pub fn headers<D>(&self, resource: &D, now: DateTime<Utc>) -> HeaderMap
    where
        D: ResourceDescriptor + ?Sized,
    {
        let mut headers = HeaderMap::new();

        if let Some(value) = self.cache_control() {
            insert(&mut headers, CACHE_CONTROL, &value);
        }
        if let Some(tag) = resource.entity_tag() {
            insert(&mut headers, ETAG, &tag.quoted());
        }
        if let Some(last_modified) = resource.last_modified() {
            insert(&mut headers, LAST_MODIFIED, &format_http_date(last_modified));
            let age = now.signed_duration_since(last_modified).num_seconds();
            if age >= 0 {
                insert(&mut headers, AGE, &age.to_string());
            }
        }
        if let Some(expires) = self
            .max_age
            .and_then(|max_age| now.checked_add_signed(TimeDelta::seconds(i64::from(max_age))))
        {
            insert(&mut headers, EXPIRES, &format_http_date(expires));
        }
        if !self.vary.is_empty() {
            insert(&mut headers, VARY, &self.vary.join(", "));
        }

        headers
    }
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(error) => debug!(header = %name, value, %error, "skipping unrepresentable cache header"),
    }
}
