use anyhow::{Context, Error, anyhow};
use chrono::{DateTime, TimeZone, Utc};
use cucumber::World;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, Request};
use revalidate::{Config, Evaluation, Resource, Revalidator};
use revalidate_http::date::parse_http_date;

use crate::tracing::SpanCollector;

/// Name of the span opened by the validator.
pub const VALIDATE_SPAN: &str = "revalidate.validate";

/// State shared by the steps of one scenario.
#[derive(World)]
#[world(init = Self::new)]
pub struct RevalidateWorld {
    pub config: Config,
    pub method: Method,
    pub headers: HeaderMap,
    pub resource: Resource,
    pub now: DateTime<Utc>,
    pub evaluation: Option<Evaluation>,
    pub span_collector: SpanCollector,
}

impl RevalidateWorld {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            method: Method::GET,
            headers: HeaderMap::new(),
            resource: Resource::new(),
            now: Utc
                .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
                .single()
                .unwrap_or_default(),
            evaluation: None,
            span_collector: SpanCollector::new(),
        }
    }

    pub fn set_etag(&mut self, etag: &str) {
        self.resource = std::mem::take(&mut self.resource).with_etag(etag);
    }

    pub fn set_last_modified(&mut self, date: &str) -> Result<(), Error> {
        let instant = parse_date(date)?;
        self.resource = std::mem::take(&mut self.resource).with_last_modified(instant);
        Ok(())
    }

    pub fn set_clock(&mut self, date: &str) -> Result<(), Error> {
        self.now = parse_date(date)?;
        Ok(())
    }

    pub fn set_method(&mut self, method: &str) -> Result<(), Error> {
        self.method = Method::from_bytes(method.as_bytes())
            .with_context(|| format!("invalid request method {method:?}"))?;
        Ok(())
    }

    pub fn add_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .with_context(|| format!("invalid header name {name:?}"))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("invalid value for header {name}"))?;
        self.headers.append(name, value);
        Ok(())
    }

    pub fn load_config(&mut self, yaml: &str) -> Result<(), Error> {
        self.config = Config::from_yaml(yaml).map_err(|error| anyhow!("{error}"))?;
        Ok(())
    }

    /// Runs the request through a [`Revalidator`] with span capture enabled.
    pub fn evaluate(&mut self) -> Result<(), Error> {
        let mut builder = Request::builder().method(self.method.clone()).uri("/");
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers.clone());
        }
        let (parts, ()) = builder.body(())?.into_parts();

        let revalidator = Revalidator::new(self.config.clone());
        self.span_collector.clear();
        let evaluation = self
            .span_collector
            .capture(|| revalidator.evaluate_at(&parts, &self.resource, self.now));
        self.evaluation = Some(evaluation);
        Ok(())
    }

    pub fn evaluation(&self) -> Result<&Evaluation, Error> {
        self.evaluation
            .as_ref()
            .ok_or_else(|| anyhow!("the request has not been evaluated"))
    }
}

fn parse_date(date: &str) -> Result<DateTime<Utc>, Error> {
    parse_http_date(date).ok_or_else(|| anyhow!("invalid HTTP-date {date:?}"))
}

impl Default for RevalidateWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RevalidateWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevalidateWorld")
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("resource", &self.resource)
            .field("now", &self.now)
            .field("evaluation", &self.evaluation)
            .finish_non_exhaustive()
    }
}
