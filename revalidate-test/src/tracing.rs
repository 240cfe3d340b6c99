//! Span capture for asserting on validation decisions.
//!
//! [`CacheValidator`](revalidate::CacheValidator) opens one
//! `revalidate.validate` span per call and records the deciding rule and the
//! resulting status on it. The layer here keeps those spans so that steps can
//! inspect them after the fact.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Dispatch, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

const PREFIX: &str = "revalidate.";

/// A captured span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedSpan {
    /// Span ID.
    pub id: u64,
    /// Span name, e.g. `revalidate.validate`.
    pub name: String,
    /// Field values rendered as strings, in recording order.
    pub fields: Vec<(String, String)>,
}

impl CapturedSpan {
    /// Returns a field value.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn merge(&mut self, fields: Vec<(String, String)>) {
        for (key, value) in fields {
            match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
                Some(existing) => existing.1 = value,
                None => self.fields.push((key, value)),
            }
        }
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: Vec<(String, String)>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, value: String) {
        self.fields.push((field.name().to_owned(), value));
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_owned());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value.to_string());
    }
}

/// A layer that records `revalidate.*` spans.
pub struct SpanCaptureLayer {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

impl<S> Layer<S> for SpanCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, _ctx: Context<'_, S>) {
        let metadata = attrs.metadata();
        if !metadata.name().starts_with(PREFIX) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);
        lock(&self.spans).push(CapturedSpan {
            id: id.into_u64(),
            name: metadata.name().to_owned(),
            fields: visitor.fields,
        });
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if !span.metadata().name().starts_with(PREFIX) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        values.record(&mut visitor);
        let span_id = id.into_u64();
        if let Some(captured) = lock(&self.spans).iter_mut().find(|s| s.id == span_id) {
            captured.merge(visitor.fields);
        }
    }
}

// A step that panicked mid-capture must not hide the spans from later steps.
fn lock(spans: &Mutex<Vec<CapturedSpan>>) -> MutexGuard<'_, Vec<CapturedSpan>> {
    spans.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Captured spans plus the dispatch that feeds them.
#[derive(Clone)]
pub struct SpanCollector {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    dispatch: Dispatch,
}

impl Default for SpanCollector {
    fn default() -> Self {
        let spans = Arc::new(Mutex::new(Vec::new()));
        let layer = SpanCaptureLayer {
            spans: spans.clone(),
        };
        let dispatch = Dispatch::new(Registry::default().with(layer));
        Self { spans, dispatch }
    }
}

impl std::fmt::Debug for SpanCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanCollector")
            .field("spans", &*lock(&self.spans))
            .finish_non_exhaustive()
    }
}

impl SpanCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with this collector as the default subscriber.
    pub fn capture<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// All captured spans.
    pub fn spans(&self) -> Vec<CapturedSpan> {
        lock(&self.spans).clone()
    }

    /// Returns `true` if a span with `name` was captured.
    pub fn has_span(&self, name: &str) -> bool {
        lock(&self.spans).iter().any(|s| s.name == name)
    }

    /// The last span named `name`.
    pub fn last(&self, name: &str) -> Option<CapturedSpan> {
        lock(&self.spans).iter().rev().find(|s| s.name == name).cloned()
    }

    /// A field of the last span named `span`.
    pub fn field(&self, span: &str, field: &str) -> Option<String> {
        self.last(span)
            .and_then(|captured| captured.field(field).map(str::to_owned))
    }

    /// Drops all captured spans.
    pub fn clear(&self) {
        lock(&self.spans).clear();
    }
}
