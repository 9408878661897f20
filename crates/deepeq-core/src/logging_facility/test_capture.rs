//! Test capture mode for deterministic logging assertions
//!
//! A subscriber layer that records every event in memory so tests can
//! assert on operation boundaries and their structured fields. All values
//! are stored as text: strings verbatim, numbers and booleans via `Display`,
//! `%`/`?` fields as their formatted output.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(level: Level, fields: HashMap<String, String>) -> Self {
        let component = fields.get("component").cloned();
        let op = fields.get("op").cloned();
        let event = fields.get("event").cloned();
        Self {
            level,
            component,
            op,
            event,
            fields,
        }
    }

    /// True for the `event` boundary of operation `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct TextFields(HashMap<String, String>);

impl TextFields {
    fn put(&mut self, field: &Field, value: impl ToString) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl Visit for TextFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value);
    }
}

type EventBuffer = Arc<Mutex<Vec<CapturedEvent>>>;

/// Layer appending every event to a shared buffer
pub struct TestCaptureLayer {
    events: EventBuffer,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = EventBuffer::default();
        let handle = TestCapture {
            events: Arc::clone(&events),
        };
        (Self { events }, handle)
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = TextFields::default();
        event.record(&mut fields);
        let captured = CapturedEvent::from_fields(*event.metadata().level(), fields.0);

        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Handle for reading captured events
#[derive(Clone)]
pub struct TestCapture {
    events: EventBuffer,
}

impl TestCapture {
    /// Snapshot of every captured event
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events for one operation and event type, in emission order
    pub fn events_for(&self, op: &str, event: &str) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| e.is(op, event)).collect()
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// # Panics
    ///
    /// Panics if no `event` boundary was captured for `op`.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Initialize test capture mode
///
/// Installs the capture layer as the global subscriber on first call and
/// returns a handle to the shared event buffer. Tests sharing a binary see
/// each other's events, so filter by a distinctive field.
///
/// # Example
///
/// ```
/// use deepeq_core::logging_facility::test_capture::init_test_capture;
/// use deepeq_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_operation");
/// capture.assert_event_exists("doc_operation", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).init();
            capture
        })
        .clone()
}
