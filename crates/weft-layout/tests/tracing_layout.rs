//! Layout passes emit structured tracing.
//!
//! Spans wrap each panel pass, and the element protocol emits
//! `layout.measure` / `layout.arrange` events with geometry fields.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use weft_core::geometry::{Rect, Size};
use weft_layout::{Dock, DockPanel, Element, Leaf, Panel, WrapPanel};

#[derive(Debug, Clone)]
struct CapturedEvent {
    message: Option<String>,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

#[derive(Default)]
struct Capture {
    spans: Arc<Mutex<Vec<String>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        self.events.lock().unwrap().push(CapturedEvent {
            message: fields.get("message").cloned(),
            fields,
            parent_span_name: ctx.event_span(event).map(|span| span.name().to_string()),
        });
    }
}

fn with_capture<F: FnOnce()>(f: F) -> (Vec<String>, Vec<CapturedEvent>) {
    let capture = Capture::default();
    let spans = capture.spans.clone();
    let events = capture.events.clone();
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(capture);
    tracing::subscriber::with_default(subscriber, f);
    let spans = spans.lock().unwrap().clone();
    let events = events.lock().unwrap().clone();
    (spans, events)
}

fn messages<'a>(events: &'a [CapturedEvent], name: &str) -> Vec<&'a CapturedEvent> {
    events
        .iter()
        .filter(|event| event.message.as_deref() == Some(name))
        .collect()
}

#[test]
fn dock_pass_emits_spans_and_fill_event() {
    let (spans, events) = with_capture(|| {
        let mut panel = DockPanel::new();
        panel.add_child_with(Leaf::new().width(20.0), Dock::Left);
        panel.add_child(Leaf::new());
        panel.measure(Size::new(100.0, 40.0)).unwrap();
        panel.arrange(Rect::new(0.0, 0.0, 100.0, 40.0)).unwrap();
    });

    assert!(spans.iter().any(|name| name == "dock.measure"));
    assert!(spans.iter().any(|name| name == "dock.arrange"));

    let fill = messages(&events, "dock.fill");
    assert_eq!(fill.len(), 1);
    assert_eq!(fill[0].fields.get("x").map(String::as_str), Some("20"));
    assert_eq!(fill[0].parent_span_name.as_deref(), Some("dock.arrange"));
}

#[test]
fn element_protocol_traces_each_pass() {
    let (_, events) = with_capture(|| {
        let mut leaf = Leaf::fixed(3.0, 4.0);
        leaf.measure(Size::new(10.0, 10.0)).unwrap();
        // Cached: no second event.
        leaf.measure(Size::new(10.0, 10.0)).unwrap();
        leaf.arrange(Rect::new(1.0, 2.0, 3.0, 4.0)).unwrap();
    });

    let measures = messages(&events, "layout.measure");
    assert_eq!(measures.len(), 1);
    assert_eq!(
        measures[0].fields.get("element").map(String::as_str),
        Some("leaf")
    );
    assert_eq!(
        measures[0].fields.get("desired_w").map(String::as_str),
        Some("3")
    );
    assert_eq!(messages(&events, "layout.arrange").len(), 1);
}

#[test]
fn wrap_measure_reports_line_count() {
    let (_, events) = with_capture(|| {
        let mut panel = WrapPanel::new();
        for _ in 0..5 {
            panel.add_child(Leaf::fixed(40.0, 10.0));
        }
        panel.measure(Size::new(100.0, 100.0)).unwrap();
    });

    let wrap = messages(&events, "wrap.measure");
    assert_eq!(wrap.len(), 1);
    assert_eq!(wrap[0].fields.get("lines").map(String::as_str), Some("3"));
    assert!(wrap[0].fields.contains_key("duration_us"));
}
