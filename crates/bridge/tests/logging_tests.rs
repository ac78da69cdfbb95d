//! Log output tests
//!
//! A capturing layer records every event emitted on the test thread, so the
//! assertions see exactly what a subscriber would receive.

use parking_lot::Mutex;
use rethrow_bridge::ExceptionBridge;
use rethrow_config::{BridgeConfig, LogLevel};
use rethrow_core::kind::{IO_ERROR, RANGE_ERROR};
use rethrow_core::{Fault, FaultResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct FieldRecorder<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldRecorder<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        self.events.lock().push(CapturedEvent {
            level: *event.metadata().level(),
            fields,
        });
    }
}

/// Runs `work` under a capturing subscriber and returns the recorded events.
fn capture_events(work: impl FnOnce()) -> Vec<CapturedEvent> {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.events);
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, work);
    let captured = events.lock().clone();
    captured
}

fn bridge_at(level: LogLevel) -> ExceptionBridge {
    ExceptionBridge::new(BridgeConfig {
        report_faults: false,
        log_level: level,
        ..BridgeConfig::default()
    })
}

fn observed(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events
        .iter()
        .filter(|event| event.field("message") == Some("fault observed"))
        .collect()
}

#[test]
fn test_fault_logged_at_configured_level() {
    let bridge = bridge_at(LogLevel::Warning);

    let events = capture_events(|| {
        bridge.observe_and_suppress(
            || -> FaultResult<()> { Err(Fault::new(RANGE_ERROR, "row 9 of 3")) },
            |_| {},
        );
    });

    let observed = observed(&events);
    assert_eq!(observed.len(), 1);
    let event = observed[0];
    assert_eq!(event.level, Level::WARN);
    assert_eq!(event.field("kind"), Some("RangeError"));
    assert_eq!(event.field("reason"), Some("row 9 of 3"));
    assert_eq!(event.field("operation"), Some("observe_and_suppress"));
    assert_eq!(event.field("disposition"), Some("absorbed"));
}

#[test]
fn test_each_level_maps_to_tracing_level() {
    let cases = [
        (LogLevel::Debug, Level::DEBUG),
        (LogLevel::Info, Level::INFO),
        (LogLevel::Warning, Level::WARN),
        (LogLevel::Error, Level::ERROR),
        (LogLevel::Fatal, Level::ERROR),
    ];

    for (configured, expected) in cases {
        let bridge = bridge_at(configured);
        let events = capture_events(|| {
            let _: FaultResult<()> =
                bridge.observe_and_rethrow(|| Err(Fault::new(IO_ERROR, "reset")), |_| {});
        });
        let observed = observed(&events);
        assert_eq!(observed.len(), 1, "{}", configured);
        assert_eq!(observed[0].level, expected, "{}", configured);
    }
}

#[test]
fn test_success_logs_no_fault() {
    let bridge = bridge_at(LogLevel::Error);
    let events = capture_events(|| {
        assert_eq!(bridge.observe_and_rethrow(|| Ok(3), |_| {}), Ok(3));
    });
    assert!(observed(&events).is_empty());
}

#[test]
fn test_transitions_traced_in_order() {
    let bridge = bridge_at(LogLevel::Info);

    let events = capture_events(|| {
        let _ = bridge.capture_if_kind(RANGE_ERROR, || Err(Fault::new(RANGE_ERROR, "row 1")));
    });

    let steps: Vec<(&str, &str)> = events
        .iter()
        .filter(|event| event.field("message") == Some("bridge transition"))
        .map(|event| {
            assert_eq!(event.level, Level::TRACE);
            (
                event.field("from").unwrap_or_default(),
                event.field("to").unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(
        steps,
        vec![
            ("idle", "running"),
            ("running", "faulted"),
            ("faulted", "reported"),
            ("reported", "absorbed"),
        ]
    );
}

#[test]
fn test_capture_logs_before_terminal_state() {
    let bridge = bridge_at(LogLevel::Info);

    let events = capture_events(|| {
        let escaped = bridge.capture_if_kind(RANGE_ERROR, || Err(Fault::new(IO_ERROR, "reset")));
        assert!(escaped.is_err());
    });

    let position = |predicate: &dyn Fn(&CapturedEvent) -> bool| {
        events.iter().position(|event| predicate(event))
    };
    let logged = position(&|event| event.field("message") == Some("fault observed"));
    let terminal = position(&|event| {
        event.field("message") == Some("bridge transition")
            && event.field("to") == Some("propagated")
    });

    assert_eq!(
        events[logged.unwrap()].field("disposition"),
        Some("propagated")
    );
    assert!(logged.unwrap() < terminal.unwrap());
}
