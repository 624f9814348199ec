use std::sync::Arc;

use eventwatch::memory::{BufferedSink, InMemoryBinder};
use eventwatch::{EventCatalog, EventTypes, MonitorController, MonitoringContext, NativeEvent};

type Controller = MonitorController<EventCatalog, InMemoryBinder<&'static str>>;

fn mouse_catalog() -> EventCatalog {
    EventCatalog::new()
        .with_family("mouse", ["mousedown", "mouseup", "click"])
        .with_family("key", ["keydown", "keyup", "keypress"])
}

fn setup() -> (Controller, Arc<BufferedSink>) {
    let sink = Arc::new(BufferedSink::new());
    let ctl = MonitorController::new(mouse_catalog(), InMemoryBinder::new(), sink.clone());
    (ctl, sink)
}

#[test]
fn mouse_family_scenario() {
    let (ctl, _) = setup();
    let mut ctx = MonitoringContext::new("page");

    ctl.monitor_events(Some(&"btn"), "mouse", &mut ctx).unwrap();
    assert!(ctl.are_events_monitored(Some(&"btn"), "mouse", &ctx, true));
    for t in ["mousedown", "mouseup", "click"] {
        assert!(ctx.is_monitored(&"btn", t), "{t} should be monitored");
    }

    ctl.unmonitor_events(Some(&"btn"), "click", &mut ctx).unwrap();
    assert!(!ctl.are_events_monitored(Some(&"btn"), "mouse", &ctx, true));
    assert!(ctl.are_events_monitored(Some(&"btn"), "mouse", &ctx, false));
    assert_eq!(ctl.binder().listener_count(&"btn", "click"), 0);
    assert_eq!(ctl.binder().listener_count(&"btn", "mouseup"), 1);
}

#[test]
fn repeated_monitor_binds_each_pair_once() {
    let (ctl, sink) = setup();
    let mut ctx = MonitoringContext::new("page");

    ctl.monitor_events(Some(&"btn"), "mouse", &mut ctx).unwrap();
    ctl.monitor_events(Some(&"btn"), "mouse", &mut ctx).unwrap();
    ctl.monitor_events(Some(&"btn"), ["click", "mousedown"], &mut ctx).unwrap();

    assert_eq!(ctl.binder().attach_calls(), 3);

    ctl.binder().fire(&"btn", NativeEvent::new("click", "btn"));
    assert_eq!(sink.len(), 1);
}

#[test]
fn null_types_cover_full_catalog() {
    let (ctl, _) = setup();
    let mut ctx = MonitoringContext::new("page");

    ctl.monitor_events(Some(&"win"), EventTypes::All, &mut ctx).unwrap();
    assert_eq!(ctx.registry().pair_count(), 6);
    assert!(ctl.are_events_monitored(Some(&"win"), EventTypes::All, &ctx, true));

    ctl.unmonitor_events(Some(&"win"), None::<&str>, &mut ctx).unwrap();
    for t in ["mousedown", "mouseup", "click", "keydown", "keyup", "keypress"] {
        assert!(!ctx.is_monitored(&"win", t));
    }
    assert!(!ctl.are_events_monitored(Some(&"win"), EventTypes::All, &ctx, false));
    assert_eq!(ctl.binder().bound_pairs(), 0);
}

#[test]
fn contexts_are_isolated() {
    let (ctl, sink) = setup();
    let mut first = MonitoringContext::new("tab-1");
    let mut second = MonitoringContext::new("tab-2");

    ctl.monitor_events(Some(&"btn"), "click", &mut first).unwrap();

    assert!(!second.is_monitored(&"btn", "click"));
    assert!(!ctl.are_events_monitored(Some(&"btn"), "click", &second, false));

    ctl.monitor_events(Some(&"btn"), "click", &mut second).unwrap();
    assert_eq!(ctl.binder().listener_count(&"btn", "click"), 2);

    ctl.unmonitor_events(Some(&"btn"), "click", &mut second).unwrap();
    assert!(first.is_monitored(&"btn", "click"));
    assert_eq!(ctl.binder().listener_count(&"btn", "click"), 1);

    ctl.binder().fire(&"btn", NativeEvent::new("click", "btn"));
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].context(), first.id());
}

#[test]
fn unmonitored_pairs_stop_logging_immediately() {
    let (ctl, sink) = setup();
    let mut ctx = MonitoringContext::new("page");

    ctl.monitor_events(Some(&"input"), "key", &mut ctx).unwrap();
    ctl.binder().fire(&"input", NativeEvent::new("keydown", "input"));
    ctl.unmonitor_events(Some(&"input"), "keydown", &mut ctx).unwrap();
    ctl.binder().fire(&"input", NativeEvent::new("keydown", "input"));
    ctl.binder().fire(&"input", NativeEvent::new("keyup", "input"));

    let types: Vec<String> = sink.records().iter().map(|r| r.event_type().to_string()).collect();
    assert_eq!(types, vec!["keydown", "keyup"]);
}

#[test]
fn sink_failures_keep_bindings() {
    let sink = Arc::new(BufferedSink::bounded(1));
    let ctl = MonitorController::new(mouse_catalog(), InMemoryBinder::new(), sink.clone());
    let mut ctx = MonitoringContext::new("page");

    ctl.monitor_events(Some(&"btn"), "click", &mut ctx).unwrap();
    for _ in 0..3 {
        assert_eq!(ctl.binder().fire(&"btn", NativeEvent::new("click", "btn")), 1);
    }

    assert_eq!(sink.len(), 1);
    assert!(ctx.is_monitored(&"btn", "click"));
    let dispatcher = ctx.dispatcher().unwrap();
    assert_eq!(dispatcher.delivered_records(), 1);
    assert_eq!(dispatcher.dropped_records(), 2);
}

#[test]
fn record_summary_points_at_target() {
    let (ctl, sink) = setup();
    let mut ctx = MonitoringContext::new("page");

    ctl.monitor_events(Some(&"btn"), "mouse", &mut ctx).unwrap();
    ctl.binder().fire(
        &"btn",
        NativeEvent::new("mousedown", "button#save").with_detail(serde_json::json!({"button": 0})),
    );

    let record = &sink.records()[0];
    assert_eq!(record.target(), "button#save");
    assert!(record.summary().starts_with("mousedown"));
    assert_eq!(record.event().detail["button"], 0);
}
