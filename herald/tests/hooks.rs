//! Standard hooks wired into a bus.

use herald::{
    Bus, Payload,
    hooks::{FilterHook, LoggingHook},
    testing::{RecordingHandler, StopHook},
};

mod common;
use common::{page, page_of};

#[test]
fn test_logging_hook_never_suppresses() {
    let bus = Bus::new();
    bus.transform_hook("*", LoggingHook).unwrap();
    bus.emit("A", page("1")).unwrap();
    bus.emit("B", page("2")).unwrap();
    assert_eq!(bus.history_len(), 2);
}

#[test]
fn test_filter_hook_drops_failing_payloads() {
    let bus = Bus::new();
    let recorder = RecordingHandler::new();
    bus.subscribe_handler("*", recorder.clone(), false).unwrap();
    bus.transform_hook(
        "PageView",
        FilterHook::new(|p: &Payload| page_of(p) != Some("/health")),
    )
    .unwrap();

    bus.emit("PageView", page("/health")).unwrap();
    bus.emit("PageView", page("/home")).unwrap();
    bus.emit("Click", page("/health")).unwrap();

    let kept: Vec<_> = recorder
        .events()
        .into_iter()
        .map(|e| (e.event_type, page_of(&e.payload).map(str::to_owned)))
        .collect();
    assert_eq!(
        kept,
        vec![
            ("PageView".to_string(), Some("/home".to_string())),
            ("Click".to_string(), Some("/health".to_string())),
        ]
    );
}

#[test]
fn test_stop_hook_scoped_by_criteria() {
    let bus = Bus::new();
    let stop = StopHook::new();
    bus.transform_hook(["Debug", "Trace"], stop.clone()).unwrap();

    bus.emit("Debug", page("x")).unwrap();
    bus.emit("Info", page("x")).unwrap();
    bus.emit("Trace", page("x")).unwrap();

    assert_eq!(stop.stopped(), 2);
    assert_eq!(bus.history_len(), 1);
}
