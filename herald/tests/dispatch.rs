//! Dispatch pipeline tests: ordering, suppression, mutation and failures.

use herald::{Bus, BusError, Criteria, CriteriaError, HookResult, Payload, testing::RecordingHandler};
use serde_json::json;

mod common;
use common::{Counter, Log, page, page_of, payload};

#[test]
fn test_history_keeps_emission_order() {
    let bus = Bus::new();
    bus.emit("e1", page("1")).unwrap();
    bus.emit("e2", page("2")).unwrap();
    bus.emit("e3", page("3")).unwrap();

    let types: Vec<_> = bus
        .query("*")
        .unwrap()
        .iter()
        .map(|r| r.event_type.clone())
        .collect();
    assert_eq!(types, vec!["e1", "e2", "e3"]);
}

#[test]
fn test_suppressed_event_is_neither_recorded_nor_delivered() {
    let bus = Bus::new();
    let recorder = RecordingHandler::new();
    bus.subscribe_handler("*", recorder.clone(), false).unwrap();
    bus.transform("Secret", |_: &str, _: &mut Payload| false).unwrap();

    bus.emit("Secret", page("x")).unwrap();
    bus.emit("Public", page("y")).unwrap();

    assert_eq!(recorder.event_types(), vec!["Public"]);
    assert_eq!(bus.history_len(), 1);
    assert!(bus.query("Secret").unwrap().is_empty());
}

#[test]
fn test_suppression_skips_later_hooks() {
    let bus = Bus::new();
    let later = Counter::default();
    let counter = later.clone();
    bus.transform("*", |_: &str, _: &mut Payload| HookResult::Stop)
        .unwrap();
    bus.transform("*", move |_: &str, _: &mut Payload| counter.bump())
        .unwrap();

    bus.emit("A", Payload::new()).unwrap();
    assert_eq!(later.get(), 0);
}

#[test]
fn test_true_and_unit_returns_do_not_suppress() {
    let bus = Bus::new();
    bus.transform("*", |_: &str, _: &mut Payload| true).unwrap();
    bus.transform("*", |_: &str, _: &mut Payload| {}).unwrap();
    bus.transform("*", |_: &str, _: &mut Payload| None::<bool>)
        .unwrap();

    bus.emit("A", Payload::new()).unwrap();
    assert_eq!(bus.history_len(), 1);
}

#[test]
fn test_mutation_is_visible_to_history_and_handlers() {
    let bus = Bus::new();
    bus.transform("*", |_: &str, p: &mut Payload| {
        p.insert("Page".into(), json!("X"));
    })
    .unwrap();
    let seen = Log::default();
    let log = seen.clone();
    bus.subscribe(
        "*",
        move |_: &str, p: &Payload| log.push(page_of(p).unwrap_or_default()),
        false,
    )
    .unwrap();

    bus.emit("A", page("original")).unwrap();

    assert_eq!(seen.entries(), vec!["X"]);
    let recorded = bus.query("A").unwrap();
    assert_eq!(page_of(&recorded[0].payload), Some("X"));
}

#[test]
fn test_hooks_and_handlers_run_in_registration_order() {
    let bus = Bus::new();
    let order = Log::default();
    for name in ["hook-1", "hook-2"] {
        let log = order.clone();
        bus.transform("*", move |_: &str, _: &mut Payload| log.push(name))
            .unwrap();
    }
    for name in ["handler-1", "handler-2"] {
        let log = order.clone();
        bus.subscribe("*", move |_: &str, _: &Payload| log.push(name), false)
            .unwrap();
    }

    bus.emit("A", Payload::new()).unwrap();
    assert_eq!(
        order.entries(),
        vec!["hook-1", "hook-2", "handler-1", "handler-2"]
    );
}

#[test]
fn test_criteria_select_registrations() {
    let bus = Bus::new();
    let exact = RecordingHandler::new();
    let any_of = RecordingHandler::new();
    let by_prefix = RecordingHandler::new();
    bus.subscribe_handler("Click", exact.clone(), false).unwrap();
    bus.subscribe_handler(["Click", "Scroll"], any_of.clone(), false)
        .unwrap();
    bus.subscribe_handler(
        Criteria::predicate(|t: &str| t.starts_with("Page")),
        by_prefix.clone(),
        false,
    )
    .unwrap();

    for event_type in ["Click", "Scroll", "PageView", "PageLeave", "Other"] {
        bus.emit(event_type, Payload::new()).unwrap();
    }

    assert_eq!(exact.event_types(), vec!["Click"]);
    assert_eq!(any_of.event_types(), vec!["Click", "Scroll"]);
    assert_eq!(by_prefix.event_types(), vec!["PageView", "PageLeave"]);
}

#[test]
fn test_handler_error_reaches_emitter_after_recording() {
    let bus = Bus::new();
    let after = Counter::default();
    let counter = after.clone();
    bus.subscribe(
        "*",
        |_: &str, p: &Payload| -> Result<(), String> {
            match p.get("amount") {
                Some(v) if v.is_number() => Ok(()),
                _ => Err("amount missing".into()),
            }
        },
        false,
    )
    .unwrap();
    bus.subscribe("*", move |_: &str, _: &Payload| counter.bump(), false)
        .unwrap();

    bus.emit("Purchase", payload(json!({ "amount": 10 }))).unwrap();
    let err = bus.emit("Purchase", Payload::new()).unwrap_err();

    match err {
        BusError::Handler { event_type, source } => {
            assert_eq!(event_type, "Purchase");
            assert_eq!(source.to_string(), "amount missing");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(bus.history_len(), 2);
    assert_eq!(after.get(), 1);
}

#[test]
fn test_hook_error_prevents_recording() {
    let bus = Bus::new();
    let delivered = Counter::default();
    let counter = delivered.clone();
    bus.transform("*", |_: &str, _: &mut Payload| -> Result<(), &'static str> {
        Err("enrichment failed")
    })
    .unwrap();
    bus.subscribe("*", move |_: &str, _: &Payload| counter.bump(), false)
        .unwrap();

    let err = bus.emit("A", Payload::new()).unwrap_err();
    assert!(matches!(err, BusError::Hook { .. }));
    assert_eq!(bus.history_len(), 0);
    assert_eq!(delivered.get(), 0);
}

#[test]
fn test_predicate_failure_at_dispatch() {
    let bus = Bus::new();
    bus.subscribe(
        Criteria::predicate(|t: &str| -> Result<bool, String> {
            if t == "Bad" {
                Err(format!("cannot classify {t}"))
            } else {
                Ok(false)
            }
        }),
        |_: &str, _: &Payload| {},
        false,
    )
    .unwrap();

    bus.emit("Good", Payload::new()).unwrap();
    let err = bus.emit("Bad", Payload::new()).unwrap_err();
    assert!(matches!(
        err,
        BusError::Criteria(CriteriaError::Evaluation(ref msg)) if msg == "cannot classify Bad"
    ));
}

#[test]
fn test_invalid_criteria_rejected_at_registration() {
    let bus = Bus::new();
    let err = bus
        .subscribe(["A", ""], |_: &str, _: &Payload| {}, false)
        .unwrap_err();
    assert!(matches!(err, BusError::Criteria(CriteriaError::Invalid(_))));
    let err = bus
        .transform(Criteria::exact(""), |_: &str, _: &mut Payload| {})
        .unwrap_err();
    assert!(matches!(err, BusError::Criteria(CriteriaError::Invalid(_))));
    assert_eq!(bus.subscription_count(), 0);
    assert_eq!(bus.transform_count(), 0);
}

#[test]
fn test_criteria_from_json_value() {
    let bus = Bus::new();
    let criteria = Criteria::try_from(json!(["Click", "Scroll"])).unwrap();
    bus.emit("Click", Payload::new()).unwrap();
    bus.emit("Hover", Payload::new()).unwrap();
    assert_eq!(bus.query(criteria).unwrap().len(), 1);

    assert!(Criteria::try_from(json!({ "type": "Click" })).is_err());
}
