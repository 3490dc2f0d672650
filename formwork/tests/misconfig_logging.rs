//! Misconfiguration diagnostics reach the log under their own target.
//!
//! A process has one global logger, so every test here shares a single
//! capturing logger and reads back only the records its own thread emitted.

use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

use formwork::prelude::*;
use formwork::resolver::MISCONFIG_TARGET;
use formwork::{BlurEvent, Resolver};
use log::{Level, LevelFilter, Log, Metadata, Record};

// ── Capturing logger ──────────────────────────────────────────────────

struct Captured {
    thread: ThreadId,
    target: String,
    level: Level,
    message: String,
}

struct CaptureLogger {
    records: Mutex<Vec<Captured>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().unwrap().push(Captured {
            thread: thread::current().id(),
            target: record.target().to_string(),
            level: record.level(),
            message: record.args().to_string(),
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

static INIT: Once = Once::new();

/// Install the logger and drop anything this thread logged so far.
fn capture() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    take_records();
}

/// Remove and return this thread's records as `(target, level, message)`.
fn take_records() -> Vec<(String, Level, String)> {
    let me = thread::current().id();
    let mut records = LOGGER.records.lock().unwrap();
    let (mine, rest): (Vec<_>, Vec<_>) = records.drain(..).partition(|r| r.thread == me);
    *records = rest;
    mine.into_iter()
        .map(|r| (r.target, r.level, r.message))
        .collect()
}

fn misconfig_records() -> Vec<(Level, String)> {
    take_records()
        .into_iter()
        .filter(|(target, _, _)| target == MISCONFIG_TARGET)
        .map(|(_, level, message)| (level, message))
        .collect()
}

fn values(pairs: &[(&str, &str)]) -> Values {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
        .collect()
}

// =============================================================================
// Resolver
// =============================================================================

#[test]
fn test_unknown_rule_logs_once_at_warn() {
    capture();

    let result = Resolver::default().resolve(&RuleSpec::named("emial"), &FieldValue::from("x"));
    assert_eq!(result, None);

    assert_eq!(
        misconfig_records(),
        vec![(
            Level::Warn,
            "unknown rule 'emial'; treating rule as passing".to_string()
        )]
    );
}

#[test]
fn test_malformed_argument_logs() {
    capture();

    let spec = RuleSpec::with_args("minLength", ["three"]);
    assert_eq!(Resolver::default().resolve(&spec, &FieldValue::from("x")), None);

    let records = misconfig_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, Level::Warn);
    assert!(records[0].1.contains("minLength"), "{}", records[0].1);
}

#[test]
fn test_resolver_diagnostic_level() {
    capture();

    let resolver = Resolver::default().with_diagnostic_level(Level::Info);
    resolver.resolve(&RuleSpec::named("emial"), &FieldValue::Null);

    let levels: Vec<Level> = misconfig_records().into_iter().map(|(l, _)| l).collect();
    assert_eq!(levels, vec![Level::Info]);
}

// =============================================================================
// Controller
// =============================================================================

#[test]
fn test_controller_logs_at_default_level() {
    capture();

    let rules = RuleSet::new().field("email", "emial");
    let mut form = FormController::new(values(&[("email", "")]));
    form.on_blur(BlurEvent::new("email"), &rules);

    let levels: Vec<Level> = misconfig_records().into_iter().map(|(l, _)| l).collect();
    assert_eq!(levels, vec![Level::Warn]);
}

#[test]
fn test_controller_uses_configured_level() {
    capture();

    let rules = RuleSet::new().field("email", "emial");
    let mut form = FormController::new(values(&[("email", "")]))
        .with_config(FormConfig::new("signup").diagnostic_level(Level::Error));
    assert_eq!(form.config().diagnostic_level, Level::Error);

    form.on_blur(BlurEvent::new("email"), &rules);
    assert!(form.validate_all(&rules));

    let levels: Vec<Level> = misconfig_records().into_iter().map(|(l, _)| l).collect();
    assert_eq!(levels, vec![Level::Error, Level::Error]);
}

#[test]
fn test_field_failures_are_not_warnings() {
    capture();

    let rules = RuleSet::new()
        .field("email", "email")
        .field("pin", "pinCode")
        .field("terms", "checkbox");
    let mut form = FormController::new(values(&[("email", "ada@"), ("pin", "12")]));

    form.on_blur(BlurEvent::new("email"), &rules);
    form.on_change(ChangeEvent::text("email", "still bad"), &rules);
    assert!(!form.validate_all(&rules));
    assert!(!form.submit(&rules, |_| ()).is_submitted());

    let loud: Vec<_> = take_records()
        .into_iter()
        .filter(|(_, level, _)| *level <= Level::Warn)
        .collect();
    assert!(loud.is_empty(), "unexpected records: {loud:?}");
}
