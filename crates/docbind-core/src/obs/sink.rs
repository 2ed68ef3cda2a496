//! Event sink boundary. Component logic MUST NOT depend on
//! `obs::metrics` directly; everything flows through [`MetaEvent`] and
//! [`record`], so tests can swap the sink without touching the
//! components under test.

use crate::{class::ClassId, meta::ObjectKind, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetaSink>>> = const { RefCell::new(None) };
}

///
/// MetaEvent
///
/// One registry happening. Variants carry the class so sinks can
/// aggregate per class without reaching back into the store.
///

#[derive(Clone, Copy, Debug)]
pub enum MetaEvent {
    AccessorsInstalled { class: ClassId, accessors: usize },
    ClassDeclared { class: ClassId, kind: ObjectKind },
    FieldRegistered { class: ClassId },
    FieldsResolved { class: ClassId, fields: usize },
    ModelIntrospected { class: ClassId },
}

impl MetaEvent {
    #[must_use]
    pub const fn class(self) -> ClassId {
        match self {
            Self::AccessorsInstalled { class, .. }
            | Self::ClassDeclared { class, .. }
            | Self::FieldRegistered { class }
            | Self::FieldsResolved { class, .. }
            | Self::ModelIntrospected { class } => class,
        }
    }
}

///
/// MetaSink
///

pub trait MetaSink {
    fn record(&self, event: MetaEvent);
}

///
/// GlobalEventSink
/// updates the per-thread counters
///

pub(crate) struct GlobalEventSink;

pub(crate) const GLOBAL_EVENT_SINK: GlobalEventSink = GlobalEventSink;

impl MetaSink for GlobalEventSink {
    fn record(&self, event: MetaEvent) {
        metrics::with_state_mut(|state| {
            fn class_entry(
                state: &mut metrics::EventState,
                event: MetaEvent,
            ) -> &mut metrics::ClassCounters {
                state
                    .classes
                    .entry(event.class().path().to_string())
                    .or_default()
            }

            match event {
                MetaEvent::AccessorsInstalled { .. } => {
                    state.ops.accessor_installs = state.ops.accessor_installs.saturating_add(1);
                    let entry = class_entry(state, event);
                    entry.accessor_installs = entry.accessor_installs.saturating_add(1);
                }
                MetaEvent::ClassDeclared { .. } => {
                    state.ops.classes_declared = state.ops.classes_declared.saturating_add(1);
                }
                MetaEvent::FieldRegistered { .. } => {
                    state.ops.fields_registered = state.ops.fields_registered.saturating_add(1);
                    let entry = class_entry(state, event);
                    entry.fields_registered = entry.fields_registered.saturating_add(1);
                }
                MetaEvent::FieldsResolved { .. } => {
                    state.ops.field_resolves = state.ops.field_resolves.saturating_add(1);
                    let entry = class_entry(state, event);
                    entry.field_resolves = entry.field_resolves.saturating_add(1);
                }
                MetaEvent::ModelIntrospected { .. } => {
                    state.ops.introspections = state.ops.introspections.saturating_add(1);
                    let entry = class_entry(state, event);
                    entry.introspections = entry.introspections.saturating_add(1);
                }
            }
        });
    }
}

/// Route an event to the active sink for this thread.
pub(crate) fn record(event: MetaEvent) {
    // Clone out of the slot so the sink runs without the borrow held.
    let sink = SINK_OVERRIDE.with(|slot| slot.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_EVENT_SINK.record(event),
    }
}

/// Run `f` with `sink` installed as this thread's event sink, restoring
/// the previous sink afterwards, including on panic.
pub fn with_sink<T>(sink: Rc<dyn MetaSink>, f: impl FnOnce() -> T) -> T {
    struct Guard {
        previous: Option<Rc<dyn MetaSink>>,
    }

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|slot| {
                *slot.borrow_mut() = self.previous.take();
            });
        }
    }

    let previous = SINK_OVERRIDE.with(|slot| slot.borrow_mut().replace(sink));
    let _guard = Guard { previous };

    f()
}

/// Snapshot the current thread's event counters.
#[must_use]
pub fn event_report() -> metrics::EventReport {
    metrics::report()
}

/// Zero the current thread's event counters.
pub fn event_reset_all() {
    metrics::reset_all();
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, panic::AssertUnwindSafe};

    const PROBE: ClassId = ClassId::new("obs::tests::Probe");

    struct Recorder {
        seen: RefCell<Vec<&'static str>>,
        tag: &'static str,
    }

    impl Recorder {
        fn tagged(tag: &'static str) -> Rc<Self> {
            Rc::new(Self {
                seen: RefCell::new(Vec::new()),
                tag,
            })
        }
    }

    impl MetaSink for Recorder {
        fn record(&self, _event: MetaEvent) {
            self.seen.borrow_mut().push(self.tag);
        }
    }

    #[test]
    fn override_routes_events_away_from_the_global_sink() {
        event_reset_all();
        let recorder = Recorder::tagged("outer");

        with_sink(Rc::clone(&recorder) as Rc<dyn MetaSink>, || {
            record(MetaEvent::FieldRegistered { class: PROBE });
        });

        assert_eq!(recorder.seen.borrow().as_slice(), ["outer"]);
        assert_eq!(
            event_report().ops.fields_registered,
            0,
            "overridden events must not reach the global counters"
        );
    }

    #[test]
    fn nested_overrides_restore_the_outer_sink() {
        let outer = Recorder::tagged("outer");
        let inner = Recorder::tagged("inner");

        with_sink(Rc::clone(&outer) as Rc<dyn MetaSink>, || {
            with_sink(Rc::clone(&inner) as Rc<dyn MetaSink>, || {
                record(MetaEvent::FieldRegistered { class: PROBE });
            });
            record(MetaEvent::FieldRegistered { class: PROBE });
        });

        assert_eq!(inner.seen.borrow().as_slice(), ["inner"]);
        assert_eq!(outer.seen.borrow().as_slice(), ["outer"]);
    }

    #[test]
    fn override_is_removed_when_the_closure_panics() {
        let recorder = Recorder::tagged("panicking");

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            with_sink(Rc::clone(&recorder) as Rc<dyn MetaSink>, || {
                panic!("boom");
            });
        }));
        assert!(result.is_err());

        event_reset_all();
        record(MetaEvent::FieldRegistered { class: PROBE });
        assert!(
            recorder.seen.borrow().is_empty(),
            "a panicked override must not keep receiving events"
        );
        assert_eq!(event_report().ops.fields_registered, 1);
    }

    #[test]
    fn global_sink_counts_per_op_and_per_class() {
        event_reset_all();

        record(MetaEvent::ClassDeclared {
            class: PROBE,
            kind: ObjectKind::Model,
        });
        record(MetaEvent::FieldRegistered { class: PROBE });
        record(MetaEvent::FieldRegistered { class: PROBE });
        record(MetaEvent::FieldsResolved {
            class: PROBE,
            fields: 2,
        });
        record(MetaEvent::AccessorsInstalled {
            class: PROBE,
            accessors: 2,
        });
        record(MetaEvent::ModelIntrospected { class: PROBE });

        let report = event_report();
        assert_eq!(report.ops.classes_declared, 1);
        assert_eq!(report.ops.fields_registered, 2);
        assert_eq!(report.ops.field_resolves, 1);
        assert_eq!(report.ops.accessor_installs, 1);
        assert_eq!(report.ops.introspections, 1);

        let class = report
            .classes
            .get(PROBE.path())
            .expect("per-class counters should exist after events");
        assert_eq!(class.fields_registered, 2);
        assert_eq!(class.field_resolves, 1);
        assert_eq!(class.accessor_installs, 1);
        assert_eq!(class.introspections, 1);

        event_reset_all();
    }

    #[test]
    fn event_class_is_exposed_for_every_variant() {
        let events = [
            MetaEvent::AccessorsInstalled {
                class: PROBE,
                accessors: 0,
            },
            MetaEvent::ClassDeclared {
                class: PROBE,
                kind: ObjectKind::DataMapper,
            },
            MetaEvent::FieldRegistered { class: PROBE },
            MetaEvent::FieldsResolved {
                class: PROBE,
                fields: 0,
            },
            MetaEvent::ModelIntrospected { class: PROBE },
        ];

        for event in events {
            assert_eq!(event.class(), PROBE);
        }
    }
}
