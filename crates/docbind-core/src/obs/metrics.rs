use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap};

//
// Per-thread counter state. Tests run in parallel; thread-local state
// keeps their reports independent without a lock.
//

thread_local! {
    static STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

///
/// EventState
///

#[derive(Clone, Debug, Default)]
pub(crate) struct EventState {
    pub(crate) ops: OpsCounters,
    pub(crate) classes: BTreeMap<String, ClassCounters>,
}

///
/// OpsCounters
/// process-level totals
///

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct OpsCounters {
    pub classes_declared: u64,
    pub fields_registered: u64,
    pub field_resolves: u64,
    pub accessor_installs: u64,
    pub introspections: u64,
}

///
/// ClassCounters
/// per-class totals
///

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ClassCounters {
    pub fields_registered: u64,
    pub field_resolves: u64,
    pub accessor_installs: u64,
    pub introspections: u64,
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct EventReport {
    pub ops: OpsCounters,
    pub classes: BTreeMap<String, ClassCounters>,
}

pub(crate) fn with_state_mut<T>(f: impl FnOnce(&mut EventState) -> T) -> T {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

/// Snapshot the current thread's counters.
#[must_use]
pub(crate) fn report() -> EventReport {
    STATE.with(|state| {
        let state = state.borrow();

        EventReport {
            ops: state.ops,
            classes: state.classes.clone(),
        }
    })
}

/// Zero the current thread's counters.
pub(crate) fn reset_all() {
    with_state_mut(|state| *state = EventState::default());
}

///
/// TESTS
///
