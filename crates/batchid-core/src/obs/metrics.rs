use serde::{Deserialize, Serialize};
use std::{
    cell::RefCell,
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EventState
/// Ephemeral, in-memory counters for flush-hook operations.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub roots: BTreeMap<String, RootCounters>,
    pub window_start_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            roots: BTreeMap::new(),
            window_start_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Sequence round trips
    pub reservations: u64,
    pub values_reserved: u64,

    // Population
    pub keys_assigned: u64,
    pub groups_skipped_unsupported: u64,
    pub groups_skipped_single: u64,
    pub groups_already_keyed: u64,

    // Insert order
    pub reorders: u64,
    pub records_reordered: u64,
    pub type_runs: u64,

    // Hook
    pub flushes_declined: u64,
}

///
/// RootCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RootCounters {
    pub reservations: u64,
    pub values_reserved: u64,
    pub keys_assigned: u64,
    pub skipped_unsupported: u64,
    pub skipped_single: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters and restart the window.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral runtime counters since `window_start_ms`.
    pub counters: Option<EventState>,
    /// Per-root counters with derived averages.
    pub root_counters: Vec<RootSummary>,
}

///
/// RootSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RootSummary {
    pub path: String,
    pub reservations: u64,
    pub values_reserved: u64,
    pub keys_assigned: u64,
    pub skipped_unsupported: u64,
    pub skipped_single: u64,
    pub avg_values_per_reservation: f64,
}

/// Build a report, or an empty one when `window_start_ms` is after the
/// current window began.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report_window_start(window_start_ms: Option<u64>) -> EventReport {
    let snap = with_state(Clone::clone);
    if window_start_ms.is_some_and(|requested| requested > snap.window_start_ms) {
        return EventReport::default();
    }

    let mut root_counters: Vec<RootSummary> = snap
        .roots
        .iter()
        .map(|(path, ops)| RootSummary {
            path: path.clone(),
            reservations: ops.reservations,
            values_reserved: ops.values_reserved,
            keys_assigned: ops.keys_assigned,
            skipped_unsupported: ops.skipped_unsupported,
            skipped_single: ops.skipped_single,
            avg_values_per_reservation: if ops.reservations > 0 {
                ops.values_reserved as f64 / ops.reservations as f64
            } else {
                0.0
            },
        })
        .collect();

    // Busiest roots first, then path for a stable tail.
    root_counters.sort_by(|a, b| {
        b.values_reserved
            .cmp(&a.values_reserved)
            .then_with(|| a.path.cmp(&b.path))
    });

    EventReport {
        counters: Some(snap),
        root_counters,
    }
}

///
/// TESTS
///
