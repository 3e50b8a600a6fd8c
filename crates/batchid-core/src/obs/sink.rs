//! Metrics sink boundary.
//!
//! Flush-hook logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics::{self, EventReport, EventState, RootCounters};
use std::cell::Cell;

thread_local! {
    static SINK_OVERRIDE: Cell<Option<&'static dyn MetricsSink>> = const { Cell::new(None) };
}

///
/// SkipKind
/// Why a type group received no sequence values.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipKind {
    Unsupported,
    Single,
    AlreadyKeyed,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    SequenceReserved {
        root_path: &'static str,
        values: u64,
    },
    KeysAssigned {
        root_path: &'static str,
        keys: u64,
    },
    GroupSkipped {
        root_path: &'static str,
        kind: SkipKind,
    },
    InsertOrderRewritten {
        records: u64,
        runs: u64,
    },
    FlushDeclined,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into global metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

fn root_entry<'a>(m: &'a mut EventState, root_path: &str) -> &'a mut RootCounters {
    m.roots.entry(root_path.to_string()).or_default()
}

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::SequenceReserved { root_path, values } => {
                metrics::with_state_mut(|m| {
                    m.ops.reservations = m.ops.reservations.saturating_add(1);
                    m.ops.values_reserved = m.ops.values_reserved.saturating_add(values);
                    let entry = root_entry(m, root_path);
                    entry.reservations = entry.reservations.saturating_add(1);
                    entry.values_reserved = entry.values_reserved.saturating_add(values);
                });
            }

            MetricsEvent::KeysAssigned { root_path, keys } => {
                metrics::with_state_mut(|m| {
                    m.ops.keys_assigned = m.ops.keys_assigned.saturating_add(keys);
                    let entry = root_entry(m, root_path);
                    entry.keys_assigned = entry.keys_assigned.saturating_add(keys);
                });
            }

            MetricsEvent::GroupSkipped { root_path, kind } => {
                metrics::with_state_mut(|m| match kind {
                    SkipKind::Unsupported => {
                        m.ops.groups_skipped_unsupported =
                            m.ops.groups_skipped_unsupported.saturating_add(1);
                        let entry = root_entry(m, root_path);
                        entry.skipped_unsupported = entry.skipped_unsupported.saturating_add(1);
                    }
                    SkipKind::Single => {
                        m.ops.groups_skipped_single = m.ops.groups_skipped_single.saturating_add(1);
                        let entry = root_entry(m, root_path);
                        entry.skipped_single = entry.skipped_single.saturating_add(1);
                    }
                    SkipKind::AlreadyKeyed => {
                        m.ops.groups_already_keyed = m.ops.groups_already_keyed.saturating_add(1);
                    }
                });
            }

            MetricsEvent::InsertOrderRewritten { records, runs } => {
                metrics::with_state_mut(|m| {
                    m.ops.reorders = m.ops.reorders.saturating_add(1);
                    m.ops.records_reordered = m.ops.records_reordered.saturating_add(records);
                    m.ops.type_runs = m.ops.type_runs.saturating_add(runs);
                });
            }

            MetricsEvent::FlushDeclined => {
                metrics::with_state_mut(|m| {
                    m.ops.flushes_declined = m.ops.flushes_declined.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    match SINK_OVERRIDE.with(Cell::get) {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
///
/// `window_start_ms` filters by window start (`EventState::window_start_ms`),
/// not by per-event timestamps.
#[must_use]
pub fn metrics_report(window_start_ms: Option<u64>) -> EventReport {
    metrics::report_window_start(window_start_ms)
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &'static dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<&'static dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| cell.set(self.0));
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.replace(Some(sink)));
    let _guard = Guard(prev);

    f()
}
