use crate::{
    obs::sink::{self, MetricsEvent},
    traits::PendingRecord,
};
use tracing::debug;

///
/// ReorderReport
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReorderReport {
    pub records: usize,
    /// Contiguous runs of one concrete type in the new insert order.
    pub runs: usize,
}

/// Rewrite every record's insert order so records of one concrete type are
/// contiguous.
///
/// The new order is ascending `(type path, creation index)`, ranked from 0.
/// Within a type the original creation order is kept; equal creation indices
/// keep their slice order. Key values are neither read nor written.
pub fn reorder<R: PendingRecord>(records: &mut [R]) -> ReorderReport {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&records[a], &records[b]);
        a.model()
            .path
            .cmp(b.model().path)
            .then_with(|| a.creation_index().cmp(&b.creation_index()))
    });

    let mut runs = 0;
    let mut previous: Option<&'static str> = None;
    for (rank, &i) in order.iter().enumerate() {
        let path = records[i].model().path;
        if previous != Some(path) {
            runs += 1;
            previous = Some(path);
        }
        records[i].set_insert_order(rank);
    }

    let report = ReorderReport {
        records: records.len(),
        runs,
    };
    debug!(records = report.records, runs = report.runs, "rewrote insert order");
    sink::record(MetricsEvent::InsertOrderRewritten {
        records: report.records as u64,
        runs: report.runs as u64,
    });

    report
}

///
/// TESTS
///
