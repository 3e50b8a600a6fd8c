use crate::{
    db::{
        config::PopulatePolicy,
        eligibility::{EligibilityCache, IneligibleReason, KeyEligibility},
        sequence::{SequenceAllocator, SequenceReservation},
    },
    error::InternalError,
    model::{column::ColumnModel, entity::RootModel},
    obs::sink::{self, MetricsEvent, SkipKind},
    traits::{PendingRecord, SqlConnection},
};
use std::collections::BTreeMap;
use tracing::debug;

///
/// GroupOutcome
/// What `populate` did for one root type.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupOutcome {
    /// One reservation was made and `count` records received keys.
    Allocated { count: usize },
    /// Every record already carried a key.
    AlreadyKeyed,
    /// Exactly one unkeyed record and the policy skips singletons.
    SkippedSingle,
    /// Key shape unsupported and the policy skips such groups.
    SkippedUnsupported { reason: IneligibleReason },
}

///
/// GroupReport
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GroupReport {
    pub root_path: &'static str,
    pub records: usize,
    pub outcome: GroupOutcome,
}

///
/// PopulateReport
/// Per-root outcomes in grouping order (ascending root path).
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PopulateReport {
    pub groups: Vec<GroupReport>,
}

impl PopulateReport {
    /// Number of sequence round trips made.
    #[must_use]
    pub fn reservations(&self) -> usize {
        self.groups
            .iter()
            .filter(|group| matches!(group.outcome, GroupOutcome::Allocated { .. }))
            .count()
    }

    /// Number of records that received a key.
    #[must_use]
    pub fn keys_assigned(&self) -> usize {
        self.groups
            .iter()
            .map(|group| match group.outcome {
                GroupOutcome::Allocated { count } => count,
                _ => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn outcome_for(&self, root_path: &str) -> Option<GroupOutcome> {
        self.groups
            .iter()
            .find(|group| group.root_path == root_path)
            .map(|group| group.outcome)
    }
}

// One eligible group with unkeyed records, awaiting its reservation.
struct PendingGroup {
    report_slot: usize,
    root: &'static RootModel,
    column: &'static ColumnModel,
    unkeyed: Vec<usize>,
}

/// Assign sequence values to every unkeyed record whose root type has a
/// plain integer `id` key.
///
/// Records are grouped by root type. Each group with unkeyed records costs
/// exactly one round trip, and within a group the earliest-created record
/// receives the smallest value. Records that already carry a key are never
/// touched. On error no record is modified.
pub fn populate<R, C>(
    conn: &mut C,
    records: &mut [R],
    policy: PopulatePolicy,
) -> Result<PopulateReport, InternalError>
where
    R: PendingRecord,
    C: SqlConnection + ?Sized,
{
    populate_cached(conn, records, policy, &mut EligibilityCache::new())
}

/// `populate` with a caller-held eligibility cache.
pub fn populate_cached<R, C>(
    conn: &mut C,
    records: &mut [R],
    policy: PopulatePolicy,
    cache: &mut EligibilityCache,
) -> Result<PopulateReport, InternalError>
where
    R: PendingRecord,
    C: SqlConnection + ?Sized,
{
    let mut report = PopulateReport::default();
    let mut pending = Vec::new();

    // Plan: classify every group before any round trip.
    for (root, members) in group_by_root(records).into_values() {
        let column = match cache.get(root) {
            KeyEligibility::Eligible(column) => column,
            KeyEligibility::Ineligible(reason) if policy.skip_unsupported => {
                debug!(root = root.path, %reason, "skipping unsupported key shape");
                sink::record(MetricsEvent::GroupSkipped {
                    root_path: root.path,
                    kind: SkipKind::Unsupported,
                });
                report.groups.push(GroupReport {
                    root_path: root.path,
                    records: members.len(),
                    outcome: GroupOutcome::SkippedUnsupported { reason },
                });
                continue;
            }
            KeyEligibility::Ineligible(reason) => {
                return Err(InternalError::unsupported_key_shape(root.path, reason));
            }
        };

        let mut unkeyed: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| records[i].primary_key().is_none())
            .collect();

        let skip = match unkeyed.len() {
            0 => Some((GroupOutcome::AlreadyKeyed, SkipKind::AlreadyKeyed)),
            1 if policy.skip_if_single => Some((GroupOutcome::SkippedSingle, SkipKind::Single)),
            _ => None,
        };
        if let Some((outcome, kind)) = skip {
            debug!(root = root.path, ?outcome, "no reservation needed");
            sink::record(MetricsEvent::GroupSkipped {
                root_path: root.path,
                kind,
            });
            report.groups.push(GroupReport {
                root_path: root.path,
                records: members.len(),
                outcome,
            });
            continue;
        }

        // Stable: equal creation indices keep batch order.
        unkeyed.sort_by_key(|&i| records[i].creation_index());

        pending.push(PendingGroup {
            report_slot: report.groups.len(),
            root,
            column,
            unkeyed,
        });
        report.groups.push(GroupReport {
            root_path: root.path,
            records: members.len(),
            outcome: GroupOutcome::Allocated { count: 0 },
        });
    }

    // Reserve: one statement per pending group.
    let mut allocator = SequenceAllocator::new(conn);
    let mut reserved: Vec<(PendingGroup, SequenceReservation)> = Vec::with_capacity(pending.len());
    for group in pending {
        let reservation = allocator.reserve_for(group.root, group.column, group.unkeyed.len())?;
        reserved.push((group, reservation));
    }

    // Apply: reservations are exact, so nothing below can fail.
    for (group, reservation) in reserved {
        for (&i, &key) in group.unkeyed.iter().zip(reservation.iter()) {
            records[i].set_primary_key(key);
        }

        let count = group.unkeyed.len();
        debug!(
            root = group.root.path,
            count,
            first = reservation.first().copied(),
            last = reservation.last().copied(),
            "assigned primary keys"
        );
        sink::record(MetricsEvent::KeysAssigned {
            root_path: group.root.path,
            keys: count as u64,
        });
        report.groups[group.report_slot].outcome = GroupOutcome::Allocated { count };
    }

    Ok(report)
}

// Root path order keeps group processing deterministic across runs.
fn group_by_root<R: PendingRecord>(
    records: &[R],
) -> BTreeMap<&'static str, (&'static RootModel, Vec<usize>)> {
    let mut groups: BTreeMap<&'static str, (&'static RootModel, Vec<usize>)> = BTreeMap::new();

    for (i, record) in records.iter().enumerate() {
        let root = record.model().root;
        groups
            .entry(root.path)
            .or_insert_with(|| (root, Vec::new()))
            .1
            .push(i);
    }

    groups
}

///
/// TESTS
///
