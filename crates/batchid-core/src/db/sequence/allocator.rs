use crate::{
    db::{
        eligibility::{KeyEligibility, classify},
        sequence::SequenceName,
    },
    error::InternalError,
    model::{column::ColumnModel, entity::RootModel},
    obs::sink::{self, MetricsEvent},
    traits::SqlConnection,
};
use derive_more::Deref;
use thiserror::Error as ThisError;
use tracing::debug;

///
/// AllocationError
/// A reservation that does not honour the sequence contract.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum AllocationError {
    #[error("expected {expected} sequence values, got {found}")]
    CountMismatch { expected: usize, found: usize },

    #[error(
        "sequence values are not strictly increasing at position {position} ({previous} then {value})"
    )]
    NotIncreasing {
        position: usize,
        previous: i64,
        value: i64,
    },
}

///
/// SequenceReservation
///
/// Values drawn from one sequence in one round trip, in draw order.
/// Always non-empty and strictly increasing.
///

#[derive(Clone, Debug, Deref, Eq, PartialEq)]
pub struct SequenceReservation {
    sequence: SequenceName,
    #[deref]
    values: Vec<i64>,
}

impl SequenceReservation {
    fn checked(
        sequence: SequenceName,
        expected: usize,
        values: Vec<i64>,
    ) -> Result<Self, AllocationError> {
        if values.len() != expected {
            return Err(AllocationError::CountMismatch {
                expected,
                found: values.len(),
            });
        }

        if let Some(position) = values.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(AllocationError::NotIncreasing {
                position: position + 1,
                previous: values[position],
                value: values[position + 1],
            });
        }

        Ok(Self { sequence, values })
    }

    #[must_use]
    pub const fn sequence(&self) -> &SequenceName {
        &self.sequence
    }

    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<i64> {
        self.values
    }
}

///
/// SequenceAllocator
/// Issues reservation statements over the caller's connection.
///

pub struct SequenceAllocator<'c, C: SqlConnection + ?Sized> {
    conn: &'c mut C,
}

impl<'c, C: SqlConnection + ?Sized> SequenceAllocator<'c, C> {
    #[must_use]
    pub const fn new(conn: &'c mut C) -> Self {
        Self { conn }
    }

    /// Reserve `count` values from the id sequence owned by `root`.
    ///
    /// `root` must be eligible and `count` at least one.
    pub fn reserve(
        &mut self,
        root: &'static RootModel,
        count: usize,
    ) -> Result<SequenceReservation, InternalError> {
        match classify(root) {
            KeyEligibility::Eligible(column) => self.reserve_for(root, column, count),
            KeyEligibility::Ineligible(reason) => {
                Err(InternalError::unsupported_key_shape(root.path, reason))
            }
        }
    }

    // Callers that already hold a verdict skip re-classification.
    pub(crate) fn reserve_for(
        &mut self,
        root: &'static RootModel,
        column: &'static ColumnModel,
        count: usize,
    ) -> Result<SequenceReservation, InternalError> {
        if count == 0 {
            return Err(InternalError::sequence_invariant(format!(
                "sequence reservation for '{}' requires at least one value",
                root.path
            )));
        }
        let requested = i64::try_from(count).map_err(|_| {
            InternalError::sequence_invariant(format!(
                "sequence reservation for '{}' exceeds the bigint range ({count})",
                root.path
            ))
        })?;

        let sequence = SequenceName::for_table(root.local_table);
        debug!(root = root.path, sequence = %sequence, count, "reserving sequence values");

        let values = self
            .conn
            .query_i64_column(&sequence.reserve_statement(), &[requested])?;
        let reservation = SequenceReservation::checked(sequence, count, values)
            .map_err(|err| InternalError::allocation_mismatch(root.path, err))?;

        // A bigint sequence may outgrow a narrower key column.
        if let Some(value) = reservation.iter().find(|value| !column.kind.holds(**value)) {
            return Err(InternalError::sequence_invariant(format!(
                "sequence '{}' produced {value}, which does not fit {} column '{}'",
                reservation.sequence(),
                column.kind,
                column.name
            )));
        }

        sink::record(MetricsEvent::SequenceReserved {
            root_path: root.path,
            values: count as u64,
        });

        Ok(reservation)
    }
}

///
/// TESTS
///
