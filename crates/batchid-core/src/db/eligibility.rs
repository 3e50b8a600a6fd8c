use crate::{
    ID_COLUMN_NAME,
    model::{
        column::{ColumnKind, ColumnModel},
        entity::RootModel,
    },
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// KeyEligibility
/// Verdict on whether a root type's key can come from its id sequence.
///

#[derive(Clone, Copy, Debug)]
pub enum KeyEligibility {
    Eligible(&'static ColumnModel),
    Ineligible(IneligibleReason),
}

impl KeyEligibility {
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible(_))
    }

    /// The single `id` column, when eligible.
    #[must_use]
    pub const fn id_column(&self) -> Option<&'static ColumnModel> {
        match self {
            Self::Eligible(column) => Some(*column),
            Self::Ineligible(_) => None,
        }
    }
}

///
/// IneligibleReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum IneligibleReason {
    #[error("no primary key columns are declared")]
    NoPrimaryKey,

    #[error("primary key is composite ({columns} columns)")]
    Composite { columns: usize },

    #[error("primary key column is named '{name}', not 'id'")]
    Renamed { name: &'static str },

    #[error("primary key column type '{kind}' is not a native integer")]
    NonInteger { kind: ColumnKind },

    #[error("primary key column is not auto-incrementing")]
    NotAutoincrement,

    #[error("primary key column belongs to table '{table}', not the root's own table")]
    ForeignTable { table: &'static str },
}

/// Classify a root type's primary key.
///
/// Eligible means exactly one column, named `id`, of a native integer type,
/// auto-incrementing, and declared on the root's own table.
#[must_use]
pub fn classify(root: &'static RootModel) -> KeyEligibility {
    let column = match root.primary_key {
        [] => return KeyEligibility::Ineligible(IneligibleReason::NoPrimaryKey),
        [column] => column,
        columns => {
            return KeyEligibility::Ineligible(IneligibleReason::Composite {
                columns: columns.len(),
            });
        }
    };

    let reason = if column.name != ID_COLUMN_NAME {
        IneligibleReason::Renamed { name: column.name }
    } else if !column.kind.is_native_integer() {
        IneligibleReason::NonInteger { kind: column.kind }
    } else if !column.autoincrement.is_enabled() {
        IneligibleReason::NotAutoincrement
    } else if !column.table.same_table(root.local_table) {
        IneligibleReason::ForeignTable {
            table: column.table.name,
        }
    } else {
        return KeyEligibility::Eligible(column);
    };

    KeyEligibility::Ineligible(reason)
}

///
/// EligibilityCache
/// Memoises `classify` per root path.
///

#[derive(Debug, Default)]
pub struct EligibilityCache {
    verdicts: BTreeMap<&'static str, KeyEligibility>,
}

impl EligibilityCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, root: &'static RootModel) -> KeyEligibility {
        *self
            .verdicts
            .entry(root.path)
            .or_insert_with(|| classify(root))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

///
/// TESTS
///
