//! Core runtime for batchid: key eligibility, sequence reservation, primary
//! key population, insert-order rewriting, and the before-flush hook that
//! ties them together.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod traits;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Column name a primary key must carry to be eligible for pre-allocation.
pub const ID_COLUMN_NAME: &str = "id";

/// Suffix appended to a table name to derive its id sequence name.
pub const ID_SEQUENCE_SUFFIX: &str = "_id_seq";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, hooks, or sinks are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{
            column::{Autoincrement, ColumnKind, ColumnModel},
            entity::{EntityModel, RootModel},
            table::TableModel,
        },
        traits::{PendingRecord, SqlConnection},
    };
}
