//! ## Crate layout
//! - `core`: runtime models, eligibility, sequence reservation, population,
//!   insert-order rewriting, the before-flush hook, and observability.
//! - `error`: stable public error taxonomy.
//!
//! Downstream users depend on **batchid** only. The `prelude` module carries
//! the vocabulary needed to describe records and connections.

pub use batchid_core as core;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

use batchid_core::{
    db::{self, BatchInsertConfig, PopulatePolicy, PopulateReport, SessionHooks},
    traits::{PendingRecord, SqlConnection},
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        db::{
            BatchInsertConfig, BatchInsertHook, BeforeFlush, FlushHooks, FlushOutcome,
            FlushRequest, SessionHooks,
        },
        prelude::*,
    };
}

/// Register the batch insert hook on `session` with the default
/// configuration: unsupported key shapes and single-record groups are
/// skipped, and explicit-subset flushes are declined with a warning.
///
/// Registering twice runs the hook twice per flush.
pub fn enable<R, C, S>(session: &mut S)
where
    R: PendingRecord,
    C: SqlConnection + ?Sized,
    S: SessionHooks<R, C> + ?Sized,
{
    db::enable(session);
}

/// Register the batch insert hook on `session` with `config`.
pub fn enable_with<R, C, S>(session: &mut S, config: BatchInsertConfig)
where
    R: PendingRecord,
    C: SqlConnection + ?Sized,
    S: SessionHooks<R, C> + ?Sized,
{
    db::enable_with(session, config);
}

/// Assign sequence values to the unkeyed records in `records`.
///
/// With both switches off, an unsupported key shape fails the call and every
/// group with unkeyed records costs one round trip. Records already carrying
/// a key are never touched. Calling this twice on the same unkeyed records
/// performs two allocations.
pub fn populate<R, C>(
    conn: &mut C,
    records: &mut [R],
    skip_unsupported: bool,
    skip_if_single: bool,
) -> Result<PopulateReport, Error>
where
    R: PendingRecord,
    C: SqlConnection + ?Sized,
{
    let policy = PopulatePolicy::new()
        .skip_unsupported(skip_unsupported)
        .skip_if_single(skip_if_single);

    db::populate(conn, records, policy).map_err(Error::from)
}
