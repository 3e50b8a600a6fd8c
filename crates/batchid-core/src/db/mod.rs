//! Flush-time key pre-allocation and insert-order rewriting.
//!
//! Leaf-first:
//! - `eligibility` classifies a root type's primary key
//! - `sequence` reserves values from the root's id sequence in one statement
//! - `populate` assigns reserved values onto unkeyed records
//! - `reorder` clusters insert order by concrete type
//! - `flush` wires populate-then-reorder into a before-flush hook

pub mod config;
pub mod eligibility;
pub mod flush;
pub mod populate;
pub mod reorder;
pub mod sequence;

pub use config::{BatchInsertConfig, PopulatePolicy};
pub use eligibility::{EligibilityCache, IneligibleReason, KeyEligibility, classify};
pub use flush::{
    BatchInsertHook, BeforeFlush, FlushHooks, FlushOutcome, FlushRequest, SessionHooks, enable,
    enable_with,
};
pub use populate::{GroupOutcome, GroupReport, PopulateReport, populate, populate_cached};
pub use reorder::{ReorderReport, reorder};
pub use sequence::{AllocationError, SequenceAllocator, SequenceName, SequenceReservation};
