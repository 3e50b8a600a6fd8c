//! Id sequence reservation.
//!
//! One reservation is one round trip: a single `SELECT nextval(..)` driven
//! by `generate_series` returns every requested value at once.

mod allocator;
mod name;

pub use allocator::{AllocationError, SequenceAllocator, SequenceReservation};
pub use name::SequenceName;
