//! Runtime schema model.
//!
//! These are the *runtime representations* of mapped record types: which
//! table a type writes to, which root type owns that table, and what the
//! root's primary key looks like. They are plain `&'static` data so that a
//! persistence layer can declare them once (by hand or from codegen) and
//! hand out references from every pending record.
//!
//! In general:
//! - the persistence layer defines *what exists*
//! - `model` defines *what the flush hook reads*
pub mod column;
pub mod entity;
pub mod table;
