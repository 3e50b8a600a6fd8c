use crate::model::table::TableModel;
use derive_more::Display;

///
/// ColumnModel
/// Runtime column metadata used by key eligibility.
///

#[derive(Debug)]
pub struct ColumnModel {
    /// Column name as it appears in SQL.
    pub name: &'static str,
    /// Table that physically declares the column.
    pub table: &'static TableModel,
    /// Declared type shape.
    pub kind: ColumnKind,
    /// Whether the database fills the column on insert.
    pub autoincrement: Autoincrement,
}

impl ColumnModel {
    #[must_use]
    pub const fn new(
        name: &'static str,
        table: &'static TableModel,
        kind: ColumnKind,
        autoincrement: Autoincrement,
    ) -> Self {
        Self {
            name,
            table,
            kind,
            autoincrement,
        }
    }
}

///
/// ColumnKind
///
/// Minimal type surface needed to decide key eligibility.
/// This is a lossy projection of SQL column types.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ColumnKind {
    #[display("smallint")]
    SmallInt,
    #[display("integer")]
    Integer,
    #[display("bigint")]
    BigInt,
    #[display("numeric")]
    Numeric,
    #[display("text")]
    Text,
    #[display("uuid")]
    Uuid,
    #[display("boolean")]
    Bool,
    #[display("bytea")]
    Bytes,
    #[display("timestamp")]
    Timestamp,

    /// Marker for types with no native projection.
    #[display("unsupported")]
    Unsupported,
}

impl ColumnKind {
    /// True for types that map to a native integer.
    #[must_use]
    pub const fn is_native_integer(self) -> bool {
        matches!(self, Self::SmallInt | Self::Integer | Self::BigInt)
    }

    /// Inclusive value range for native integer kinds.
    #[allow(clippy::cast_lossless)]
    #[must_use]
    pub const fn integer_range(self) -> Option<(i64, i64)> {
        match self {
            Self::SmallInt => Some((i16::MIN as i64, i16::MAX as i64)),
            Self::Integer => Some((i32::MIN as i64, i32::MAX as i64)),
            Self::BigInt => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// True when `value` is storable in a column of this kind.
    #[must_use]
    pub const fn holds(self, value: i64) -> bool {
        match self.integer_range() {
            Some((min, max)) => value >= min && value <= max,
            None => false,
        }
    }
}

///
/// Autoincrement
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Autoincrement {
    /// Database-assigned unless the schema says otherwise (serial default).
    #[display("auto")]
    Auto,
    /// Explicitly marked as database-assigned.
    #[display("always")]
    Always,
    #[display("never")]
    Never,
}

impl Autoincrement {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Auto | Self::Always)
    }
}
