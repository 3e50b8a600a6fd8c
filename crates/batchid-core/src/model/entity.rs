use crate::model::{column::ColumnModel, table::TableModel};

///
/// RootModel
///
/// The topmost mapped type of a hierarchy. It owns the physical table and
/// the primary-key sequence shared by every concrete type mapped under it.
///

#[derive(Debug)]
pub struct RootModel {
    /// Fully-qualified type path (grouping key and diagnostics).
    pub path: &'static str,
    /// Table the root type itself maps to.
    pub local_table: &'static TableModel,
    /// Primary-key columns in declaration order.
    pub primary_key: &'static [ColumnModel],
}

impl RootModel {
    #[must_use]
    pub const fn new(
        path: &'static str,
        local_table: &'static TableModel,
        primary_key: &'static [ColumnModel],
    ) -> Self {
        Self {
            path,
            local_table,
            primary_key,
        }
    }
}

///
/// EntityModel
/// Runtime model for one concrete record type.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified concrete type path; the insert-order clustering key.
    pub path: &'static str,
    /// Root type that owns the table and sequence.
    pub root: &'static RootModel,
}

impl EntityModel {
    #[must_use]
    pub const fn new(path: &'static str, root: &'static RootModel) -> Self {
        Self { path, root }
    }

    /// True when this concrete type is its own root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path == self.root.path
    }
}
