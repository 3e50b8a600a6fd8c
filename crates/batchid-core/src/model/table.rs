///
/// TableModel
/// One physical table, optionally qualified by a schema.
///

#[derive(Debug, Eq, PartialEq)]
pub struct TableModel {
    /// Unqualified table name.
    pub name: &'static str,
    /// Schema qualifier (`None` resolves through the connection's search path).
    pub schema: Option<&'static str>,
}

impl TableModel {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name, schema: None }
    }

    #[must_use]
    pub const fn in_schema(name: &'static str, schema: &'static str) -> Self {
        Self {
            name,
            schema: Some(schema),
        }
    }

    /// True when both models describe the same physical table.
    #[must_use]
    pub fn same_table(&self, other: &Self) -> bool {
        self.name == other.name && self.schema == other.schema
    }
}
