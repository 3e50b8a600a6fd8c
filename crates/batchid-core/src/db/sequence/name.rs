use crate::{ID_SEQUENCE_SUFFIX, model::table::TableModel};
use std::fmt;

///
/// SequenceName
///
/// Name of the id sequence backing a table, derived by the `<table>_id_seq`
/// convention and qualified by the table's schema when it has one.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SequenceName {
    pub schema: Option<&'static str>,
    pub name: String,
}

impl SequenceName {
    #[must_use]
    pub fn for_table(table: &TableModel) -> Self {
        Self {
            schema: table.schema,
            name: format!("{}{ID_SEQUENCE_SUFFIX}", table.name),
        }
    }

    /// Quoted, schema-qualified identifier (`"schema"."name"`).
    #[must_use]
    pub fn qualified(&self) -> String {
        match self.schema {
            Some(schema) => format!("{}.{}", quote_ident(schema), quote_ident(&self.name)),
            None => quote_ident(&self.name),
        }
    }

    /// Statement drawing `$1` successive values from this sequence.
    #[must_use]
    pub fn reserve_statement(&self) -> String {
        format!(
            "SELECT nextval('{}') FROM generate_series(1, $1)",
            self.qualified().replace('\'', "''")
        )
    }
}

impl fmt::Display for SequenceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
