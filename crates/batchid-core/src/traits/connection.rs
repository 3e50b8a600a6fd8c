use std::error::Error as StdError;
use thiserror::Error as ThisError;

///
/// SqlConnection
///
/// Synchronous query channel bound to the caller's open transaction.
/// The hook issues at most one statement per eligible type group.
///

pub trait SqlConnection {
    /// Run `sql` with positional `params` and collect its single `bigint`
    /// result column, in the order the database returned the rows.
    fn query_i64_column(
        &mut self,
        sql: &str,
        params: &[i64],
    ) -> Result<Vec<i64>, ConnectionError>;
}

impl<C: SqlConnection + ?Sized> SqlConnection for &mut C {
    fn query_i64_column(
        &mut self,
        sql: &str,
        params: &[i64],
    ) -> Result<Vec<i64>, ConnectionError> {
        (**self).query_i64_column(sql, params)
    }
}

///
/// ConnectionError
/// Driver failure surfaced by a `SqlConnection` implementation.
///

#[derive(Debug, ThisError)]
#[error("connection error: {message}")]
pub struct ConnectionError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ConnectionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a driver error, keeping it as the error source.
    pub fn from_source(source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}
