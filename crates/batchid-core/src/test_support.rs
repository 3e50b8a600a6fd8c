use crate::traits::{ConnectionError, SqlConnection};
use std::collections::BTreeMap;

///
/// Fault
/// Misbehaviour injected into the next reservation.
///

#[derive(Clone, Copy, Debug)]
pub enum Fault {
    /// Return this many fewer rows than requested.
    Short(usize),
    /// Return the drawn values in descending order.
    Reversed,
    /// Fail with a driver error.
    Fail(&'static str),
}

///
/// Call
///

#[derive(Clone, Debug)]
pub struct Call {
    pub sql: String,
    pub params: Vec<i64>,
    /// Qualified sequence identifier as written inside `nextval('..')`.
    pub sequence: String,
}

///
/// FakeConnection
///
/// In-memory stand-in for a transaction connection. Each named sequence
/// starts at 1 unless seeded and keeps counting across calls.
///

#[derive(Debug, Default)]
pub struct FakeConnection {
    next: BTreeMap<String, i64>,
    calls: Vec<Call>,
    fault: Option<Fault>,
}

impl FakeConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the next value for a sequence, keyed by its unquoted display name.
    pub fn starting_at(mut self, sequence: &str, next: i64) -> Self {
        self.next.insert(sequence.to_string(), next);
        self
    }

    pub const fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Simulate another session drawing from the same sequence.
    pub fn advance(&mut self, sequence: &str, by: i64) {
        *self.next.entry(sequence.to_string()).or_insert(1) += by;
    }
}

fn sequence_literal(sql: &str) -> Option<String> {
    let start = sql.find("nextval('")? + "nextval('".len();
    let rest = &sql[start..];
    let end = rest.find("')")?;

    Some(rest[..end].replace("''", "'"))
}

impl SqlConnection for FakeConnection {
    fn query_i64_column(
        &mut self,
        sql: &str,
        params: &[i64],
    ) -> Result<Vec<i64>, ConnectionError> {
        let sequence = sequence_literal(sql)
            .ok_or_else(|| ConnectionError::new(format!("unexpected statement: {sql}")))?;
        self.calls.push(Call {
            sql: sql.to_string(),
            params: params.to_vec(),
            sequence: sequence.clone(),
        });

        if let Some(Fault::Fail(message)) = self.fault {
            return Err(ConnectionError::new(message));
        }

        let count = params
            .first()
            .copied()
            .ok_or_else(|| ConnectionError::new("missing count parameter"))?;
        let next = self.next.entry(sequence.replace('"', "")).or_insert(1);
        let mut values: Vec<i64> = (*next..*next + count).collect();
        *next += count;

        match self.fault {
            Some(Fault::Short(by)) => values.truncate(values.len().saturating_sub(by)),
            Some(Fault::Reversed) => values.reverse(),
            _ => {}
        }

        Ok(values)
    }
}
