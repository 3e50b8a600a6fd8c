#![allow(dead_code)]

use batchid::{Error, core::traits::ConnectionError, prelude::*};
use std::collections::BTreeMap;

//
// Models
//

pub static USERS: TableModel = TableModel::new("users");
pub static ADDRESSES: TableModel = TableModel::new("addresses");
pub static STAFF: TableModel = TableModel::new("staff");
pub static MEMBERSHIPS: TableModel = TableModel::new("memberships");

static USER_PK: [ColumnModel; 1] = [ColumnModel::new(
    "id",
    &USERS,
    ColumnKind::Integer,
    Autoincrement::Auto,
)];
static ADDRESS_PK: [ColumnModel; 1] = [ColumnModel::new(
    "id",
    &ADDRESSES,
    ColumnKind::Integer,
    Autoincrement::Auto,
)];
static STAFF_PK: [ColumnModel; 1] = [ColumnModel::new(
    "id",
    &STAFF,
    ColumnKind::BigInt,
    Autoincrement::Always,
)];
static MEMBERSHIP_PK: [ColumnModel; 2] = [
    ColumnModel::new(
        "user_id",
        &MEMBERSHIPS,
        ColumnKind::Integer,
        Autoincrement::Never,
    ),
    ColumnModel::new(
        "group_id",
        &MEMBERSHIPS,
        ColumnKind::Integer,
        Autoincrement::Never,
    ),
];

pub static USER_ROOT: RootModel = RootModel::new("shop::User", &USERS, &USER_PK);
pub static ADDRESS_ROOT: RootModel = RootModel::new("shop::Address", &ADDRESSES, &ADDRESS_PK);
pub static STAFF_ROOT: RootModel = RootModel::new("shop::Staff", &STAFF, &STAFF_PK);
pub static MEMBERSHIP_ROOT: RootModel =
    RootModel::new("shop::Membership", &MEMBERSHIPS, &MEMBERSHIP_PK);

pub static USER: EntityModel = EntityModel::new("shop::User", &USER_ROOT);
pub static ADDRESS: EntityModel = EntityModel::new("shop::Address", &ADDRESS_ROOT);
pub static CLERK: EntityModel = EntityModel::new("shop::Clerk", &STAFF_ROOT);
pub static SUPERVISOR: EntityModel = EntityModel::new("shop::Supervisor", &STAFF_ROOT);
pub static MEMBERSHIP: EntityModel = EntityModel::new("shop::Membership", &MEMBERSHIP_ROOT);

///
/// Row
///

#[derive(Clone, Debug)]
pub struct Row {
    pub model: &'static EntityModel,
    pub created: u64,
    pub id: Option<i64>,
    pub position: usize,
}

impl PendingRecord for Row {
    fn model(&self) -> &'static EntityModel {
        self.model
    }

    fn creation_index(&self) -> u64 {
        self.created
    }

    fn primary_key(&self) -> Option<i64> {
        self.id
    }

    fn set_primary_key(&mut self, key: i64) {
        self.id = Some(key);
    }

    fn insert_order(&self) -> usize {
        self.position
    }

    fn set_insert_order(&mut self, order: usize) {
        self.position = order;
    }
}

///
/// SequenceDb
/// Named sequences behind a `SqlConnection`, with a statement log.
///

#[derive(Debug, Default)]
pub struct SequenceDb {
    next: BTreeMap<String, i64>,
    pub statements: Vec<(String, Vec<i64>)>,
    /// Drop this many rows from every result.
    pub short_by: usize,
}

impl SequenceDb {
    /// Another session draws `by` values from `sequence`.
    pub fn draw_elsewhere(&mut self, sequence: &str, by: i64) {
        *self.next.entry(sequence.to_string()).or_insert(1) += by;
    }
}

impl SqlConnection for SequenceDb {
    fn query_i64_column(
        &mut self,
        sql: &str,
        params: &[i64],
    ) -> Result<Vec<i64>, ConnectionError> {
        let sequence = sql
            .split("nextval('")
            .nth(1)
            .and_then(|rest| rest.split("')").next())
            .ok_or_else(|| ConnectionError::new(format!("unexpected statement: {sql}")))?
            .replace('"', "");
        let count = *params
            .first()
            .ok_or_else(|| ConnectionError::new("missing count"))?;
        self.statements.push((sequence.clone(), params.to_vec()));

        let next = self.next.entry(sequence).or_insert(1);
        let mut values: Vec<i64> = (*next..*next + count).collect();
        *next += count;
        values.truncate(values.len().saturating_sub(self.short_by));

        Ok(values)
    }
}

///
/// Session
///
/// Minimal unit of work: queues new rows, runs before-flush hooks, then
/// "emits" an INSERT per row in insert order.
///

#[derive(Default)]
pub struct Session {
    hooks: FlushHooks<Row, SequenceDb>,
    pub db: SequenceDb,
    pub pending: Vec<Row>,
    pub inserted: Vec<Row>,
    created: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, model: &'static EntityModel) -> &mut Row {
        let created = self.created;
        self.created += 1;
        self.pending.push(Row {
            model,
            created,
            id: None,
            position: self.pending.len(),
        });

        let last = self.pending.len() - 1;
        &mut self.pending[last]
    }

    pub fn add_all(&mut self, models: &[&'static EntityModel]) {
        for &model in models {
            self.add(model);
        }
    }

    pub fn flush(&mut self) -> Result<Vec<FlushOutcome>, Error> {
        let outcomes = self
            .hooks
            .run_before_flush(&mut self.db, FlushRequest::All(&mut self.pending))?;
        self.emit();

        Ok(outcomes)
    }

    /// Flush only the first `n` pending rows (the deprecated subset mode).
    pub fn flush_first(&mut self, n: usize) -> Result<Vec<FlushOutcome>, Error> {
        let outcomes = self
            .hooks
            .run_before_flush(&mut self.db, FlushRequest::Subset(&mut self.pending[..n]))?;

        Ok(outcomes)
    }

    fn emit(&mut self) {
        let mut rows = std::mem::take(&mut self.pending);
        rows.sort_by_key(|row| row.position);
        self.inserted.extend(rows);
    }
}

impl SessionHooks<Row, SequenceDb> for Session {
    fn register_before_flush(&mut self, hook: Box<dyn BeforeFlush<Row, SequenceDb>>) {
        self.hooks.register_before_flush(hook);
    }
}
