use crate::{
    model::{
        column::{Autoincrement, ColumnKind, ColumnModel},
        entity::{EntityModel, RootModel},
        table::TableModel,
    },
    traits::PendingRecord,
};

///
/// Tables
///

pub static USERS: TableModel = TableModel::new("users");
pub static ADDRESSES: TableModel = TableModel::new("addresses");
pub static STAFF: TableModel = TableModel::new("staff");
pub static MEMBERSHIPS: TableModel = TableModel::new("memberships");
pub static TOKENS: TableModel = TableModel::new("tokens");
pub static ACCOUNTS: TableModel = TableModel::new("accounts");
pub static LEDGER: TableModel = TableModel::new("ledger");
pub static REPORT_VIEW: TableModel = TableModel::new("report_view");
pub static REPORTS: TableModel = TableModel::new("reports");
pub static KEYLESS: TableModel = TableModel::new("keyless");
pub static EVENTS: TableModel = TableModel::in_schema("events", "archive");

const fn serial_id(table: &'static TableModel, kind: ColumnKind) -> [ColumnModel; 1] {
    [ColumnModel::new("id", table, kind, Autoincrement::Auto)]
}

///
/// Roots
///

static USER_PK: [ColumnModel; 1] = serial_id(&USERS, ColumnKind::Integer);
pub static USER_ROOT: RootModel = RootModel::new("app::User", &USERS, &USER_PK);

static ADDRESS_PK: [ColumnModel; 1] = serial_id(&ADDRESSES, ColumnKind::Integer);
pub static ADDRESS_ROOT: RootModel = RootModel::new("app::Address", &ADDRESSES, &ADDRESS_PK);

// single-table inheritance: Employee and Manager share `staff`
static STAFF_PK: [ColumnModel; 1] = serial_id(&STAFF, ColumnKind::BigInt);
pub static STAFF_ROOT: RootModel = RootModel::new("app::Staff", &STAFF, &STAFF_PK);

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
pub static MEMBERSHIP_ROOT: RootModel =
    RootModel::new("app::Membership", &MEMBERSHIPS, &MEMBERSHIP_PK);

static TOKEN_PK: [ColumnModel; 1] = serial_id(&TOKENS, ColumnKind::Uuid);
pub static TOKEN_ROOT: RootModel = RootModel::new("app::Token", &TOKENS, &TOKEN_PK);

static ACCOUNT_PK: [ColumnModel; 1] = [ColumnModel::new(
    "account_id",
    &ACCOUNTS,
    ColumnKind::Integer,
    Autoincrement::Auto,
)];
pub static ACCOUNT_ROOT: RootModel = RootModel::new("app::Account", &ACCOUNTS, &ACCOUNT_PK);

static LEDGER_PK: [ColumnModel; 1] = [ColumnModel::new(
    "id",
    &LEDGER,
    ColumnKind::BigInt,
    Autoincrement::Never,
)];
pub static LEDGER_ROOT: RootModel = RootModel::new("app::Ledger", &LEDGER, &LEDGER_PK);

// mapped over a view; the key column lives on the underlying table
static REPORT_PK: [ColumnModel; 1] = serial_id(&REPORTS, ColumnKind::Integer);
pub static REPORT_ROOT: RootModel = RootModel::new("app::Report", &REPORT_VIEW, &REPORT_PK);

pub static KEYLESS_ROOT: RootModel = RootModel::new("app::Keyless", &KEYLESS, &[]);

static EVENT_PK: [ColumnModel; 1] = serial_id(&EVENTS, ColumnKind::SmallInt);
pub static EVENT_ROOT: RootModel = RootModel::new("app::ArchivedEvent", &EVENTS, &EVENT_PK);

///
/// Concrete types
///

pub static USER: EntityModel = EntityModel::new("app::User", &USER_ROOT);
pub static ADDRESS: EntityModel = EntityModel::new("app::Address", &ADDRESS_ROOT);
pub static EMPLOYEE: EntityModel = EntityModel::new("app::Employee", &STAFF_ROOT);
pub static MANAGER: EntityModel = EntityModel::new("app::Manager", &STAFF_ROOT);
pub static MEMBERSHIP: EntityModel = EntityModel::new("app::Membership", &MEMBERSHIP_ROOT);
pub static TOKEN: EntityModel = EntityModel::new("app::Token", &TOKEN_ROOT);
pub static EVENT: EntityModel = EntityModel::new("app::ArchivedEvent", &EVENT_ROOT);

///
/// TestRecord
///

#[derive(Clone, Debug)]
pub struct TestRecord {
    pub model: &'static EntityModel,
    pub creation: u64,
    pub id: Option<i64>,
    pub insert_order: usize,
}

impl TestRecord {
    pub const fn new(model: &'static EntityModel, creation: u64) -> Self {
        Self {
            model,
            creation,
            id: None,
            insert_order: 0,
        }
    }

    pub const fn keyed(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl PendingRecord for TestRecord {
    fn model(&self) -> &'static EntityModel {
        self.model
    }

    fn creation_index(&self) -> u64 {
        self.creation
    }

    fn primary_key(&self) -> Option<i64> {
        self.id
    }

    fn set_primary_key(&mut self, key: i64) {
        self.id = Some(key);
    }

    fn insert_order(&self) -> usize {
        self.insert_order
    }

    fn set_insert_order(&mut self, order: usize) {
        self.insert_order = order;
    }
}

/// One record per model, created and queued in slice order.
pub fn batch(models: &[&'static EntityModel]) -> Vec<TestRecord> {
    models
        .iter()
        .enumerate()
        .map(|(i, &model)| {
            let mut record = TestRecord::new(model, i as u64);
            record.insert_order = i;
            record
        })
        .collect()
}

/// Records sorted by their assigned insert order.
pub fn in_insert_order(records: &[TestRecord]) -> Vec<&TestRecord> {
    let mut sorted: Vec<_> = records.iter().collect();
    sorted.sort_by_key(|record| record.insert_order);
    sorted
}
