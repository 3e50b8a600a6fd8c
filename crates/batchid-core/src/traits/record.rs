use crate::model::entity::EntityModel;

///
/// PendingRecord
///
/// A record queued for insertion in the current flush.
///
/// ## Semantics
/// - `model` and `creation_index` are read-only inputs supplied by the caller
/// - `primary_key` is `None` until either the caller or the populator sets it
/// - `insert_order` is the slot the persistence layer emits INSERTs by
///

pub trait PendingRecord {
    fn model(&self) -> &'static EntityModel;

    /// Order in which the caller created the record.
    fn creation_index(&self) -> u64;

    fn primary_key(&self) -> Option<i64>;

    fn set_primary_key(&mut self, key: i64);

    fn insert_order(&self) -> usize;

    fn set_insert_order(&mut self, order: usize);
}

impl<T: PendingRecord + ?Sized> PendingRecord for &mut T {
    fn model(&self) -> &'static EntityModel {
        (**self).model()
    }

    fn creation_index(&self) -> u64 {
        (**self).creation_index()
    }

    fn primary_key(&self) -> Option<i64> {
        (**self).primary_key()
    }

    fn set_primary_key(&mut self, key: i64) {
        (**self).set_primary_key(key);
    }

    fn insert_order(&self) -> usize {
        (**self).insert_order()
    }

    fn set_insert_order(&mut self, order: usize) {
        (**self).set_insert_order(order);
    }
}

impl<T: PendingRecord + ?Sized> PendingRecord for Box<T> {
    fn model(&self) -> &'static EntityModel {
        (**self).model()
    }

    fn creation_index(&self) -> u64 {
        (**self).creation_index()
    }

    fn primary_key(&self) -> Option<i64> {
        (**self).primary_key()
    }

    fn set_primary_key(&mut self, key: i64) {
        (**self).set_primary_key(key);
    }

    fn insert_order(&self) -> usize {
        (**self).insert_order()
    }

    fn set_insert_order(&mut self, order: usize) {
        (**self).set_insert_order(order);
    }
}
