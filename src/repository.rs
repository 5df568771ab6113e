// 🗂️ Repository - one kind's loaded collection, ID allocator and store
//
// Built once at start-up with an explicit load, then handed by reference to
// whatever needs it. Mutations stay in memory until flush().

use crate::entities::Record;
use crate::error::{IdError, StoreError};
use crate::identity::{EntityKind, IdAllocator, RecordId};
use crate::notice::Notice;
use crate::store::{Collection, Store};

#[derive(Debug)]
pub struct Repository<T: Record> {
    store: Store<T>,
    records: Collection<T>,
    ids: IdAllocator,
}

impl<T: Record> Repository<T> {
    /// Load the kind's file and seed the allocator from what was found.
    pub fn open(store: Store<T>) -> (Self, Option<Notice>) {
        let loaded = store.load();
        let ids = IdAllocator::seeded(T::KIND, loaded.records.keys());

        let repository = Repository {
            store,
            records: loaded.records,
            ids,
        };
        (repository, loaded.notice)
    }

    pub fn kind(&self) -> EntityKind {
        T::KIND
    }

    pub fn store(&self) -> &Store<T> {
        &self.store
    }

    /// The ID the next creation will receive; `None` once the sequence is used up.
    pub fn next_id(&self) -> Option<RecordId> {
        self.ids.peek()
    }

    /// Take the next ID. Only call this once a creation is certain to succeed.
    pub fn allocate_id(&mut self) -> Result<RecordId, IdError> {
        self.ids.allocate()
    }

    /// Keep `id` from ever being allocated, e.g. an ID held outside this collection.
    pub fn reserve_id(&mut self, id: &RecordId) {
        self.ids.observe(id);
    }

    /// Insert or replace a record under its own ID.
    pub fn insert(&mut self, record: T) -> Option<T> {
        self.records.insert(record.id(), record)
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.records.get(id)
    }

    pub fn get_mut(&mut self, id: &RecordId) -> Option<&mut T> {
        self.records.get_mut(id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.contains_key(id)
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<T> {
        self.records.remove(id)
    }

    /// Resolve user-typed text to the ID of an existing record of this kind.
    pub fn lookup(&self, text: &str) -> Option<RecordId> {
        RecordId::parse_as(T::KIND, text)
            .ok()
            .filter(|id| self.contains(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.records.values_mut()
    }

    pub fn records(&self) -> &Collection<T> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the whole collection to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.store.save(&self.records)
    }
}
