// 💾 Persistence Store - one JSON file per entity kind
//
// <data_dir>/employees.json, events.json, suppliers.json, guests.json,
// clients.json, venues.json
//
// Each file is a JSON object mapping the string ID to the record. A save always
// rewrites the whole file. There is no locking, no atomic rename and no
// versioning: the application has one user and one process.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::entities::Record;
use crate::error::StoreError;
use crate::identity::RecordId;
use crate::notice::Notice;

/// In-memory form of one kind's data file, sorted by ID.
pub type Collection<T> = BTreeMap<RecordId, T>;

/// Result of loading a kind's file: always a usable collection, plus a notice
/// when the file was absent or could not be read.
#[derive(Debug)]
pub struct Loaded<T> {
    pub records: Collection<T>,
    pub notice: Option<Notice>,
}

/// File-backed store for a single entity kind.
#[derive(Debug, Clone)]
pub struct Store<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Store<T> {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let path = data_dir
            .as_ref()
            .join(format!("{}.json", T::KIND.file_stem()));

        Store {
            path,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection, degrading to an empty one on any failure.
    ///
    /// A missing file is the normal first-run state and yields an
    /// informational notice; anything else yields an error notice and the
    /// caller starts from nothing. No repair or backup fallback is attempted.
    pub fn load(&self) -> Loaded<T> {
        let label = T::KIND.label();
        let lower = label.to_lowercase();

        match self.try_load() {
            Ok(records) => {
                tracing::debug!(kind = label, count = records.len(), "loaded {}", self.path.display());
                Loaded {
                    records,
                    notice: None,
                }
            }
            Err(err) if err.is_missing() => Loaded {
                records: Collection::new(),
                notice: Some(Notice::info(
                    "Information",
                    format!(
                        "{} data file not found. Starting with an empty {} dataset.",
                        label, lower
                    ),
                )),
            },
            Err(err) => Loaded {
                records: Collection::new(),
                notice: Some(Notice::error(
                    "Error",
                    format!("An error occurred while loading {} data: {}", lower, err),
                )),
            },
        }
    }

    /// Load the collection, reporting every failure to the caller.
    pub fn try_load(&self) -> Result<Collection<T>, StoreError> {
        let bytes = fs::read(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StoreError::Missing {
                    path: self.path.clone(),
                }
            } else {
                StoreError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let raw: BTreeMap<String, T> = decode(&bytes).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })?;

        let mut records = Collection::new();
        for (key, record) in raw {
            let id = self.check_key(&key, &record)?;
            if records.insert(id, record).is_some() {
                return Err(StoreError::DuplicateId {
                    path: self.path.clone(),
                    id: id.to_string(),
                });
            }
        }

        Ok(records)
    }

    // Every key must be an ID of this kind and match the record stored under it
    fn check_key(&self, key: &str, record: &T) -> Result<RecordId, StoreError> {
        let id: RecordId = key.parse().map_err(|source| StoreError::InvalidKey {
            path: self.path.clone(),
            key: key.to_string(),
            source,
        })?;

        if id.kind() != T::KIND {
            return Err(StoreError::ForeignId {
                path: self.path.clone(),
                id: key.to_string(),
            });
        }

        if record.id() != id {
            return Err(StoreError::KeyMismatch {
                path: self.path.clone(),
                key: key.to_string(),
                id: record.id().to_string(),
            });
        }

        Ok(id)
    }

    /// Serialize the whole collection and overwrite the kind's file.
    ///
    /// Creates the data directory on first use.
    pub fn save(&self, records: &Collection<T>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Encode {
            kind: T::KIND,
            source,
        })?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| StoreError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, bytes).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(kind = T::KIND.label(), count = records.len(), "saved {}", self.path.display());
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<BTreeMap<String, T>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Client, Employee, Event, Guest, PersonFields, Supplier, Venue};
    use crate::identity::EntityKind;
    use crate::notice::Severity;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn person(first: &str) -> PersonFields {
        PersonFields::new(
            first.to_string(),
            "Lee".to_string(),
            "Female".to_string(),
            "555-1111".to_string(),
        )
    }

    fn id(kind: EntityKind, seq: u64) -> RecordId {
        RecordId::new(kind, seq)
    }

    #[test]
    fn test_file_names_per_kind() {
        let tmp = TempDir::new().unwrap();

        assert!(Store::<Employee>::new(tmp.path()).path().ends_with("employees.json"));
        assert!(Store::<Event>::new(tmp.path()).path().ends_with("events.json"));
        assert!(Store::<Supplier>::new(tmp.path()).path().ends_with("suppliers.json"));
        assert!(Store::<Guest>::new(tmp.path()).path().ends_with("guests.json"));
        assert!(Store::<Client>::new(tmp.path()).path().ends_with("clients.json"));
        assert!(Store::<Venue>::new(tmp.path()).path().ends_with("venues.json"));
    }

    #[test]
    fn test_missing_file_is_empty_with_info_notice() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Guest> = Store::new(tmp.path());

        let loaded = store.load();
        assert!(loaded.records.is_empty());

        let notice = loaded.notice.unwrap();
        assert_eq!(notice.severity, Severity::Info);
        assert_eq!(
            notice.message,
            "Guest data file not found. Starting with an empty guest dataset."
        );
    }

    #[test]
    fn test_save_creates_data_dir() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("nested").join("data");
        let store: Store<Venue> = Store::new(&data_dir);

        store.save(&Collection::new()).unwrap();
        assert!(data_dir.join("venues.json").exists());
    }

    #[test]
    fn test_client_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Client> = Store::new(tmp.path());

        let mut clients = Collection::new();
        let ann = Client::new(person("Ann"), id(EntityKind::Client, 1), 1000.0, 2);
        clients.insert(ann.client_id, ann);

        store.save(&clients).unwrap();
        let loaded = Store::<Client>::new(tmp.path()).load();

        assert!(loaded.notice.is_none());
        assert_eq!(loaded.records, clients);
    }

    #[test]
    fn test_event_round_trip_keeps_links() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Event> = Store::new(tmp.path());

        let mut event = Event::new(
            id(EntityKind::Event, 3),
            "Conference".to_string(),
            "2024-03-02".to_string(),
            "09:00".to_string(),
            "2 days".to_string(),
        );
        event.add_guest(Guest::new(person("Ann"), id(EntityKind::Guest, 1)));
        event.add_venue(Venue::new(id(EntityKind::Venue, 2), "Hall A".to_string(), 50, 400));
        event.add_supplier(id(EntityKind::Supplier, 4), "Chef".to_string(), "Catering".to_string());

        let mut events = Collection::new();
        events.insert(event.event_id, event);

        store.save(&events).unwrap();
        assert_eq!(store.try_load().unwrap(), events);
    }

    #[test]
    fn test_file_is_keyed_by_string_id() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Supplier> = Store::new(tmp.path());

        let mut suppliers = Collection::new();
        let sp = Supplier::new(id(EntityKind::Supplier, 12), "Glow".to_string(), "Lighting".to_string());
        suppliers.insert(sp.supplier_id, sp);
        store.save(&suppliers).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw["SP12"]["name"], "Glow");
    }

    #[test]
    fn test_corrupt_file_is_empty_with_error_notice() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Employee> = Store::new(tmp.path());
        fs::write(store.path(), b"{ not json").unwrap();

        let loaded = store.load();
        assert!(loaded.records.is_empty());

        let notice = loaded.notice.unwrap();
        assert!(notice.is_error());
        assert!(notice
            .message
            .starts_with("An error occurred while loading employee data"));

        assert!(matches!(store.try_load(), Err(StoreError::Decode { .. })));
    }

    #[test]
    fn test_foreign_id_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Venue> = Store::new(tmp.path());
        fs::write(
            store.path(),
            br#"{"C1": {"venue_id": "C1", "address": "x", "min_guests": 1, "max_guests": 2}}"#,
        )
        .unwrap();

        assert!(matches!(store.try_load(), Err(StoreError::ForeignId { .. })));
        assert!(store.load().notice.unwrap().is_error());
    }

    #[test]
    fn test_kinds_are_independent() {
        let tmp = TempDir::new().unwrap();

        let clients: Store<Client> = Store::new(tmp.path());
        let mut records = Collection::new();
        let ann = Client::new(person("Ann"), id(EntityKind::Client, 1), 10.0, 1);
        records.insert(ann.client_id, ann);
        clients.save(&records).unwrap();

        // Break the employee file only
        fs::write(tmp.path().join("employees.json"), b"garbage").unwrap();

        assert!(Store::<Employee>::new(tmp.path()).load().notice.unwrap().is_error());

        let loaded = clients.load();
        assert!(loaded.notice.is_none());
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn test_save_into_unwritable_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocked");
        fs::write(&blocker, b"a file, not a directory").unwrap();

        let store: Store<Guest> = Store::new(&blocker);
        let err = store.save(&Collection::new()).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[test]
    fn test_employee_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Employee> = Store::new(tmp.path());

        let mut employees = Collection::new();
        for (seq, first) in [(2, "Kim"), (5, "Lou")] {
            let emp = Employee::new(
                person(first),
                id(EntityKind::Employee, seq),
                "Ops".to_string(),
                "Planner".to_string(),
                48000.5,
            );
            employees.insert(emp.employee_id, emp);
        }

        store.save(&employees).unwrap();
        assert_eq!(store.try_load().unwrap(), employees);
    }

    #[test]
    fn test_guest_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Guest> = Store::new(tmp.path());

        let mut guests = Collection::new();
        let bo = Guest::new(person("Bo"), id(EntityKind::Guest, 1));
        guests.insert(bo.guest_id, bo);

        store.save(&guests).unwrap();
        let loaded = Store::<Guest>::new(tmp.path()).load();
        assert!(loaded.notice.is_none());
        assert_eq!(loaded.records, guests);
    }

    #[test]
    fn test_supplier_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Supplier> = Store::new(tmp.path());

        let mut suppliers = Collection::new();
        for (seq, name) in [(1, "Glow"), (12, "Chef Co")] {
            let sp = Supplier::new(id(EntityKind::Supplier, seq), name.to_string(), "Catering".to_string());
            suppliers.insert(sp.supplier_id, sp);
        }

        store.save(&suppliers).unwrap();
        assert_eq!(store.try_load().unwrap(), suppliers);
    }

    #[test]
    fn test_key_must_match_record_id() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Venue> = Store::new(tmp.path());
        fs::write(
            store.path(),
            br#"{"V1": {"venue_id": "V9", "address": "x", "min_guests": 1, "max_guests": 2}}"#,
        )
        .unwrap();

        assert!(matches!(store.try_load(), Err(StoreError::KeyMismatch { .. })));
        assert!(store.load().notice.unwrap().is_error());
    }

    #[test]
    fn test_padded_duplicate_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Supplier> = Store::new(tmp.path());
        fs::write(
            store.path(),
            br#"{
                "SP7": {"supplier_id": "SP7", "name": "A", "service_type": "Music"},
                "SP007": {"supplier_id": "SP7", "name": "B", "service_type": "Music"}
            }"#,
        )
        .unwrap();

        assert!(matches!(store.try_load(), Err(StoreError::DuplicateId { .. })));
    }

    #[test]
    fn test_unparseable_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let store: Store<Supplier> = Store::new(tmp.path());
        fs::write(
            store.path(),
            br#"{"oops": {"supplier_id": "SP1", "name": "A", "service_type": "Music"}}"#,
        )
        .unwrap();

        assert!(matches!(store.try_load(), Err(StoreError::InvalidKey { .. })));
    }

    proptest! {
        #[test]
        fn prop_employee_file_round_trips(
            rows in proptest::collection::btree_map(
                1u64..10_000,
                ("[A-Za-z' -]{0,12}", "[A-Za-z&/ ]{0,16}", 0u32..5_000_000),
                0..8,
            )
        ) {
            let tmp = TempDir::new().unwrap();
            let store: Store<Employee> = Store::new(tmp.path());

            let employees: Collection<Employee> = rows
                .into_iter()
                .map(|(seq, (first, dept, salary))| {
                    let emp = Employee::new(
                        person(&first),
                        id(EntityKind::Employee, seq),
                        dept,
                        "Staff".to_string(),
                        f64::from(salary),
                    );
                    (emp.employee_id, emp)
                })
                .collect();

            store.save(&employees).unwrap();
            prop_assert_eq!(store.try_load().unwrap(), employees);
        }
    }
}
