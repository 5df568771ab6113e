// 🏢 Office - the application controller without the windows
//
// Owns one repository per entity kind and runs every user action against them:
//
//   add_*     form → validate → allocate ID → insert → save
//   modify_*  lookup → validate every change → apply → save
//   remove_*  lookup → delete → save
//   find_*    lookup → summary
//
// Rejected input and unknown IDs come back as OfficeError before anything is
// touched. Load and save problems never fail an operation: they are queued as
// notices and the in-memory state stays as it is.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::entities::{Client, Describable, Employee, Event, Guest, Record, Supplier, Venue};
use crate::error::{OfficeError, OfficeResult};
use crate::forms::{
    ClientChanges, ClientForm, EmployeeChanges, EmployeeForm, EventChanges, EventForm,
    GuestChanges, GuestForm, SupplierChanges, SupplierForm, VenueChanges, VenueForm,
};
use crate::identity::{EntityKind, RecordId};
use crate::notice::{Notice, NoticeLog};
use crate::repository::Repository;
use crate::store::Store;

pub struct Office {
    employees: Repository<Employee>,
    events: Repository<Event>,
    suppliers: Repository<Supplier>,
    guests: Repository<Guest>,
    clients: Repository<Client>,
    venues: Repository<Venue>,
    notices: NoticeLog,
}

impl Office {
    /// Load all six collections from `config.data_dir`.
    ///
    /// Never fails: a kind whose file is missing or unreadable starts empty and
    /// leaves a notice behind. Kinds do not affect each other.
    pub fn open(config: &Config) -> Self {
        let data_dir = config.data_dir();
        let mut notices = NoticeLog::new();

        if let Err(err) = fs::create_dir_all(data_dir) {
            notices.push(Notice::error(
                "Error",
                format!(
                    "Could not create data directory {}: {}",
                    data_dir.display(),
                    err
                ),
            ));
        }

        let employees = open_repository(data_dir, &mut notices);
        let events: Repository<Event> = open_repository(data_dir, &mut notices);
        let mut suppliers: Repository<Supplier> = open_repository(data_dir, &mut notices);
        let guests = open_repository(data_dir, &mut notices);
        let clients = open_repository(data_dir, &mut notices);
        let venues = open_repository(data_dir, &mut notices);

        // Event-owned suppliers share the SP sequence with the standalone ones
        for supplier in events.iter().flat_map(|event| event.suppliers.iter()) {
            suppliers.reserve_id(&supplier.supplier_id);
        }

        tracing::info!(
            data_dir = %data_dir.display(),
            employees = employees.len(),
            events = events.len(),
            suppliers = suppliers.len(),
            guests = guests.len(),
            clients = clients.len(),
            venues = venues.len(),
            "office opened"
        );

        Office {
            employees,
            events,
            suppliers,
            guests,
            clients,
            venues,
            notices,
        }
    }

    // ========================================================================
    // NOTICES
    // ========================================================================

    pub fn notices(&self) -> &[Notice] {
        self.notices.entries()
    }

    /// Hand pending notices to the front end.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    // ========================================================================
    // READ ACCESS
    // ========================================================================

    pub fn employees(&self) -> &Repository<Employee> {
        &self.employees
    }

    pub fn events(&self) -> &Repository<Event> {
        &self.events
    }

    pub fn suppliers(&self) -> &Repository<Supplier> {
        &self.suppliers
    }

    pub fn guests(&self) -> &Repository<Guest> {
        &self.guests
    }

    pub fn clients(&self) -> &Repository<Client> {
        &self.clients
    }

    pub fn venues(&self) -> &Repository<Venue> {
        &self.venues
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Employee => self.employees.len(),
            EntityKind::Event => self.events.len(),
            EntityKind::Supplier => self.suppliers.len(),
            EntityKind::Guest => self.guests.len(),
            EntityKind::Client => self.clients.len(),
            EntityKind::Venue => self.venues.len(),
        }
    }

    /// The ID the next creation of `kind` will receive, if any is left.
    pub fn next_id(&self, kind: EntityKind) -> Option<RecordId> {
        match kind {
            EntityKind::Employee => self.employees.next_id(),
            EntityKind::Event => self.events.next_id(),
            EntityKind::Supplier => self.suppliers.next_id(),
            EntityKind::Guest => self.guests.next_id(),
            EntityKind::Client => self.clients.next_id(),
            EntityKind::Venue => self.venues.next_id(),
        }
    }

    /// One summary per record of `kind`, in ID order.
    pub fn summaries(&self, kind: EntityKind) -> Vec<String> {
        match kind {
            EntityKind::Employee => summaries(&self.employees),
            EntityKind::Event => summaries(&self.events),
            EntityKind::Supplier => summaries(&self.suppliers),
            EntityKind::Guest => summaries(&self.guests),
            EntityKind::Client => summaries(&self.clients),
            EntityKind::Venue => summaries(&self.venues),
        }
    }

    /// Summary of any record, the kind being taken from the ID prefix.
    pub fn find_record(&self, raw_id: &str) -> OfficeResult<String> {
        let id: RecordId = raw_id
            .parse()
            .map_err(|_| OfficeError::UnknownId(raw_id.trim().to_string()))?;

        match id.kind() {
            EntityKind::Employee => find(&self.employees, raw_id),
            EntityKind::Event => find(&self.events, raw_id),
            EntityKind::Supplier => find(&self.suppliers, raw_id),
            EntityKind::Guest => find(&self.guests, raw_id),
            EntityKind::Client => find(&self.clients, raw_id),
            EntityKind::Venue => find(&self.venues, raw_id),
        }
    }

    // ========================================================================
    // EMPLOYEES
    // ========================================================================

    pub fn add_employee(&mut self, form: &EmployeeForm) -> OfficeResult<RecordId> {
        let employee = form.build(|| self.employees.allocate_id())?;
        Ok(create(&mut self.employees, &mut self.notices, employee))
    }

    pub fn modify_employee(&mut self, raw_id: &str, changes: &EmployeeChanges) -> OfficeResult<()> {
        modify(&mut self.employees, &mut self.notices, raw_id, |e| changes.apply_to(e))
    }

    pub fn remove_employee(&mut self, raw_id: &str) -> OfficeResult<Employee> {
        remove(&mut self.employees, &mut self.notices, raw_id)
    }

    pub fn find_employee(&self, raw_id: &str) -> OfficeResult<String> {
        find(&self.employees, raw_id)
    }

    // ========================================================================
    // EVENTS
    // ========================================================================

    pub fn add_event(&mut self, form: &EventForm) -> OfficeResult<RecordId> {
        let event = form.build(|| self.events.allocate_id())?;
        Ok(create(&mut self.events, &mut self.notices, event))
    }

    pub fn modify_event(&mut self, raw_id: &str, changes: &EventChanges) -> OfficeResult<()> {
        modify(&mut self.events, &mut self.notices, raw_id, |e| changes.apply_to(e))
    }

    /// Delete an event. Its guests and venues stay in their own collections;
    /// the suppliers it owned go with it.
    pub fn remove_event(&mut self, raw_id: &str) -> OfficeResult<Event> {
        remove(&mut self.events, &mut self.notices, raw_id)
    }

    pub fn find_event(&self, raw_id: &str) -> OfficeResult<String> {
        find(&self.events, raw_id)
    }

    // ========================================================================
    // EVENT LINKS
    // ========================================================================

    /// Attach a copy of a stored guest to an event.
    pub fn attach_guest(&mut self, event_id: &str, guest_id: &str) -> OfficeResult<()> {
        let guest = record(&self.guests, guest_id)?.clone();
        record_mut(&mut self.events, event_id)?.add_guest(guest);
        persist(&self.events, &mut self.notices);
        Ok(())
    }

    /// Detach a guest; returns whether anything was removed.
    pub fn detach_guest(&mut self, event_id: &str, guest_id: &str) -> OfficeResult<bool> {
        let event = record_mut(&mut self.events, event_id)?;
        let Ok(guest_id) = RecordId::parse_as(EntityKind::Guest, guest_id) else {
            return Ok(false);
        };

        let before = event.guests.len();
        event.remove_guest(guest_id);
        let removed = event.guests.len() != before;

        if removed {
            persist(&self.events, &mut self.notices);
        }
        Ok(removed)
    }

    /// Attach a copy of a stored venue; returns false if it was already attached.
    pub fn attach_venue(&mut self, event_id: &str, venue_id: &str) -> OfficeResult<bool> {
        let venue = record(&self.venues, venue_id)?.clone();
        let added = record_mut(&mut self.events, event_id)?.add_venue(venue);

        if added {
            persist(&self.events, &mut self.notices);
        }
        Ok(added)
    }

    /// Detach a venue; returns whether anything was removed.
    pub fn detach_venue(&mut self, event_id: &str, venue_id: &str) -> OfficeResult<bool> {
        let event = record_mut(&mut self.events, event_id)?;
        let Ok(venue_id) = RecordId::parse_as(EntityKind::Venue, venue_id) else {
            return Ok(false);
        };

        let removed = event.has_venue(venue_id);
        event.remove_venue_by_id(venue_id);

        if removed {
            persist(&self.events, &mut self.notices);
        }
        Ok(removed)
    }

    /// Create a supplier owned by the event.
    ///
    /// The ID comes from the supplier sequence, but the supplier is not added
    /// to the standalone supplier collection.
    pub fn add_event_supplier(&mut self, event_id: &str, form: &SupplierForm) -> OfficeResult<Supplier> {
        let event_key = resolve(&self.events, event_id)?;
        let draft = form.build(|| self.suppliers.allocate_id())?;

        let supplier = match self.events.get_mut(&event_key) {
            Some(event) => event
                .add_supplier(draft.supplier_id, draft.name, draft.service_type)
                .clone(),
            None => return Err(OfficeError::not_found(EntityKind::Event, event_id)),
        };

        tracing::info!(event = %event_key, supplier = %supplier.supplier_id, "supplier added to event");
        persist(&self.events, &mut self.notices);
        Ok(supplier)
    }

    /// Drop an event-owned supplier; returns whether anything was removed.
    pub fn remove_event_supplier(&mut self, event_id: &str, supplier_id: &str) -> OfficeResult<bool> {
        let event = record_mut(&mut self.events, event_id)?;
        let Ok(supplier_id) = RecordId::parse_as(EntityKind::Supplier, supplier_id) else {
            return Ok(false);
        };

        let before = event.suppliers.len();
        event.remove_supplier(supplier_id);
        let removed = event.suppliers.len() != before;

        if removed {
            persist(&self.events, &mut self.notices);
        }
        Ok(removed)
    }

    // ========================================================================
    // SUPPLIERS
    // ========================================================================

    pub fn add_supplier(&mut self, form: &SupplierForm) -> OfficeResult<RecordId> {
        let supplier = form.build(|| self.suppliers.allocate_id())?;
        Ok(create(&mut self.suppliers, &mut self.notices, supplier))
    }

    pub fn modify_supplier(&mut self, raw_id: &str, changes: &SupplierChanges) -> OfficeResult<()> {
        modify(&mut self.suppliers, &mut self.notices, raw_id, |s| changes.apply_to(s))
    }

    pub fn remove_supplier(&mut self, raw_id: &str) -> OfficeResult<Supplier> {
        remove(&mut self.suppliers, &mut self.notices, raw_id)
    }

    pub fn find_supplier(&self, raw_id: &str) -> OfficeResult<String> {
        find(&self.suppliers, raw_id)
    }

    // ========================================================================
    // GUESTS
    // ========================================================================

    pub fn add_guest(&mut self, form: &GuestForm) -> OfficeResult<RecordId> {
        let guest = form.build(|| self.guests.allocate_id())?;
        Ok(create(&mut self.guests, &mut self.notices, guest))
    }

    /// Modify a guest and every copy of it attached to an event.
    pub fn modify_guest(&mut self, raw_id: &str, changes: &GuestChanges) -> OfficeResult<()> {
        modify(&mut self.guests, &mut self.notices, raw_id, |g| changes.apply_to(g))?;

        let guest = record(&self.guests, raw_id)?.clone();
        refresh_events(&mut self.events, &mut self.notices, |event| event.refresh_guest(&guest));
        Ok(())
    }

    pub fn remove_guest(&mut self, raw_id: &str) -> OfficeResult<Guest> {
        remove(&mut self.guests, &mut self.notices, raw_id)
    }

    pub fn find_guest(&self, raw_id: &str) -> OfficeResult<String> {
        find(&self.guests, raw_id)
    }

    // ========================================================================
    // CLIENTS
    // ========================================================================

    pub fn add_client(&mut self, form: &ClientForm) -> OfficeResult<RecordId> {
        let client = form.build(|| self.clients.allocate_id())?;
        Ok(create(&mut self.clients, &mut self.notices, client))
    }

    pub fn modify_client(&mut self, raw_id: &str, changes: &ClientChanges) -> OfficeResult<()> {
        modify(&mut self.clients, &mut self.notices, raw_id, |c| changes.apply_to(c))
    }

    pub fn remove_client(&mut self, raw_id: &str) -> OfficeResult<Client> {
        remove(&mut self.clients, &mut self.notices, raw_id)
    }

    pub fn find_client(&self, raw_id: &str) -> OfficeResult<String> {
        find(&self.clients, raw_id)
    }

    // ========================================================================
    // VENUES
    // ========================================================================

    pub fn add_venue(&mut self, form: &VenueForm) -> OfficeResult<RecordId> {
        let venue = form.build(|| self.venues.allocate_id())?;
        Ok(create(&mut self.venues, &mut self.notices, venue))
    }

    /// Modify a venue and every copy of it attached to an event.
    pub fn modify_venue(&mut self, raw_id: &str, changes: &VenueChanges) -> OfficeResult<()> {
        modify(&mut self.venues, &mut self.notices, raw_id, |v| changes.apply_to(v))?;

        let venue = record(&self.venues, raw_id)?.clone();
        refresh_events(&mut self.events, &mut self.notices, |event| event.refresh_venue(&venue));
        Ok(())
    }

    pub fn remove_venue(&mut self, raw_id: &str) -> OfficeResult<Venue> {
        remove(&mut self.venues, &mut self.notices, raw_id)
    }

    pub fn find_venue(&self, raw_id: &str) -> OfficeResult<String> {
        find(&self.venues, raw_id)
    }
}

// ============================================================================
// GENERIC HELPERS
// ============================================================================

fn open_repository<T: Record>(data_dir: &Path, notices: &mut NoticeLog) -> Repository<T> {
    let (repository, notice) = Repository::open(Store::new(data_dir));
    if let Some(notice) = notice {
        notices.push(notice);
    }
    repository
}

/// Save a kind's collection; a failure becomes a notice and memory is kept.
fn persist<T: Record>(repository: &Repository<T>, notices: &mut NoticeLog) {
    if let Err(err) = repository.flush() {
        notices.push(Notice::error(
            "Error",
            format!(
                "An error occurred while saving {} data: {}",
                T::KIND.label().to_lowercase(),
                err
            ),
        ));
    }
}

fn resolve<T: Record>(repository: &Repository<T>, raw_id: &str) -> OfficeResult<RecordId> {
    repository
        .lookup(raw_id)
        .ok_or_else(|| OfficeError::not_found(T::KIND, raw_id))
}

fn record<'a, T: Record>(repository: &'a Repository<T>, raw_id: &str) -> OfficeResult<&'a T> {
    let id = resolve(repository, raw_id)?;
    repository
        .get(&id)
        .ok_or_else(|| OfficeError::not_found(T::KIND, raw_id))
}

fn record_mut<'a, T: Record>(
    repository: &'a mut Repository<T>,
    raw_id: &str,
) -> OfficeResult<&'a mut T> {
    let id = resolve(repository, raw_id)?;
    repository
        .get_mut(&id)
        .ok_or_else(|| OfficeError::not_found(T::KIND, raw_id))
}

fn create<T: Record>(repository: &mut Repository<T>, notices: &mut NoticeLog, record: T) -> RecordId {
    let id = record.id();
    repository.insert(record);
    tracing::info!(kind = T::KIND.label(), id = %id, "record created");
    persist(repository, notices);
    id
}

fn modify<T: Record>(
    repository: &mut Repository<T>,
    notices: &mut NoticeLog,
    raw_id: &str,
    apply: impl FnOnce(&mut T) -> OfficeResult<()>,
) -> OfficeResult<()> {
    let record = record_mut(repository, raw_id)?;
    apply(record)?;
    tracing::info!(kind = T::KIND.label(), id = raw_id.trim(), "record modified");
    persist(repository, notices);
    Ok(())
}

fn remove<T: Record>(
    repository: &mut Repository<T>,
    notices: &mut NoticeLog,
    raw_id: &str,
) -> OfficeResult<T> {
    let id = resolve(repository, raw_id)?;
    let removed = repository
        .remove(&id)
        .ok_or_else(|| OfficeError::not_found(T::KIND, raw_id))?;
    tracing::info!(kind = T::KIND.label(), id = %id, "record removed");
    persist(repository, notices);
    Ok(removed)
}

/// Apply `refresh` to every event; save the events once if any changed.
fn refresh_events(
    events: &mut Repository<Event>,
    notices: &mut NoticeLog,
    mut refresh: impl FnMut(&mut Event) -> bool,
) {
    let mut changed = false;
    for event in events.iter_mut() {
        changed |= refresh(event);
    }

    if changed {
        persist(events, notices);
    }
}

fn find<T: Record>(repository: &Repository<T>, raw_id: &str) -> OfficeResult<String> {
    record(repository, raw_id).map(Describable::summary)
}

fn summaries<T: Record>(repository: &Repository<T>) -> Vec<String> {
    repository.iter().map(Describable::summary).collect()
}

// ============================================================================
// TESTS
// ============================================================================
