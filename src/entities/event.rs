// 🎉 Event Entity - the thing the company actually sells
//
// Relationships:
// - Guests and Venues are aggregated: they have their own collections and
//   survive being detached from (or the deletion of) an event.
// - Suppliers created through add_supplier are composed: they belong to this
//   event and go away with it.
//
// All remove_* operations are filters by ID. Removing something that is not
// attached leaves the list unchanged and is not an error.

use serde::{Deserialize, Serialize};

use super::{Describable, Guest, Record, Supplier, Venue};
use crate::identity::{EntityKind, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// `EV<n>`
    pub event_id: RecordId,

    pub event_type: String,
    pub date: String,
    pub time: String,
    pub duration: String,

    #[serde(default)]
    pub suppliers: Vec<Supplier>,

    #[serde(default)]
    pub venues: Vec<Venue>,

    #[serde(default)]
    pub guests: Vec<Guest>,
}

impl Event {
    pub fn new(
        event_id: RecordId,
        event_type: String,
        date: String,
        time: String,
        duration: String,
    ) -> Self {
        Event {
            event_id,
            event_type,
            date,
            time,
            duration,
            suppliers: Vec::new(),
            venues: Vec::new(),
            guests: Vec::new(),
        }
    }

    // ========================================================================
    // SUPPLIERS (composition)
    // ========================================================================

    /// Create a supplier owned by this event and return it.
    pub fn add_supplier(
        &mut self,
        supplier_id: RecordId,
        name: String,
        service_type: String,
    ) -> &Supplier {
        self.suppliers
            .push(Supplier::new(supplier_id, name, service_type));
        &self.suppliers[self.suppliers.len() - 1]
    }

    pub fn remove_supplier(&mut self, supplier_id: RecordId) {
        self.suppliers.retain(|s| s.supplier_id != supplier_id);
    }

    // ========================================================================
    // VENUES (aggregation, no duplicates)
    // ========================================================================

    /// Attach a venue unless one with the same ID is already attached.
    ///
    /// Returns whether the venue was added.
    pub fn add_venue(&mut self, venue: Venue) -> bool {
        if self.has_venue(venue.venue_id) {
            return false;
        }
        self.venues.push(venue);
        true
    }

    pub fn remove_venue(&mut self, venue: &Venue) {
        self.remove_venue_by_id(venue.venue_id);
    }

    pub fn remove_venue_by_id(&mut self, venue_id: RecordId) {
        self.venues.retain(|v| v.venue_id != venue_id);
    }

    pub fn has_venue(&self, venue_id: RecordId) -> bool {
        self.venues.iter().any(|v| v.venue_id == venue_id)
    }

    /// Overwrite the attached copy of `venue`, if any. Returns whether one was found.
    pub fn refresh_venue(&mut self, venue: &Venue) -> bool {
        let mut found = false;
        for attached in self.venues.iter_mut().filter(|v| v.venue_id == venue.venue_id) {
            *attached = venue.clone();
            found = true;
        }
        found
    }

    // ========================================================================
    // GUESTS (aggregation)
    // ========================================================================

    pub fn add_guest(&mut self, guest: Guest) {
        self.guests.push(guest);
    }

    pub fn remove_guest(&mut self, guest_id: RecordId) {
        self.guests.retain(|g| g.guest_id != guest_id);
    }

    /// Overwrite every attached copy of `guest`. Returns whether one was found.
    pub fn refresh_guest(&mut self, guest: &Guest) -> bool {
        let mut found = false;
        for attached in self.guests.iter_mut().filter(|g| g.guest_id == guest.guest_id) {
            *attached = guest.clone();
            found = true;
        }
        found
    }
}

impl Describable for Event {
    fn summary(&self) -> String {
        let guest_details = self
            .guests
            .iter()
            .map(|guest| guest.summary())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Event ID: {}, Type: {}, Date: {}, Time: {}, Duration: {}\nGuests: {}",
            self.event_id, self.event_type, self.date, self.time, self.duration, guest_details
        )
    }
}

impl Record for Event {
    const KIND: EntityKind = EntityKind::Event;

    fn id(&self) -> RecordId {
        self.event_id
    }
}

// ============================================================================
// TESTS
// ============================================================================
