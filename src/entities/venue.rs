// 🏛️ Venue Entity - referenced by events, outlives them

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Describable, Record};
use crate::identity::{EntityKind, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// `V<n>`
    pub venue_id: RecordId,
    pub address: String,
    pub min_guests: u32,
    pub max_guests: u32,
}

impl Venue {
    pub fn new(venue_id: RecordId, address: String, min_guests: u32, max_guests: u32) -> Self {
        Venue {
            venue_id,
            address,
            min_guests,
            max_guests,
        }
    }
}

impl Describable for Venue {
    fn summary(&self) -> String {
        format!(
            "Venue ID: {}, Address: {}, Min Guests: {}, Max Guests: {}",
            self.venue_id, self.address, self.min_guests, self.max_guests
        )
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl Record for Venue {
    const KIND: EntityKind = EntityKind::Venue;

    fn id(&self) -> RecordId {
        self.venue_id
    }
}
