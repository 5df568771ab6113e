// 🎟️ Guest Entity - may be attached to any number of events

use serde::{Deserialize, Serialize};

use super::{Describable, PersonFields, Record};
use crate::identity::{EntityKind, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    #[serde(flatten)]
    pub person: PersonFields,

    /// `G<n>`
    pub guest_id: RecordId,
}

impl Guest {
    pub fn new(person: PersonFields, guest_id: RecordId) -> Self {
        Guest { person, guest_id }
    }

    pub fn get_full_name(&self) -> String {
        self.person.full_name()
    }
}

impl Describable for Guest {
    fn summary(&self) -> String {
        format!("{}, Guest ID: {}", self.person.details(), self.guest_id)
    }
}

impl Record for Guest {
    const KIND: EntityKind = EntityKind::Guest;

    fn id(&self) -> RecordId {
        self.guest_id
    }
}
