// Entity Models - the six record kinds kept by the office
//
// Each entity has:
// - A prefixed record ID assigned by the kind's allocator, never reused
// - A human-readable summary (Describable)
// - A Record impl so stores and repositories stay generic over kinds
//
// Employee, Guest and Client embed the same PersonFields by value.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::identity::{EntityKind, RecordId};

pub mod person;
pub mod employee;
pub mod guest;
pub mod client;
pub mod supplier;
pub mod venue;
pub mod event;

pub use person::PersonFields;
pub use employee::Employee;
pub use guest::Guest;
pub use client::Client;
pub use supplier::Supplier;
pub use venue::Venue;
pub use event::Event;

/// Anything that can render itself for a details dialog or a listing.
pub trait Describable {
    fn summary(&self) -> String;
}

/// A persisted entity kind.
pub trait Record: Describable + Debug + Clone + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn id(&self) -> RecordId;
}
