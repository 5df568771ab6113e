// Event Records - Core Library
// Employees, events, suppliers, guests, clients and venues for an events company,
// kept in one JSON file per kind. Used by the CLI and by tests.

pub mod config;
pub mod entities;
pub mod error;
pub mod forms;
pub mod identity;
pub mod logging;
pub mod notice;
pub mod office;
pub mod repository;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use entities::{
    Client, Describable, Employee, Event, Guest, PersonFields, Record, Supplier, Venue,
};
pub use error::{IdError, OfficeError, OfficeResult, StoreError};
pub use forms::{
    ClientChanges, ClientForm, EmployeeChanges, EmployeeForm, EventChanges, EventForm,
    FieldValues, GuestChanges, GuestForm, PersonForm, SupplierChanges, SupplierForm, VenueChanges,
    VenueForm,
};
pub use identity::{EntityKind, IdAllocator, RecordId};
pub use notice::{Notice, NoticeLog, Severity};
pub use office::Office;
pub use repository::Repository;
pub use store::{Collection, Loaded, Store};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
