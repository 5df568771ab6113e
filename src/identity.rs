// 🔖 Record identity - kind prefix + sequence number
//
// External form is the string the data files and users see: "EP3", "EV12", "G1".
// Internally an ID is a typed pair (kind, sequence) so the allocator and
// comparisons work on integers instead of slicing strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IdError;

// ============================================================================
// ENTITY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Employee,
    Event,
    Supplier,
    Guest,
    Client,
    Venue,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Employee,
        EntityKind::Event,
        EntityKind::Supplier,
        EntityKind::Guest,
        EntityKind::Client,
        EntityKind::Venue,
    ];

    /// Leading letters of every ID of this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Employee => "EP",
            EntityKind::Event => "EV",
            EntityKind::Supplier => "SP",
            EntityKind::Guest => "G",
            EntityKind::Client => "C",
            EntityKind::Venue => "V",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Employee => "Employee",
            EntityKind::Event => "Event",
            EntityKind::Supplier => "Supplier",
            EntityKind::Guest => "Guest",
            EntityKind::Client => "Client",
            EntityKind::Venue => "Venue",
        }
    }

    /// Name of the kind's data file, without extension.
    pub fn file_stem(&self) -> &'static str {
        match self {
            EntityKind::Employee => "employees",
            EntityKind::Event => "events",
            EntityKind::Supplier => "suppliers",
            EntityKind::Guest => "guests",
            EntityKind::Client => "clients",
            EntityKind::Venue => "venues",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<EntityKind> {
        EntityKind::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }

    /// Accepts the label or the file stem in any case ("guest", "Guests", "GUEST").
    pub fn from_name(name: &str) -> Option<EntityKind> {
        let lower = name.trim().to_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.label().to_lowercase() == lower || kind.file_stem() == lower)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// RECORD ID
// ============================================================================

/// Typed record identifier, serialized as its string form ("EP3").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId {
    kind: EntityKind,
    sequence: u64,
}

impl RecordId {
    pub fn new(kind: EntityKind, sequence: u64) -> Self {
        RecordId { kind, sequence }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Parse `text` and require it to name a record of `kind`.
    pub fn parse_as(kind: EntityKind, text: &str) -> Result<RecordId, IdError> {
        let id: RecordId = text.parse()?;
        if id.kind != kind {
            return Err(IdError::WrongKind {
                expected: kind,
                found: text.trim().to_string(),
            });
        }
        Ok(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.sequence)
    }
}

impl FromStr for RecordId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(IdError::Empty);
        }

        let digits_at = text
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(text.len());
        let (prefix, digits) = text.split_at(digits_at);

        let kind = EntityKind::from_prefix(prefix)
            .ok_or_else(|| IdError::UnknownPrefix(text.to_string()))?;
        let sequence = digits
            .parse::<u64>()
            .map_err(|_| IdError::InvalidSequence(text.to_string()))?;

        Ok(RecordId { kind, sequence })
    }
}

impl TryFrom<String> for RecordId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.to_string()
    }
}

// ============================================================================
// IDENTITY ALLOCATOR
// ============================================================================

/// Per-kind monotonic counter.
///
/// Seeded once from the loaded collection (highest sequence + 1, or 1 when the
/// collection is empty) and advanced by exactly one per successful creation.
/// Numbers are never handed out twice, even after the record is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    kind: EntityKind,
    // None once every sequence number up to u64::MAX has been used
    next: Option<u64>,
}

impl IdAllocator {
    pub fn new(kind: EntityKind) -> Self {
        IdAllocator { kind, next: Some(1) }
    }

    pub fn seeded<'a, I>(kind: EntityKind, ids: I) -> Self
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        let mut allocator = IdAllocator::new(kind);
        for id in ids {
            allocator.observe(id);
        }
        allocator
    }

    /// Make sure `id` can never be allocated again.
    pub fn observe(&mut self, id: &RecordId) {
        self.next = match (self.next, id.sequence.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The ID the next `allocate` call will return, if any is left.
    pub fn peek(&self) -> Option<RecordId> {
        self.next.map(|seq| RecordId::new(self.kind, seq))
    }

    pub fn allocate(&mut self) -> Result<RecordId, IdError> {
        let seq = self.next.ok_or(IdError::Exhausted(self.kind))?;
        self.next = seq.checked_add(1);
        Ok(RecordId::new(self.kind, seq))
    }
}

// ============================================================================
// TESTS
// ============================================================================
