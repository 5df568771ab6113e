// 🚚 Supplier Entity - caterers, florists, AV crews...
//
// Lives either in the standalone supplier collection or inside the Event that
// created it (Event::add_supplier). The two are independent copies.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Describable, Record};
use crate::identity::{EntityKind, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    /// `SP<n>`
    pub supplier_id: RecordId,
    pub name: String,
    pub service_type: String,
}

impl Supplier {
    pub fn new(supplier_id: RecordId, name: String, service_type: String) -> Self {
        Supplier {
            supplier_id,
            name,
            service_type,
        }
    }
}

impl Describable for Supplier {
    fn summary(&self) -> String {
        format!(
            "Supplier ID: {}, Name: {}, Service Type: {}",
            self.supplier_id, self.name, self.service_type
        )
    }
}

impl fmt::Display for Supplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl Record for Supplier {
    const KIND: EntityKind = EntityKind::Supplier;

    fn id(&self) -> RecordId {
        self.supplier_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_display() {
        let supplier = Supplier::new(
            RecordId::new(EntityKind::Supplier, 3),
            "Bloom & Co".to_string(),
            "Florist".to_string(),
        );

        assert_eq!(
            supplier.to_string(),
            "Supplier ID: SP3, Name: Bloom & Co, Service Type: Florist"
        );
    }
}
