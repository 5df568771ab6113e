// 👤 Person fields - shared shape of Employee, Guest and Client
//
// Not a record on its own: it is never stored or given an ID, only embedded.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonFields {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
}

impl PersonFields {
    pub fn new(
        first_name: String,
        last_name: String,
        gender: String,
        phone_number: String,
    ) -> Self {
        PersonFields {
            first_name,
            last_name,
            gender,
            phone_number,
        }
    }

    /// "<first> <last>"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Base summary that every person-shaped kind extends.
    pub fn details(&self) -> String {
        format!(
            "Name: {}, Gender: {}, Phone: {}",
            self.full_name(),
            self.gender,
            self.phone_number
        )
    }
}
