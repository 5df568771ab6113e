// 🤝 Client Entity - the people who book events

use serde::{Deserialize, Serialize};

use super::{Describable, PersonFields, Record};
use crate::identity::{EntityKind, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(flatten)]
    pub person: PersonFields,

    /// `C<n>`
    pub client_id: RecordId,

    pub budget: f64,
    pub num_of_events: u32,
}

impl Client {
    pub fn new(person: PersonFields, client_id: RecordId, budget: f64, num_of_events: u32) -> Self {
        Client {
            person,
            client_id,
            budget,
            num_of_events,
        }
    }

    pub fn get_full_name(&self) -> String {
        self.person.full_name()
    }

    pub fn update_budget(&mut self, new_budget: f64) {
        self.budget = new_budget;
    }

    pub fn update_num_of_events(&mut self, new_num_of_events: u32) {
        self.num_of_events = new_num_of_events;
    }
}

impl Describable for Client {
    fn summary(&self) -> String {
        format!(
            "{}, Client ID: {}, Budget: {}, Number of Events: {}",
            self.person.details(),
            self.client_id,
            self.budget,
            self.num_of_events
        )
    }
}

impl Record for Client {
    const KIND: EntityKind = EntityKind::Client;

    fn id(&self) -> RecordId {
        self.client_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> Client {
        Client::new(
            PersonFields::new(
                "Ann".to_string(),
                "Lee".to_string(),
                "Female".to_string(),
                "555-1111".to_string(),
            ),
            RecordId::new(EntityKind::Client, 1),
            1000.0,
            2,
        )
    }

    #[test]
    fn test_client_summary() {
        assert_eq!(
            ann().summary(),
            "Name: Ann Lee, Gender: Female, Phone: 555-1111, Client ID: C1, Budget: 1000, Number of Events: 2"
        );
    }

    #[test]
    fn test_client_updates() {
        let mut client = ann();
        client.update_budget(2500.75);
        client.update_num_of_events(5);

        assert_eq!(client.budget, 2500.75);
        assert_eq!(client.num_of_events, 5);
        assert_eq!(client.id().to_string(), "C1");
    }
}
