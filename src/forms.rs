// 📝 Forms - raw text from the front end, validated into records
//
// Rules:
// - Every field of a create form is required (blank after trimming = missing)
// - Numeric fields must parse as the declared type (f64 amounts must be finite,
//   counts are u32)
// - Change forms treat a blank field as "keep the current value"
// - Nothing is applied unless every field is valid; an ID is only drawn from
//   the allocator after validation succeeded

use std::collections::BTreeMap;

use crate::entities::{Client, Employee, Event, Guest, PersonFields, Supplier, Venue};
use crate::error::{IdError, OfficeError, OfficeResult};
use crate::identity::RecordId;

// ============================================================================
// FIELD HELPERS
// ============================================================================

pub fn required(field: &'static str, value: &str) -> OfficeResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OfficeError::missing(field));
    }
    Ok(trimmed.to_string())
}

pub fn decimal(field: &'static str, value: &str) -> OfficeResult<f64> {
    let text = required(field, value)?;
    parse_decimal(field, &text)
}

pub fn count(field: &'static str, value: &str) -> OfficeResult<u32> {
    let text = required(field, value)?;
    parse_count(field, &text)
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn optional_decimal(field: &'static str, value: &str) -> OfficeResult<Option<f64>> {
    optional(value)
        .map(|text| parse_decimal(field, &text))
        .transpose()
}

fn optional_count(field: &'static str, value: &str) -> OfficeResult<Option<u32>> {
    optional(value)
        .map(|text| parse_count(field, &text))
        .transpose()
}

fn parse_decimal(field: &'static str, text: &str) -> OfficeResult<f64> {
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(OfficeError::invalid_number(field, "a number", text)),
    }
}

fn parse_count(field: &'static str, text: &str) -> OfficeResult<u32> {
    text.parse::<u32>()
        .map_err(|_| OfficeError::invalid_number(field, "a whole number", text))
}

fn replace_if_some<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

// ============================================================================
// CREATE FORMS
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct PersonForm {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
}

impl PersonForm {
    pub fn validate(&self) -> OfficeResult<PersonFields> {
        Ok(PersonFields::new(
            required("First Name", &self.first_name)?,
            required("Last Name", &self.last_name)?,
            required("Gender", &self.gender)?,
            required("Phone Number", &self.phone_number)?,
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    pub person: PersonForm,
    pub department: String,
    pub job_title: String,
    pub salary: String,
}

impl EmployeeForm {
    pub fn build(&self, next_id: impl FnOnce() -> Result<RecordId, IdError>) -> OfficeResult<Employee> {
        let person = self.person.validate()?;
        let department = required("Department", &self.department)?;
        let job_title = required("Job Title", &self.job_title)?;
        let salary = decimal("Salary", &self.salary)?;

        Ok(Employee::new(person, next_id()?, department, job_title, salary))
    }
}

#[derive(Debug, Clone, Default)]
pub struct GuestForm {
    pub person: PersonForm,
}

impl GuestForm {
    pub fn build(&self, next_id: impl FnOnce() -> Result<RecordId, IdError>) -> OfficeResult<Guest> {
        let person = self.person.validate()?;
        Ok(Guest::new(person, next_id()?))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientForm {
    pub person: PersonForm,
    pub budget: String,
    pub num_of_events: String,
}

impl ClientForm {
    pub fn build(&self, next_id: impl FnOnce() -> Result<RecordId, IdError>) -> OfficeResult<Client> {
        let person = self.person.validate()?;
        let budget = decimal("Budget", &self.budget)?;
        let num_of_events = count("Number of Events", &self.num_of_events)?;

        Ok(Client::new(person, next_id()?, budget, num_of_events))
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub event_type: String,
    pub date: String,
    pub time: String,
    pub duration: String,
}

impl EventForm {
    pub fn build(&self, next_id: impl FnOnce() -> Result<RecordId, IdError>) -> OfficeResult<Event> {
        let event_type = required("Type", &self.event_type)?;
        let date = required("Date", &self.date)?;
        let time = required("Time", &self.time)?;
        let duration = required("Duration", &self.duration)?;

        Ok(Event::new(next_id()?, event_type, date, time, duration))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SupplierForm {
    pub name: String,
    pub service_type: String,
}

impl SupplierForm {
    pub fn build(&self, next_id: impl FnOnce() -> Result<RecordId, IdError>) -> OfficeResult<Supplier> {
        let name = required("Name", &self.name)?;
        let service_type = required("Service Type", &self.service_type)?;

        Ok(Supplier::new(next_id()?, name, service_type))
    }
}

#[derive(Debug, Clone, Default)]
pub struct VenueForm {
    pub address: String,
    pub min_guests: String,
    pub max_guests: String,
}

impl VenueForm {
    pub fn build(&self, next_id: impl FnOnce() -> Result<RecordId, IdError>) -> OfficeResult<Venue> {
        let address = required("Address", &self.address)?;
        let min_guests = count("Min Guests", &self.min_guests)?;
        let max_guests = count("Max Guests", &self.max_guests)?;

        Ok(Venue::new(next_id()?, address, min_guests, max_guests))
    }
}

// ============================================================================
// CHANGE FORMS (blank = keep current)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub department: String,
    pub job_title: String,
    pub salary: String,
}

impl EmployeeChanges {
    pub fn apply_to(&self, employee: &mut Employee) -> OfficeResult<()> {
        let salary = optional_decimal("Salary", &self.salary)?;

        replace_if_some(&mut employee.department, optional(&self.department));
        replace_if_some(&mut employee.job_title, optional(&self.job_title));
        replace_if_some(&mut employee.salary, salary);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct GuestChanges {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl GuestChanges {
    pub fn apply_to(&self, guest: &mut Guest) -> OfficeResult<()> {
        let person = &mut guest.person;
        replace_if_some(&mut person.first_name, optional(&self.first_name));
        replace_if_some(&mut person.last_name, optional(&self.last_name));
        replace_if_some(&mut person.phone_number, optional(&self.phone_number));
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    pub budget: String,
    pub num_of_events: String,
}

impl ClientChanges {
    pub fn apply_to(&self, client: &mut Client) -> OfficeResult<()> {
        let budget = optional_decimal("Budget", &self.budget)?;
        let num_of_events = optional_count("Number of Events", &self.num_of_events)?;

        if let Some(budget) = budget {
            client.update_budget(budget);
        }
        if let Some(n) = num_of_events {
            client.update_num_of_events(n);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub event_type: String,
    pub date: String,
    pub time: String,
    pub duration: String,
}

impl EventChanges {
    pub fn apply_to(&self, event: &mut Event) -> OfficeResult<()> {
        replace_if_some(&mut event.event_type, optional(&self.event_type));
        replace_if_some(&mut event.date, optional(&self.date));
        replace_if_some(&mut event.time, optional(&self.time));
        replace_if_some(&mut event.duration, optional(&self.duration));
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SupplierChanges {
    pub name: String,
    pub service_type: String,
}

impl SupplierChanges {
    pub fn apply_to(&self, supplier: &mut Supplier) -> OfficeResult<()> {
        replace_if_some(&mut supplier.name, optional(&self.name));
        replace_if_some(&mut supplier.service_type, optional(&self.service_type));
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct VenueChanges {
    pub address: String,
    pub min_guests: String,
    pub max_guests: String,
}

impl VenueChanges {
    pub fn apply_to(&self, venue: &mut Venue) -> OfficeResult<()> {
        let min_guests = optional_count("Min Guests", &self.min_guests)?;
        let max_guests = optional_count("Max Guests", &self.max_guests)?;

        replace_if_some(&mut venue.address, optional(&self.address));
        replace_if_some(&mut venue.min_guests, min_guests);
        replace_if_some(&mut venue.max_guests, max_guests);
        Ok(())
    }
}

// ============================================================================
// FIELD ARGUMENTS (field=value)
// ============================================================================

/// `field=value` pairs from the command line, consumed by form field name.
#[derive(Debug, Clone, Default)]
pub struct FieldValues {
    values: BTreeMap<String, String>,
}

impl FieldValues {
    pub fn parse<S: AsRef<str>>(args: &[S]) -> OfficeResult<Self> {
        let mut values = BTreeMap::new();
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| OfficeError::MalformedField(arg.to_string()))?;
            values.insert(key.trim().to_lowercase(), value.to_string());
        }
        Ok(FieldValues { values })
    }

    /// Value for `key`, or an empty string when it was not given.
    pub fn take(&mut self, key: &str) -> String {
        self.values.remove(key).unwrap_or_default()
    }

    pub fn person(&mut self) -> PersonForm {
        PersonForm {
            first_name: self.take("first_name"),
            last_name: self.take("last_name"),
            gender: self.take("gender"),
            phone_number: self.take("phone_number"),
        }
    }

    /// Fails on the first field nobody asked for.
    pub fn finish(self) -> OfficeResult<()> {
        match self.values.into_keys().next() {
            Some(key) => Err(OfficeError::UnknownField(key)),
            None => Ok(()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::EntityKind;

    fn person_form() -> PersonForm {
        PersonForm {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            gender: "Female".to_string(),
            phone_number: "555-1111".to_string(),
        }
    }

    fn fixed_id(kind: EntityKind) -> impl FnOnce() -> Result<RecordId, IdError> {
        move || Ok(RecordId::new(kind, 1))
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("Name", "  Bloom  ").unwrap(), "Bloom");
        assert_eq!(required("Name", "   "), Err(OfficeError::MissingField("Name")));
    }

    #[test]
    fn test_decimal_and_count() {
        assert_eq!(decimal("Salary", "1234.5").unwrap(), 1234.5);
        assert_eq!(decimal("Salary", " 0 ").unwrap(), 0.0);
        assert!(matches!(
            decimal("Salary", "lots"),
            Err(OfficeError::InvalidNumber { field: "Salary", .. })
        ));
        assert!(decimal("Salary", "NaN").is_err());
        assert!(decimal("Salary", "inf").is_err());

        assert_eq!(count("Max Guests", "300").unwrap(), 300);
        assert!(count("Max Guests", "-3").is_err());
        assert!(count("Max Guests", "2.5").is_err());
        assert_eq!(count("Max Guests", ""), Err(OfficeError::MissingField("Max Guests")));
    }

    #[test]
    fn test_employee_form_builds() {
        let form = EmployeeForm {
            person: person_form(),
            department: "Ops".to_string(),
            job_title: "Lead".to_string(),
            salary: "52000".to_string(),
        };

        let employee = form.build(fixed_id(EntityKind::Employee)).unwrap();
        assert_eq!(employee.employee_id.to_string(), "EP1");
        assert_eq!(employee.salary, 52000.0);
        assert_eq!(employee.get_full_name(), "Ann Lee");
    }

    #[test]
    fn test_invalid_form_never_draws_an_id() {
        let form = EmployeeForm {
            person: person_form(),
            department: "Ops".to_string(),
            job_title: "Lead".to_string(),
            salary: "a lot".to_string(),
        };

        let mut drawn = false;
        let result = form.build(|| {
            drawn = true;
            Ok(RecordId::new(EntityKind::Employee, 1))
        });

        assert!(result.is_err());
        assert!(!drawn);
    }

    #[test]
    fn test_missing_person_field() {
        let mut form = GuestForm {
            person: person_form(),
        };
        form.person.phone_number.clear();

        assert_eq!(
            form.build(fixed_id(EntityKind::Guest)).unwrap_err(),
            OfficeError::MissingField("Phone Number")
        );
    }

    #[test]
    fn test_client_form_accepts_zero() {
        let form = ClientForm {
            person: person_form(),
            budget: "0".to_string(),
            num_of_events: "0".to_string(),
        };

        let client = form.build(fixed_id(EntityKind::Client)).unwrap();
        assert_eq!(client.budget, 0.0);
        assert_eq!(client.num_of_events, 0);
    }

    #[test]
    fn test_venue_form_rejects_non_integer() {
        let form = VenueForm {
            address: "1 Quay St".to_string(),
            min_guests: "ten".to_string(),
            max_guests: "100".to_string(),
        };

        assert!(matches!(
            form.build(fixed_id(EntityKind::Venue)),
            Err(OfficeError::InvalidNumber { field: "Min Guests", .. })
        ));
    }

    #[test]
    fn test_changes_blank_keeps_current() {
        let mut employee = EmployeeForm {
            person: person_form(),
            department: "Ops".to_string(),
            job_title: "Lead".to_string(),
            salary: "52000".to_string(),
        }
        .build(fixed_id(EntityKind::Employee))
        .unwrap();

        let changes = EmployeeChanges {
            department: "".to_string(),
            job_title: "Director".to_string(),
            salary: "  ".to_string(),
        };
        changes.apply_to(&mut employee).unwrap();

        assert_eq!(employee.department, "Ops");
        assert_eq!(employee.job_title, "Director");
        assert_eq!(employee.salary, 52000.0);
    }

    #[test]
    fn test_changes_are_all_or_nothing() {
        let mut venue = Venue::new(RecordId::new(EntityKind::Venue, 1), "Old".to_string(), 10, 20);
        let before = venue.clone();

        let changes = VenueChanges {
            address: "New".to_string(),
            min_guests: "15".to_string(),
            max_guests: "many".to_string(),
        };

        assert!(changes.apply_to(&mut venue).is_err());
        assert_eq!(venue, before);
    }

    #[test]
    fn test_client_changes_use_update_methods() {
        let mut client = ClientForm {
            person: person_form(),
            budget: "1000".to_string(),
            num_of_events: "2".to_string(),
        }
        .build(fixed_id(EntityKind::Client))
        .unwrap();

        ClientChanges {
            budget: "1500.25".to_string(),
            num_of_events: "".to_string(),
        }
        .apply_to(&mut client)
        .unwrap();

        assert_eq!(client.budget, 1500.25);
        assert_eq!(client.num_of_events, 2);
    }

    #[test]
    fn test_field_values_fill_a_form() {
        let mut fields = FieldValues::parse(&[
            "first_name=Ann",
            "LAST_NAME=Lee",
            "gender=Female",
            "phone_number=555-1111",
            "budget=1000",
            "num_of_events=2",
        ])
        .unwrap();

        let form = ClientForm {
            person: fields.person(),
            budget: fields.take("budget"),
            num_of_events: fields.take("num_of_events"),
        };
        fields.finish().unwrap();

        let client = form.build(fixed_id(EntityKind::Client)).unwrap();
        assert_eq!(client.get_full_name(), "Ann Lee");
        assert_eq!(client.num_of_events, 2);
    }

    #[test]
    fn test_field_values_reject_bad_input() {
        assert_eq!(
            FieldValues::parse(&["address"]).unwrap_err(),
            OfficeError::MalformedField("address".to_string())
        );

        let mut fields = FieldValues::parse(&["name=Glow", "colour=red"]).unwrap();
        assert_eq!(fields.take("name"), "Glow");
        assert_eq!(fields.take("service_type"), "");
        assert_eq!(fields.finish().unwrap_err(), OfficeError::UnknownField("colour".to_string()));
    }
}
