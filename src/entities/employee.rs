// 🧑‍💼 Employee Entity - staff of the events company

use serde::{Deserialize, Serialize};

use super::{Describable, PersonFields, Record};
use crate::identity::{EntityKind, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(flatten)]
    pub person: PersonFields,

    /// `EP<n>`
    pub employee_id: RecordId,

    pub department: String,
    pub job_title: String,
    pub salary: f64,
}

impl Employee {
    pub fn new(
        person: PersonFields,
        employee_id: RecordId,
        department: String,
        job_title: String,
        salary: f64,
    ) -> Self {
        Employee {
            person,
            employee_id,
            department,
            job_title,
            salary,
        }
    }

    pub fn get_full_name(&self) -> String {
        self.person.full_name()
    }
}

impl Describable for Employee {
    fn summary(&self) -> String {
        format!(
            "{}\nEmployee ID: {}\nDepartment: {}\nJob Title: {}\nSalary: {}",
            self.person.details(),
            self.employee_id,
            self.department,
            self.job_title,
            self.salary
        )
    }
}

impl Record for Employee {
    const KIND: EntityKind = EntityKind::Employee;

    fn id(&self) -> RecordId {
        self.employee_id
    }
}
