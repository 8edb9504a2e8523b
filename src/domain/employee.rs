//! Employee records -- staff on the company payroll.
//!
//! Salary is kept as the text the user typed; there is no currency type.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, require};
use crate::error::ValidationError;
use crate::fields::Fields;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// A member of staff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Full name.
    pub name: String,
    /// Department the employee belongs to.
    pub department: String,
    /// Job title within the department.
    pub job_title: String,
    /// Salary as entered (free-form text).
    pub salary: String,
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        job_title: impl Into<String>,
        salary: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            job_title: job_title.into(),
            salary: salary.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Entity impl
// ---------------------------------------------------------------------------

impl Entity for Employee {
    const KIND: &'static str = "employee";
    const COLLECTION: &'static str = "employees";
    const FIELDS: &'static [&'static str] = &["name", "department", "job_title", "salary"];

    fn from_fields(fields: &Fields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: fields.text("name")?,
            department: fields.text("department")?,
            job_title: fields.text("job_title")?,
            salary: fields.text("salary")?,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", &self.name)
            .with("department", &self.department)
            .with("job_title", &self.job_title)
            .with("salary", &self.salary)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("department", &self.department)?;
        require("job_title", &self.job_title)?;
        require("salary", &self.salary)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
