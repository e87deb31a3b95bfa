//! Add-student form
//!
//! Validation rules and option lists for the form a client submits to create
//! a student.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{NewStudent, StudentStatus};

/// Cohorts offered by the form
pub const COHORT_OPTIONS: [&str; 2] = ["AY 2024-25", "AY 2023-24"];

/// Courses offered by the form
pub const COURSE_OPTIONS: [&str; 2] = ["CBSE 9 Science", "CBSE 9 Math"];

/// Cohort used when the form leaves it blank
pub const DEFAULT_COHORT: &str = "AY 2024-25";

pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const NO_COURSES: &str = "Select at least one course";

/// Submitted form body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cohort: Option<String>,
    #[serde(default)]
    pub courses: Vec<String>,
}

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl AddStudentForm {
    /// Check every field, collecting all failures
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < 2 {
            errors.push(FieldError::new("name", NAME_TOO_SHORT));
        }
        if self.courses.is_empty() {
            errors.push(FieldError::new("courses", NO_COURSES));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate and build the record to insert, stamped with the current time
    pub fn into_new_student(self) -> Result<NewStudent, Vec<FieldError>> {
        self.into_new_student_at(Utc::now())
    }

    pub fn into_new_student_at(self, now: DateTime<Utc>) -> Result<NewStudent, Vec<FieldError>> {
        self.validate()?;

        let cohort = self
            .cohort
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COHORT.to_string());
        let timestamp = now.to_rfc3339();

        Ok(NewStudent {
            name: self.name.trim().to_string(),
            cohort,
            courses: self.courses,
            date_joined: timestamp.clone(),
            last_login: timestamp,
            status: StudentStatus::Active,
        })
    }
}

/// Option lists and defaults a client needs to render the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    pub cohorts: Vec<String>,
    pub courses: Vec<String>,
    pub default_cohort: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            cohorts: COHORT_OPTIONS.iter().map(|c| c.to_string()).collect(),
            courses: COURSE_OPTIONS.iter().map(|c| c.to_string()).collect(),
            default_cohort: DEFAULT_COHORT.to_string(),
        }
    }
}
