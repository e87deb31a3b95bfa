//! Central roster state
//!
//! Pure business logic with no I/O dependencies. Every mutation that touches
//! the canonical collection or the filter set recomputes the filtered view
//! before returning, so the two can never drift apart.

use serde::Serialize;
use shared::{FilterKey, FilterSet, Student};

use super::filter;

/// Shown when a fetch fails
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch students. Please check your network connection and try again.";

/// Shown when an insert fails
pub const ADD_FAILED_MESSAGE: &str = "Failed to add student. Please try again later.";

/// Observable roster state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterState {
    /// Canonical collection as last synchronized with the store
    students: Vec<Student>,

    /// `students` filtered by `filters`
    filtered_students: Vec<Student>,

    loading: bool,

    error: Option<String>,

    filters: FilterSet,
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn filtered_students(&self) -> &[Student] {
        &self.filtered_students
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Mark a fetch as in flight
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace the canonical collection, keeping the current filters
    pub fn complete_fetch(&mut self, students: Vec<Student>) {
        self.students = students;
        self.refilter();
        self.loading = false;
        self.error = None;
    }

    /// Record a failed fetch; the collection is left as it was
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Append a stored record
    pub fn append_student(&mut self, student: Student) {
        self.students.push(student);
        self.refilter();
    }

    /// Record a failed insert; the collection is left as it was
    pub fn fail_insert(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_filter(&mut self, key: FilterKey, value: impl Into<String>) {
        self.filters.set(key, value);
        self.refilter();
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterSet::default();
        self.filtered_students = self.students.clone();
    }

    fn refilter(&mut self) {
        self.filtered_students = filter::apply(&self.students, &self.filters);
    }
}
