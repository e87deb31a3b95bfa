//! Roster state container
//!
//! [`RosterStore`] owns the roster state and the table store it syncs with.
//! State lives in a `watch` channel so consumers can subscribe to every
//! change; async operations read the state current at the moment their
//! store call returns, never a copy taken when the call started.

use shared::logging::log_error;
use shared::{Component, FilterKey, FilterSet, NewStudent, STUDENTS_TABLE, Student, component_debug, component_info};
use tokio::sync::watch;

use crate::core::{ADD_FAILED_MESSAGE, FETCH_FAILED_MESSAGE, RosterState};
use crate::traits::{OrderBy, TableStore};

/// Single owner of roster state for one running service
pub struct RosterStore<S: TableStore> {
    table_store: S,
    state: watch::Sender<RosterState>,
}

impl<S: TableStore> RosterStore<S> {
    /// Create a container with empty state over `table_store`
    pub fn new(table_store: S) -> Self {
        let (state, _) = watch::channel(RosterState::new());
        Self { table_store, state }
    }

    /// Load every student, ordered by name
    ///
    /// On failure the collection is kept and a retryable error is exposed.
    /// Overlapping calls are not deduplicated; the last response to arrive wins.
    pub async fn fetch_students(&self) {
        self.state.send_modify(RosterState::begin_fetch);
        component_debug!(Component::Roster, "📥 Fetching students");

        match self
            .table_store
            .select_all(STUDENTS_TABLE, &OrderBy::ascending("name"))
            .await
        {
            Ok(students) => {
                let count = students.len();
                self.state.send_modify(|state| state.complete_fetch(students));
                component_info!(Component::Roster, "✅ Fetched {} students", count);
            }
            Err(e) => {
                log_error(Component::Roster, "Fetching students", &e);
                self.state.send_modify(|state| state.fail_fetch(FETCH_FAILED_MESSAGE));
            }
        }
    }

    /// Insert a student and append the stored record
    ///
    /// The candidate is expected to be validated by the caller. Returns the
    /// stored record, or `None` when the insert failed and the error state
    /// was set.
    pub async fn add_student(&self, candidate: NewStudent) -> Option<Student> {
        component_debug!(Component::Roster, "📤 Adding student '{}'", candidate.name);

        match self.table_store.insert_one(STUDENTS_TABLE, &candidate).await {
            Ok(student) => {
                component_info!(Component::Roster, "✅ Added student '{}' ({})", student.name, student.id);
                self.state.send_modify(|state| state.append_student(student.clone()));
                Some(student)
            }
            Err(e) => {
                log_error(Component::Roster, "Adding student", &e);
                self.state.send_modify(|state| state.fail_insert(ADD_FAILED_MESSAGE));
                None
            }
        }
    }

    /// Replace one filter field and recompute the filtered view
    pub fn set_filter(&self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        component_debug!(Component::Roster, "🔎 Filter {} = '{}'", key, value);
        self.state.send_modify(|state| state.set_filter(key, value));
    }

    /// Clear every filter
    pub fn reset_filters(&self) {
        component_debug!(Component::Roster, "🔎 Filters reset");
        self.state.send_modify(RosterState::reset_filters);
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> RosterState {
        self.state.borrow().clone()
    }

    pub fn students(&self) -> Vec<Student> {
        self.state.borrow().students().to_vec()
    }

    pub fn filtered_students(&self) -> Vec<Student> {
        self.state.borrow().filtered_students().to_vec()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error().map(str::to_string)
    }

    pub fn filters(&self) -> FilterSet {
        self.state.borrow().filters().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<RosterState> {
        self.state.subscribe()
    }

    pub fn table_store(&self) -> &S {
        &self.table_store
    }
}
