//! In-memory table store
//!
//! Process-local stand-in for the remote store. Rows live only as long as
//! the process; identifiers are random UUIDs assigned on insert.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::{Component, NewStudent, STUDENTS_TABLE, Student, StudentStatus, component_debug};

use crate::error::{StoreError, StoreResult};
use crate::traits::{OrderBy, TableStore};

/// Table store holding rows in memory
#[derive(Clone, Default)]
pub struct InMemoryTableStore {
    tables: Arc<RwLock<HashMap<String, Vec<Student>>>>,
    failing: Arc<AtomicBool>,
    select_calls: Arc<AtomicU64>,
    insert_calls: Arc<AtomicU64>,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `rows` in `table`
    pub fn with_rows(table: &str, rows: Vec<Student>) -> Self {
        let mut tables = HashMap::new();
        tables.insert(table.to_string(), rows);

        Self {
            tables: Arc::new(RwLock::new(tables)),
            ..Self::default()
        }
    }

    /// Store seeded with the sample roster
    pub fn demo() -> Self {
        Self::with_rows(STUDENTS_TABLE, demo_students())
    }

    /// Make every following call fail with [`StoreError::Unavailable`]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, AtomicOrdering::SeqCst);
    }

    /// Rows of `table` in insertion order
    pub async fn rows(&self, table: &str) -> Vec<Student> {
        self.tables.read().await.get(table).cloned().unwrap_or_default()
    }

    pub fn select_calls(&self) -> u64 {
        self.select_calls.load(AtomicOrdering::Relaxed)
    }

    pub fn insert_calls(&self) -> u64 {
        self.insert_calls.load(AtomicOrdering::Relaxed)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::unavailable("in-memory store switched to failing mode"));
        }
        Ok(())
    }

    /// Compare two rows on `column`; unknown columns compare equal
    fn compare_column(column: &str, a: &Student, b: &Student) -> Ordering {
        match column {
            "id" => a.id.cmp(&b.id),
            "name" => a.name.cmp(&b.name),
            "cohort" => a.cohort.cmp(&b.cohort),
            "date_joined" => a.date_joined.cmp(&b.date_joined),
            "last_login" => a.last_login.cmp(&b.last_login),
            "status" => a.status.as_str().cmp(b.status.as_str()),
            _ => Ordering::Equal,
        }
    }
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn select_all(&self, table: &str, order: &OrderBy) -> StoreResult<Vec<Student>> {
        self.select_calls.fetch_add(1, AtomicOrdering::Relaxed);
        self.check_available()?;

        // Stable sort: ties and unknown columns keep insertion order
        let mut rows = self.rows(table).await;
        rows.sort_by(|a, b| {
            let ordering = Self::compare_column(&order.column, a, b);
            if order.ascending { ordering } else { ordering.reverse() }
        });

        component_debug!(Component::Store, "Selected {} rows from in-memory '{}'", rows.len(), table);
        Ok(rows)
    }

    async fn insert_one(&self, table: &str, record: &NewStudent) -> StoreResult<Student> {
        self.insert_calls.fetch_add(1, AtomicOrdering::Relaxed);
        self.check_available()?;

        let student = record.clone().with_id(Uuid::new_v4().to_string());
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(student.clone());

        component_debug!(Component::Store, "Inserted '{}' into in-memory '{}'", student.id, table);
        Ok(student)
    }
}

/// Sample roster rows
pub fn demo_students() -> Vec<Student> {
    vec![
        Student {
            id: "demo-asha".to_string(),
            name: "Asha".to_string(),
            cohort: "AY 2024-25".to_string(),
            courses: vec!["CBSE 9 Science".to_string()],
            date_joined: "2024-06-03T09:30:00+00:00".to_string(),
            last_login: "2024-11-18T16:05:00+00:00".to_string(),
            status: StudentStatus::Active,
        },
        Student {
            id: "demo-ravi".to_string(),
            name: "Ravi".to_string(),
            cohort: "AY 2023-24".to_string(),
            courses: vec!["CBSE 9 Math".to_string()],
            date_joined: "2023-06-05T10:00:00+00:00".to_string(),
            last_login: "2024-02-11T08:45:00+00:00".to_string(),
            status: StudentStatus::Inactive,
        },
    ]
}
