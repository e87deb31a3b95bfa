//! Service trait definitions for dependency injection
//!
//! The remote table store is reached only through [`TableStore`], so the
//! roster container can run against the REST client, the in-memory table,
//! or a mock.

use async_trait::async_trait;
use shared::{NewStudent, Student};

use crate::error::StoreResult;

/// Sort order for a select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }

    /// PostgREST `order` query value, e.g. `name.asc`
    pub fn to_query_value(&self) -> String {
        let direction = if self.ascending { "asc" } else { "desc" };
        format!("{}.{}", self.column, direction)
    }
}

/// Remote row store holding student records
#[mockall::automock]
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Read every row of `table` in the given order
    async fn select_all(&self, table: &str, order: &OrderBy) -> StoreResult<Vec<Student>>;

    /// Insert one row and return it with its store-assigned identifier
    async fn insert_one(&self, table: &str, record: &NewStudent) -> StoreResult<Student>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_query_value() {
        assert_eq!(OrderBy::ascending("name").to_query_value(), "name.asc");
        assert_eq!(OrderBy::descending("date_joined").to_query_value(), "date_joined.desc");
    }
}
