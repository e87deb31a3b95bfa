//! Service implementations
//!
//! Real implementations of the table store trait

pub mod memory_store;
pub mod rest_store;

// Re-export service implementations
pub use memory_store::{InMemoryTableStore, demo_students};
pub use rest_store::RestTableStore;
