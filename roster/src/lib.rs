//! Student roster state library
//!
//! Owns the canonical student collection, the active filter set and the
//! filtered view derived from them, and mediates every read and write to
//! the remote table store.

pub mod core;
pub mod error;
pub mod roster_impl;
pub mod services;
pub mod traits;

// Re-export main types
pub use crate::core::{RosterState, apply, apply_in};
pub use error::{StoreError, StoreResult};
pub use roster_impl::RosterStore;

// Re-export trait definitions
pub use traits::{OrderBy, TableStore};

// Re-export service implementations
pub use services::{InMemoryTableStore, RestTableStore};
