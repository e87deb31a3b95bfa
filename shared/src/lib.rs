//! Shared types for the student roster service
//!
//! Contains the domain types exchanged between the store client and the
//! web layer, the store configuration, and the logging setup used by every
//! binary in the workspace.

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::StoreConfig;
pub use errors::*;
pub use logging::Component;
pub use types::*;
