//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod filter;
pub mod state;

// Re-export commonly used types
pub use filter::{apply, apply_in, calendar_day, matches_in};
pub use state::{ADD_FAILED_MESSAGE, FETCH_FAILED_MESSAGE, RosterState};
