//! Webserver library for the student roster service
//!
//! Exposes the roster over a JSON HTTP API and pushes every state change to
//! browser clients over WebSocket.

pub mod error;
pub mod form;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{ApiError, WebServerError, WebServerResult};
pub use form::{AddStudentForm, FieldError, FormOptions};
pub use types::*;
pub use webserver_impl::WebServer;
