//! Shared error types for the roster service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Unknown filter key: {key}")]
    UnknownFilterKey { key: String },

    #[error("Unknown student status: {value}")]
    UnknownStatus { value: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
