//! Form error taxonomy
//!
//! Validation failures stay local and are keyed by field; submission
//! failures are form-level and leave the record untouched for a retry.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field-indexed validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`; the first message per field is kept.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Failure delivering a valid form to the server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Could not reach the server: {0}")]
    Network(String),

    #[error("Server rejected the request ({status})")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

/// Why the last submit attempt did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFailure {
    Validation(ValidationErrors),
    Submission(SubmissionError),
}
