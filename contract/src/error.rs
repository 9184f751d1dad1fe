//! Unified error types for the CRUD contract suites
//!
//! This module defines error types for each layer:
//! - `ModelError`: Failures raised by the model ports (and their doubles)
//! - `SetupError`: Fatal misconfiguration of a contract target
//! - `HarnessError`: Failures while simulating a request
//! - `ContractViolation`: A single failed expectation inside an example
//! - `ContractFailure`: All failed examples of a report

use std::fmt;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised by the model ports
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Couldn't find {model} with id={id}")]
    RecordNotFound { model: String, id: String },

    #[error("{receiver} received unexpected message :{method}")]
    Unstubbed { receiver: String, method: String },
}

/// Contract target setup errors - always fatal
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Cannot resolve resource name: {0:?}")]
    UnresolvableResource(String),
}

/// Errors raised while dispatching a simulated request
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Failed to build request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("Failed to encode params: {0}")]
    Params(#[from] serde_json::Error),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("{action} requires a record id")]
    MissingId { action: &'static str },
}

/// A failed expectation inside one contract example
#[derive(Debug, Error)]
pub enum ContractViolation {
    #[error("expected status {expected}, got {actual}")]
    Status {
        expected: StatusCode,
        actual: StatusCode,
    },

    #[error("expected a successful response, got {0}")]
    NotSuccessful(StatusCode),

    #[error("expected to render template {expected:?}, rendered {actual:?}")]
    Template {
        expected: String,
        actual: Option<String>,
    },

    #[error("expected redirect to {expected:?}, got {actual:?} (status {status})")]
    Redirect {
        expected: String,
        actual: Option<String>,
        status: StatusCode,
    },

    #[error("expected body {expected:?}, got {actual:?}")]
    Body { expected: String, actual: String },

    #[error("expected a flash notice to be set")]
    MissingNotice,

    #[error("view variable {key:?}: {reason}")]
    Assign { key: String, reason: String },

    #[error("expected {receiver} to receive :{method} with {expected}, received: [{received}]")]
    NotReceived {
        receiver: String,
        method: &'static str,
        expected: String,
        received: String,
    },

    #[error("harness error: {0}")]
    Harness(#[from] HarnessError),
}

/// Failed examples collected from a report
#[derive(Debug)]
pub struct ContractFailure {
    pub resource: String,
    pub failures: Vec<(String, String)>,
}

impl fmt::Display for ContractFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} contract: {} example(s) failed",
            self.resource,
            self.failures.len()
        )?;
        for (description, reason) in &self.failures {
            writeln!(f, "  - {}: {}", description, reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ContractFailure {}
