//! Remote registration store.
//!
//! DESIGN
//! ======
//! The store owns every authoritative decision: uniqueness, authorization and
//! ordering. The client only reads the active list and appends rows, so the
//! seam is a two-method trait. [`postgrest::PostgrestStore`] talks to the
//! hosted table; tests substitute an in-memory fake.
//!
//! ERROR HANDLING
//! ==============
//! [`StoreError::message`] exposes the backend's own error text because the
//! sign-up flow classifies write failures by substring.

pub mod postgrest;

#[cfg(test)]
#[path = "fake_test.rs"]
pub(crate) mod fake;

use crate::registration::{NewRegistration, Registration};

pub use postgrest::PostgrestStore;

/// Errors produced by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("store request failed: {0}")]
    Request(String),

    /// The store answered with a non-success status.
    #[error("store responded with status {status}: {message}")]
    Response { status: u16, message: String },

    /// The response body could not be decoded into registrations.
    #[error("store response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl StoreError {
    /// Backend-provided error text, without the status prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Request(message)
            | Self::Parse(message)
            | Self::HttpClientBuild(message)
            | Self::Response { message, .. } => message,
        }
    }
}

/// Read/append access to the registrations table.
#[async_trait::async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Active registrations ordered by `created_at` ascending.
    async fn list_active(&self) -> Result<Vec<Registration>, StoreError>;

    /// Append one registration row.
    async fn insert(&self, registration: &NewRegistration) -> Result<(), StoreError>;
}
