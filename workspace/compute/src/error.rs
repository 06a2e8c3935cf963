use model::{BookingStatus, ModelError, StoreError, Table};
use thiserror::Error;

/// Error types for the dashboard panels
///
/// The panels render `to_string()` as opaque text, so store failures display
/// the backend's message unchanged.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Error reported by the remote table store
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A row from the store failed validation
    #[error(transparent)]
    Model(#[from] ModelError),

    /// User input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Status change not allowed by the booking workflow
    #[error("Cannot change booking status from {from} to {to}")]
    IllegalTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Lookup found nothing
    #[error("No {table} record found for {key}")]
    NotFound { table: Table, key: String },
}

impl From<validator::ValidationErrors> for DashboardError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DashboardError::Validation(errors.to_string())
    }
}

/// Type alias for Result with DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;
