use thiserror::Error;

use crate::store::Table;

/// Errors raised while turning store rows into typed records
#[derive(Error, Debug)]
pub enum ModelError {
    /// A row did not match the record shape expected for its table
    #[error("Invalid {table} row: {source}")]
    Decode {
        table: Table,
        #[source]
        source: serde_json::Error,
    },

    /// A lookup expected a row but the store returned none
    #[error("No matching row in {table}")]
    MissingRow { table: Table },

    /// A record could not be encoded for a mutation
    #[error("Failed to encode {table} row: {source}")]
    Encode {
        table: Table,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
