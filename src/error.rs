//! Error types for latent-grid library.

use std::io;
use thiserror::Error;

/// Result type alias for latent-grid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while linking or fetching tables.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a saved response.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The response body is not valid table JSON.
    #[error("Invalid response JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A grid slot references a cell index that does not exist.
    #[error("Invalid cell index {index} at grid position ({row}, {col})")]
    InvalidCellIndex {
        /// Grid row of the offending slot
        row: usize,
        /// Grid column of the offending slot
        col: usize,
        /// Raw index value found in the grid
        index: i64,
    },

    /// A cell was never wired to its owning table.
    #[error("Cell {0} is not associated with any table")]
    DisconnectedCell(usize),

    /// A cell from the flat list is never referenced by the grid.
    #[error("Cell {0} has no position information")]
    UnpositionedCell(usize),

    /// An extraction request failed local validation.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The service rejected the request parameters.
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// The service answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Transport error talking to the service.
    #[cfg(feature = "client")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Check if this error was raised while linking a response into a table.
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidCellIndex { .. } | Error::DisconnectedCell(_) | Error::UnpositionedCell(_)
        )
    }
}
