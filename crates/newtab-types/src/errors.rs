//! # Error Types
//!
//! Errors shared across page modules.

use thiserror::Error;

/// Errors from the page's link storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Opening the backing store failed.
    #[error("Error during open")]
    Open,

    /// Reading a persisted value failed.
    #[error("Error during save")]
    Save,
}
