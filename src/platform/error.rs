//! Platform catalog errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// Measurement was requested before drawing metrics were installed.
    #[error("Picto metrics are not initialized")]
    PictoNotInitialized,

    #[error("Invalid platform catalog: {0}")]
    InvalidCatalog(String),
}
