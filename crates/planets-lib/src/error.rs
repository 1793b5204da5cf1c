use thiserror::Error;

/// Convenient result alias for the planets library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Only [`Error::PlanetNotFound`] is a domain outcome. Every other variant is
/// an infrastructure failure that callers should treat as fatal for the
/// request.
#[derive(Debug, Error)]
pub enum Error {
    /// No stored planet matched the requested id.
    #[error("planet not found")]
    PlanetNotFound,

    /// Raised when a string is not a 24 character hexadecimal object id.
    #[error("invalid planet id: {value}")]
    InvalidPlanetId { value: String },

    /// Any failure reported by the MongoDB driver.
    #[error("document store error: {0}")]
    Database(#[from] mongodb::error::Error),
}

impl Error {
    /// Whether this error is the domain-level not-found signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::PlanetNotFound)
    }
}
