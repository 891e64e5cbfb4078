//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid side indices, degenerate geometry rejected at construction time, invalid
//! configuration, obstacle id collisions, unsupported file formats, IO, and generic errors.
//!
//! Sampling a field outside its region is not an error: bounded fields return their
//! configured sentinel instead.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("side index {index} out of range for polygon with {len} sides")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unsupported file extension '{extension}', supported extension is json")]
    UnsupportedFormat { extension: String },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("obstacle id {id} is already registered")]
    DuplicateObstacle { id: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn index_out_of_range_reports_both_numbers() {
        let err = Error::IndexOutOfRange { index: 7, len: 4 };
        assert_eq!(
            err.to_string(),
            "side index 7 out of range for polygon with 4 sides"
        );
    }
}
