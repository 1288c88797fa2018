use std::error::Error;
use std::fmt;

/// Why a named tag failed validation while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    Missing,
    WrongType { expected: &'static str, found: &'static str },
    WrongLength { expected: usize, found: usize },
    OutOfRange { value: i64 },
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeFailure::Missing => write!(f, "missing"),
            DecodeFailure::WrongType { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            DecodeFailure::WrongLength { expected, found } => {
                write!(f, "expected {} elements, found {}", expected, found)
            }
            DecodeFailure::OutOfRange { value } => write!(f, "value {} out of range", value),
        }
    }
}

#[derive(Debug)]
pub enum TesseraError {
    IoError(std::io::Error),
    DecodeError { tag: String, failure: DecodeFailure },
    OutOfBounds { x: i32, y: i32, z: i32 },
    InvalidBlockId(u16),
    InvalidNibble(u8),
}

impl TesseraError {
    pub fn decode(tag: impl Into<String>, failure: DecodeFailure) -> Self {
        TesseraError::DecodeError {
            tag: tag.into(),
            failure,
        }
    }

    /// Name of the tag that failed to decode, if this is a decoding error.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            TesseraError::DecodeError { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

impl fmt::Display for TesseraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TesseraError::IoError(err) => write!(f, "IO error: {}", err),
            TesseraError::DecodeError { tag, failure } => {
                write!(f, "Decode error: tag '{}' {}", tag, failure)
            }
            TesseraError::OutOfBounds { x, y, z } => {
                write!(f, "Coordinate ({}, {}, {}) is outside the section", x, y, z)
            }
            TesseraError::InvalidBlockId(id) => write!(f, "Block id {} exceeds 4095", id),
            TesseraError::InvalidNibble(value) => write!(f, "Nibble value {} exceeds 15", value),
        }
    }
}

impl Error for TesseraError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TesseraError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TesseraError {
    fn from(err: std::io::Error) -> Self {
        TesseraError::IoError(err)
    }
}
