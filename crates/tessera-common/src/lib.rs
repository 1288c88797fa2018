pub mod error;
pub mod types;

pub use error::{DecodeFailure, TesseraError};
pub use types::{BlockPos, Result};
