//! Named Binary Tag values and their big-endian wire codec.

mod codec;
mod file;
mod tag;

pub use codec::MAX_DEPTH;
pub use file::NbtFile;
pub use tag::{NamedTag, Tag};
