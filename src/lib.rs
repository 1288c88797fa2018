pub mod world;

// Re-export commonly used items
pub use tessera_common::{BlockPos, DecodeFailure, Result, TesseraError};
pub use tessera_nbt::{NamedTag, NbtFile, Tag};
pub use world::block::{Block, MAX_BLOCK_ID, MAX_NIBBLE};
pub use world::nibble::{NibbleArray, NIBBLE_ARRAY_LEN};
pub use world::section::{Section, SECTION_VOLUME, SECTION_WIDTH};
pub use world::tick::Tick;
