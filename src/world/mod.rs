//! Block storage for one 16x16x16 slab of a chunk column.
//!
//! A [`Section`](section::Section) keeps the legacy packed layout: one byte of
//! block id per voxel, a nibble of id extension, a nibble of block data and two
//! nibbles of light. Per-voxel metadata and scheduled ticks live in sparse side
//! tables keyed by the flattened voxel index.

pub mod block;
pub mod nibble;
pub mod properties;
pub mod section;
pub mod tick;
mod tile;
