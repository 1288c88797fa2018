use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, crate::error::TesseraError>;

/// Absolute block position in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        BlockPos { x, y, z }
    }

    /// Index of the section slab containing this position.
    pub fn section_y(&self) -> i32 {
        self.y.div_euclid(16)
    }

    /// Position relative to the enclosing 16x16x16 section.
    pub fn local(&self) -> (i32, i32, i32) {
        (self.x & 15, self.y & 15, self.z & 15)
    }
}
