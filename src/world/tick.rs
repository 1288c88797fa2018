use serde::{Deserialize, Serialize};
use std::fmt;

/// A scheduled block update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tick {
    /// Block id the voxel turns into.
    pub i: i32,
    /// Delay in game ticks before the update fires.
    pub t: i32,
    /// Priority among updates due on the same tick.
    pub p: i32,
}

impl Tick {
    pub fn new(i: i32, t: i32, p: i32) -> Self {
        Tick { i, t, p }
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i: {}, t: {}, p: {}", self.i, self.t, self.p)
    }
}
