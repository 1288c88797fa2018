//! Static per-id block properties, generated at build time from
//! `block_properties.json`.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/block_properties.rs"));
}
use generated::{LIGHT_LEVELS, TRANSPARENT_IDS};

pub const OPAQUE: u8 = 15;
pub const LIQUID_OPACITY: u8 = 3;
pub const TRANSPARENT_OPACITY: u8 = 1;

static TRANSPARENT: Lazy<HashSet<u16>> = Lazy::new(|| TRANSPARENT_IDS.iter().copied().collect());

static LIGHT: Lazy<HashMap<u16, u8>> = Lazy::new(|| LIGHT_LEVELS.iter().copied().collect());

/// How much light a block of this id absorbs.
pub fn opacity(id: u16) -> u8 {
    match id {
        8 | 9 => LIQUID_OPACITY,
        _ if TRANSPARENT.contains(&id) => TRANSPARENT_OPACITY,
        _ => OPAQUE,
    }
}

/// Light level emitted by a block of this id.
pub fn light(id: u16) -> u8 {
    LIGHT.get(&id).copied().unwrap_or(0)
}

/// Water and lava, flowing or still.
pub fn is_liquid(id: u16) -> bool {
    matches!(id, 8..=11)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity() {
        assert_eq!(opacity(8), LIQUID_OPACITY);
        assert_eq!(opacity(9), LIQUID_OPACITY);
        // Lava is a liquid but still blocks all light.
        assert_eq!(opacity(10), OPAQUE);
        assert_eq!(opacity(20), TRANSPARENT_OPACITY);
        assert_eq!(opacity(50), TRANSPARENT_OPACITY);
        assert_eq!(opacity(1), OPAQUE);
        assert_eq!(opacity(4095), OPAQUE);
    }

    #[test]
    fn test_light() {
        assert_eq!(light(89), 15);
        assert_eq!(light(50), 14);
        assert_eq!(light(76), 7);
        assert_eq!(light(11), 15);
        assert_eq!(light(1), 0);
        assert_eq!(light(3000), 0);
    }

    #[test]
    fn test_is_liquid() {
        for id in 8..=11 {
            assert!(is_liquid(id));
        }
        assert!(!is_liquid(7));
        assert!(!is_liquid(12));
        assert!(!is_liquid(8 + 256));
    }

    #[test]
    fn test_generated_tables_are_in_range() {
        assert!(TRANSPARENT_IDS.iter().all(|&id| id <= 4095));
        assert!(LIGHT_LEVELS.iter().all(|&(_, level)| (1..=15).contains(&level)));
    }
}
