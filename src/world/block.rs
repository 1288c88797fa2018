use crate::world::properties;
use crate::world::tick::Tick;
use log::warn;
use std::fmt;
use tessera_common::{Result, TesseraError};
use tessera_nbt::{NamedTag, Tag};

pub const MAX_BLOCK_ID: u16 = 4095;
pub const MAX_NIBBLE: u8 = 15;

/// Tag names that duplicate the voxel position and are never stored as metadata.
const POSITIONAL_TAGS: [&str; 3] = ["x", "y", "z"];

/// A single voxel: extended id, data nibble, optional metadata and pending ticks.
///
/// Every accessor hands out copies; a `Block` never shares storage with the
/// caller or with the section it was read from.
#[derive(Debug, Clone, Default)]
pub struct Block {
    id: u16,
    data: u8,
    metadata: Option<Vec<NamedTag>>,
    ticks: Vec<Tick>,
}

impl Block {
    pub fn new(id: u16, data: u8) -> Result<Self> {
        let mut block = Block::default();
        block.set_id(id)?;
        block.set_data(data)?;
        Ok(block)
    }

    /// Builds a block from already-masked section storage.
    pub(crate) fn from_raw(id: u16, data: u8) -> Self {
        Block {
            id: id & MAX_BLOCK_ID,
            data: data & MAX_NIBBLE,
            ..Block::default()
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn data(&self) -> u8 {
        self.data
    }

    pub fn set_id(&mut self, id: u16) -> Result<()> {
        if id > MAX_BLOCK_ID {
            return Err(TesseraError::InvalidBlockId(id));
        }
        self.id = id;
        Ok(())
    }

    pub fn set_data(&mut self, data: u8) -> Result<()> {
        if data > MAX_NIBBLE {
            return Err(TesseraError::InvalidNibble(data));
        }
        self.data = data;
        Ok(())
    }

    pub fn is_air(&self) -> bool {
        self.id == 0
    }

    /// How much light is blocked by this block.
    pub fn opacity(&self) -> u8 {
        properties::opacity(self.id)
    }

    /// How much light is generated by this block.
    pub fn light(&self) -> u8 {
        properties::light(self.id)
    }

    pub fn is_liquid(&self) -> bool {
        properties::is_liquid(self.id)
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn get_metadata(&self) -> Option<Vec<NamedTag>> {
        self.metadata.clone()
    }

    /// Copy of the metadata tag called `name`, if present.
    pub fn get_metadata_tag(&self, name: &str) -> Option<Tag> {
        self.metadata_slice()
            .iter()
            .find(|tag| tag.name() == name)
            .map(|tag| tag.tag().clone())
    }

    /// Replaces the metadata with copies of `tags`.
    ///
    /// `x`, `y` and `z` are skipped and everything from the first `TAG_End` on
    /// is dropped. Names are unique: a later tag reusing a name already kept
    /// is discarded. An empty result clears the metadata.
    pub fn set_metadata(&mut self, tags: &[NamedTag]) {
        let mut kept: Vec<NamedTag> = Vec::new();
        for tag in tags {
            if tag.is_end() {
                break;
            }
            if POSITIONAL_TAGS.contains(&tag.name()) {
                continue;
            }
            if kept.iter().any(|k| k.name() == tag.name()) {
                warn!("Dropping duplicate metadata tag '{}'", tag.name());
                continue;
            }
            kept.push(tag.clone());
        }
        self.metadata = if kept.is_empty() { None } else { Some(kept) };
    }

    pub fn has_ticks(&self) -> bool {
        !self.ticks.is_empty()
    }

    pub fn get_ticks(&self) -> Vec<Tick> {
        self.ticks.clone()
    }

    pub fn add_ticks(&mut self, ticks: &[Tick]) {
        self.ticks.extend_from_slice(ticks);
    }

    pub fn set_ticks(&mut self, ticks: &[Tick]) {
        self.ticks = ticks.to_vec();
    }

    fn metadata_slice(&self) -> &[NamedTag] {
        self.metadata.as_deref().unwrap_or(&[])
    }
}

/// Same id and data, same metadata by name and value, and the same ticks in
/// any order.
impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.data == other.data
            && metadata_matches(self.metadata_slice(), other.metadata_slice())
            && ticks_match(&self.ticks, &other.ticks)
    }
}

fn metadata_matches(a: &[NamedTag], b: &[NamedTag]) -> bool {
    a.len() == b.len()
        && a.iter().all(|tag| {
            b.iter()
                .find(|other| other.name() == tag.name())
                .is_some_and(|other| other.tag() == tag.tag())
        })
}

// Each tick is looked up independently, so repeated ticks are not counted.
fn ticks_match(a: &[Tick], b: &[Tick]) -> bool {
    a.len() == b.len() && a.iter().all(|t| b.contains(t)) && b.iter().all(|t| a.contains(t))
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Block ID: {}", self.id)?;
        writeln!(f, "Data: {}", self.data)?;
        if let Some(metadata) = &self.metadata {
            writeln!(f, "Metadata:")?;
            for tag in metadata {
                writeln!(f, "\t{}", tag)?;
            }
        }
        for (n, tick) in self.ticks.iter().enumerate() {
            writeln!(f, "\tTick: {}, {}", n + 1, tick)?;
        }
        Ok(())
    }
}
