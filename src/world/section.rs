use crate::world::block::{Block, MAX_NIBBLE};
use crate::world::nibble::NibbleArray;
use crate::world::tick::Tick;
use log::{debug, warn};
use std::collections::HashMap;
use tessera_common::{DecodeFailure, Result, TesseraError};
use tessera_nbt::{NamedTag, Tag};

pub const SECTION_WIDTH: i32 = 16;
pub const SECTION_VOLUME: usize = 4096;
pub const MAX_SECTION_Y: u8 = 15;

const TAG_BLOCKS: &str = "Blocks";
const TAG_ADD: &str = "Add";
const TAG_DATA: &str = "Data";
const TAG_BLOCK_LIGHT: &str = "BlockLight";
const TAG_SKY_LIGHT: &str = "SkyLight";
const TAG_Y: &str = "Y";

/// One 16x16x16 slab of a chunk column in the legacy packed format.
///
/// Voxel `(x, y, z)` (all section-local, `0..16`) maps to index
/// `y * 256 + z * 16 + x` in every array. The block id is twelve bits: the low
/// eight in `blocks`, the high four in the `add` nibble.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    y: u8,
    blocks: Vec<i8>,
    add: NibbleArray,
    data: NibbleArray,
    block_light: NibbleArray,
    sky_light: NibbleArray,
    pub(crate) metadata: HashMap<usize, Vec<NamedTag>>,
    pub(crate) ticks: HashMap<usize, Vec<Tick>>,
}

/// Flattened array index of a section-local coordinate.
pub(crate) fn voxel_index(x: i32, y: i32, z: i32) -> Result<usize> {
    let range = 0..SECTION_WIDTH;
    if !(range.contains(&x) && range.contains(&y) && range.contains(&z)) {
        return Err(TesseraError::OutOfBounds { x, y, z });
    }
    Ok((y * 256 + z * 16 + x) as usize)
}

/// Inverse of [`voxel_index`].
pub(crate) fn voxel_coords(index: usize) -> (i32, i32, i32) {
    let index = index as i32;
    (index & 15, index >> 8, (index >> 4) & 15)
}

fn slab_index(world_y: i32) -> u8 {
    let slab = world_y.div_euclid(SECTION_WIDTH);
    let clamped = slab.clamp(0, MAX_SECTION_Y as i32);
    if clamped != slab {
        warn!(
            "World y {} is outside sections 0-{}, using section {}",
            world_y, MAX_SECTION_Y, clamped
        );
    }
    clamped as u8
}

fn byte_array<'a>(compound: &'a HashMap<String, Tag>, name: &str) -> Result<&'a [i8]> {
    let tag = compound
        .get(name)
        .ok_or_else(|| TesseraError::decode(name, DecodeFailure::Missing))?;
    tag.as_byte_array().ok_or_else(|| {
        TesseraError::decode(
            name,
            DecodeFailure::WrongType {
                expected: "TAG_Byte_Array",
                found: tag.type_name(),
            },
        )
    })
}

fn nibble_array(compound: &HashMap<String, Tag>, name: &str) -> Result<NibbleArray> {
    NibbleArray::from_slice(byte_array(compound, name)?)
        .map_err(|failure| TesseraError::decode(name, failure))
}

impl Section {
    /// An all-air section covering world y `world_y`.
    pub fn new(world_y: i32) -> Self {
        Section {
            y: slab_index(world_y),
            blocks: vec![0; SECTION_VOLUME],
            add: NibbleArray::new(),
            data: NibbleArray::new(),
            block_light: NibbleArray::new(),
            sky_light: NibbleArray::new(),
            metadata: HashMap::new(),
            ticks: HashMap::new(),
        }
    }

    /// Decodes a section compound, copying every array out of it.
    pub fn load(compound: &HashMap<String, Tag>) -> Result<Self> {
        let blocks = byte_array(compound, TAG_BLOCKS)?;
        if blocks.len() != SECTION_VOLUME {
            return Err(TesseraError::decode(
                TAG_BLOCKS,
                DecodeFailure::WrongLength {
                    expected: SECTION_VOLUME,
                    found: blocks.len(),
                },
            ));
        }
        let add = nibble_array(compound, TAG_ADD)?;
        let data = nibble_array(compound, TAG_DATA)?;
        let block_light = nibble_array(compound, TAG_BLOCK_LIGHT)?;
        let sky_light = nibble_array(compound, TAG_SKY_LIGHT)?;

        let y = match compound.get(TAG_Y) {
            Some(Tag::Byte(y)) => *y,
            Some(other) => {
                return Err(TesseraError::decode(
                    TAG_Y,
                    DecodeFailure::WrongType {
                        expected: "TAG_Byte",
                        found: other.type_name(),
                    },
                ))
            }
            None => return Err(TesseraError::decode(TAG_Y, DecodeFailure::Missing)),
        };
        if !(0..=MAX_SECTION_Y as i8).contains(&y) {
            return Err(TesseraError::decode(
                TAG_Y,
                DecodeFailure::OutOfRange { value: y as i64 },
            ));
        }

        debug!("Loaded section {}", y);
        Ok(Section {
            y: y as u8,
            blocks: blocks.to_vec(),
            add,
            data,
            block_light,
            sky_light,
            metadata: HashMap::new(),
            ticks: HashMap::new(),
        })
    }

    /// Like [`Section::load`], for a tag that should be a compound.
    pub fn from_tag(tag: &Tag) -> Result<Self> {
        let compound = tag.as_compound().ok_or_else(|| {
            TesseraError::decode(
                "<section>",
                DecodeFailure::WrongType {
                    expected: "TAG_Compound",
                    found: tag.type_name(),
                },
            )
        })?;
        Self::load(compound)
    }

    pub fn to_compound(&self) -> HashMap<String, Tag> {
        debug!("Encoding section {}", self.y);
        HashMap::from([
            (TAG_BLOCKS.to_string(), Tag::ByteArray(self.blocks.clone())),
            (TAG_ADD.to_string(), self.add.to_tag()),
            (TAG_DATA.to_string(), self.data.to_tag()),
            (TAG_BLOCK_LIGHT.to_string(), self.block_light.to_tag()),
            (TAG_SKY_LIGHT.to_string(), self.sky_light.to_tag()),
            (TAG_Y.to_string(), Tag::Byte(self.y as i8)),
        ])
    }

    pub fn to_tag(&self) -> Tag {
        Tag::Compound(self.to_compound())
    }

    /// Slab index, `0..=15`.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Moves the section to the slab containing world y `world_y`, clamped to `0..=15`.
    pub fn set_y(&mut self, world_y: i32) {
        self.y = slab_index(world_y);
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Result<Block> {
        let index = voxel_index(x, y, z)?;
        let low = self.blocks[index] as u8 as u16;
        let high = self.add.get(index) as u16;
        let mut block = Block::from_raw((high << 8) | low, self.data.get(index));
        if let Some(metadata) = self.metadata.get(&index) {
            block.set_metadata(metadata);
        }
        if let Some(ticks) = self.ticks.get(&index) {
            block.set_ticks(ticks);
        }
        Ok(block)
    }

    /// Stores `block` at the voxel, replacing any metadata and ticks held there.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: &Block) -> Result<()> {
        let index = voxel_index(x, y, z)?;
        let id = block.id();
        self.blocks[index] = (id & 0xFF) as u8 as i8;
        self.add.set(index, ((id >> 8) & 0x0F) as u8);
        self.data.set(index, block.data());

        match block.get_metadata() {
            Some(metadata) => {
                self.metadata.insert(index, metadata);
            }
            None => {
                self.metadata.remove(&index);
            }
        }
        if block.has_ticks() {
            self.ticks.insert(index, block.get_ticks());
        } else {
            self.ticks.remove(&index);
        }
        Ok(())
    }

    pub fn block_light(&self, x: i32, y: i32, z: i32) -> Result<u8> {
        Ok(self.block_light.get(voxel_index(x, y, z)?))
    }

    pub fn set_block_light(&mut self, x: i32, y: i32, z: i32, level: u8) -> Result<()> {
        let index = voxel_index(x, y, z)?;
        if level > MAX_NIBBLE {
            return Err(TesseraError::InvalidNibble(level));
        }
        self.block_light.set(index, level);
        Ok(())
    }

    pub fn sky_light(&self, x: i32, y: i32, z: i32) -> Result<u8> {
        Ok(self.sky_light.get(voxel_index(x, y, z)?))
    }

    pub fn set_sky_light(&mut self, x: i32, y: i32, z: i32, level: u8) -> Result<()> {
        let index = voxel_index(x, y, z)?;
        if level > MAX_NIBBLE {
            return Err(TesseraError::InvalidNibble(level));
        }
        self.sky_light.set(index, level);
        Ok(())
    }

    /// True when every voxel is air with no metadata or ticks. Light is ignored.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|&b| b == 0)
            && self.add.is_zero()
            && self.metadata.is_empty()
            && self.ticks.is_empty()
    }
}
