//! Conversion between the section's per-voxel side tables and the chunk-level
//! `TileEntities` / `TileTicks` lists, whose entries carry absolute positions.

use crate::world::block::Block;
use crate::world::section::{voxel_coords, voxel_index, Section, SECTION_WIDTH};
use crate::world::tick::Tick;
use log::trace;
use std::collections::HashMap;
use tessera_common::{BlockPos, DecodeFailure, Result, TesseraError};
use tessera_nbt::{NamedTag, Tag};

fn compound_of<'a>(tag: &'a Tag, list: &str) -> Result<&'a HashMap<String, Tag>> {
    tag.as_compound().ok_or_else(|| {
        TesseraError::decode(
            list,
            DecodeFailure::WrongType {
                expected: "TAG_Compound",
                found: tag.type_name(),
            },
        )
    })
}

fn int_field(compound: &HashMap<String, Tag>, name: &str) -> Result<i32> {
    let tag = compound
        .get(name)
        .ok_or_else(|| TesseraError::decode(name, DecodeFailure::Missing))?;
    tag.as_i32().ok_or_else(|| {
        TesseraError::decode(
            name,
            DecodeFailure::WrongType {
                expected: "TAG_Int",
                found: tag.type_name(),
            },
        )
    })
}

fn position_of(compound: &HashMap<String, Tag>) -> Result<BlockPos> {
    Ok(BlockPos::new(
        int_field(compound, "x")?,
        int_field(compound, "y")?,
        int_field(compound, "z")?,
    ))
}

fn sorted_indices<T>(table: &HashMap<usize, T>) -> Vec<usize> {
    let mut indices: Vec<usize> = table.keys().copied().collect();
    indices.sort_unstable();
    indices
}

impl Section {
    fn world_pos(&self, chunk_x: i32, chunk_z: i32, index: usize) -> BlockPos {
        let (x, y, z) = voxel_coords(index);
        BlockPos::new(
            chunk_x * SECTION_WIDTH + x,
            self.y() as i32 * SECTION_WIDTH + y,
            chunk_z * SECTION_WIDTH + z,
        )
    }

    fn local_index(&self, pos: BlockPos) -> Result<usize> {
        if pos.section_y() != self.y() as i32 {
            return Err(TesseraError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                z: pos.z,
            });
        }
        let (x, y, z) = pos.local();
        voxel_index(x, y, z)
    }

    /// One compound per voxel carrying metadata, with world `x`, `y`, `z` added.
    pub fn tile_entities(&self, chunk_x: i32, chunk_z: i32) -> Vec<Tag> {
        sorted_indices(&self.metadata)
            .into_iter()
            .map(|index| {
                let pos = self.world_pos(chunk_x, chunk_z, index);
                let mut compound: HashMap<String, Tag> = self.metadata[&index]
                    .iter()
                    .map(|tag| (tag.name().to_string(), tag.tag().clone()))
                    .collect();
                compound.insert("x".to_string(), Tag::Int(pos.x));
                compound.insert("y".to_string(), Tag::Int(pos.y));
                compound.insert("z".to_string(), Tag::Int(pos.z));
                Tag::Compound(compound)
            })
            .collect()
    }

    /// One `{i, t, p, x, y, z}` compound per scheduled tick.
    pub fn tile_ticks(&self, chunk_x: i32, chunk_z: i32) -> Vec<Tag> {
        let mut entries = Vec::new();
        for index in sorted_indices(&self.ticks) {
            let pos = self.world_pos(chunk_x, chunk_z, index);
            for tick in &self.ticks[&index] {
                entries.push(Tag::compound([
                    ("i", Tag::Int(tick.i)),
                    ("t", Tag::Int(tick.t)),
                    ("p", Tag::Int(tick.p)),
                    ("x", Tag::Int(pos.x)),
                    ("y", Tag::Int(pos.y)),
                    ("z", Tag::Int(pos.z)),
                ]));
            }
        }
        entries
    }

    /// Attaches a `TileEntities` entry to the voxel it names, replacing any
    /// metadata already there.
    pub fn load_tile_entity(&mut self, tag: &Tag) -> Result<()> {
        let compound = compound_of(tag, "TileEntities")?;
        let pos = position_of(compound)?;
        let index = self.local_index(pos)?;

        let mut names: Vec<&String> = compound.keys().collect();
        names.sort();
        let tags: Vec<NamedTag> = names
            .into_iter()
            .map(|name| NamedTag::new(name.clone(), compound[name].clone()))
            .collect();

        let mut block = Block::default();
        block.set_metadata(&tags);
        match block.get_metadata() {
            Some(metadata) => {
                trace!("Tile entity at {:?} with {} tags", pos, metadata.len());
                self.metadata.insert(index, metadata);
            }
            None => {
                self.metadata.remove(&index);
            }
        }
        Ok(())
    }

    /// Appends a `TileTicks` entry to the ticks of the voxel it names.
    pub fn load_tile_tick(&mut self, tag: &Tag) -> Result<()> {
        let compound = compound_of(tag, "TileTicks")?;
        let pos = position_of(compound)?;
        let index = self.local_index(pos)?;
        let tick = Tick::new(
            int_field(compound, "i")?,
            int_field(compound, "t")?,
            int_field(compound, "p")?,
        );
        trace!("Tile tick at {:?}: {}", pos, tick);
        self.ticks.entry(index).or_default().push(tick);
        Ok(())
    }
}
