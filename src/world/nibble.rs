use crate::world::section::SECTION_VOLUME;
use tessera_common::DecodeFailure;
use tessera_nbt::Tag;

pub const NIBBLE_ARRAY_LEN: usize = SECTION_VOLUME / 2;

/// 4096 four-bit values packed two per byte.
///
/// Voxel `index` lives in byte `index / 2`: the low nibble when `index` is
/// even, the high nibble when odd. Bytes are kept as `i8` to match the
/// `TAG_Byte_Array` storage they are loaded from and saved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NibbleArray(Vec<i8>);

impl NibbleArray {
    pub fn new() -> Self {
        NibbleArray(vec![0; NIBBLE_ARRAY_LEN])
    }

    /// Copies a stored byte array, which must hold exactly 2048 bytes.
    pub fn from_slice(bytes: &[i8]) -> Result<Self, DecodeFailure> {
        if bytes.len() != NIBBLE_ARRAY_LEN {
            return Err(DecodeFailure::WrongLength {
                expected: NIBBLE_ARRAY_LEN,
                found: bytes.len(),
            });
        }
        Ok(NibbleArray(bytes.to_vec()))
    }

    /// Nibble at `index`, or `None` past the last voxel.
    pub fn try_get(&self, index: usize) -> Option<u8> {
        (index < SECTION_VOLUME).then(|| self.get(index))
    }

    /// Writes the nibble at `index`; `None` past the last voxel.
    pub fn try_set(&mut self, index: usize, value: u8) -> Option<()> {
        (index < SECTION_VOLUME).then(|| self.set(index, value))
    }

    /// Panics if `index >= 4096`; callers go through `voxel_index` first.
    pub(crate) fn get(&self, index: usize) -> u8 {
        let byte = self.0[index >> 1] as u8;
        if index & 1 == 0 {
            byte & 0x0F
        } else {
            byte >> 4
        }
    }

    /// Writes the low four bits of `value`, leaving the neighbouring nibble intact.
    /// Panics if `index >= 4096`.
    pub(crate) fn set(&mut self, index: usize, value: u8) {
        let slot = &mut self.0[index >> 1];
        let byte = *slot as u8;
        let value = value & 0x0F;
        let packed = if index & 1 == 0 {
            (byte & 0xF0) | value
        } else {
            (byte & 0x0F) | (value << 4)
        };
        *slot = packed as i8;
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }

    pub fn to_tag(&self) -> Tag {
        Tag::ByteArray(self.0.clone())
    }
}

impl Default for NibbleArray {
    fn default() -> Self {
        Self::new()
    }
}
