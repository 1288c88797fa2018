use std::collections::HashMap;
use tessera::Tag;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn b2i(b: u8) -> i8 {
    b as i8
}

/// A section compound with zeroed arrays of the given lengths.
pub fn section_compound_with_lengths(
    blocks: usize,
    nibbles: usize,
    y: i8,
) -> HashMap<String, Tag> {
    HashMap::from([
        ("Blocks".to_string(), Tag::ByteArray(vec![0; blocks])),
        ("Add".to_string(), Tag::ByteArray(vec![0; nibbles])),
        ("Data".to_string(), Tag::ByteArray(vec![0; nibbles])),
        ("BlockLight".to_string(), Tag::ByteArray(vec![0; nibbles])),
        ("SkyLight".to_string(), Tag::ByteArray(vec![0; nibbles])),
        ("Y".to_string(), Tag::Byte(y)),
    ])
}

pub fn empty_section_compound(y: i8) -> HashMap<String, Tag> {
    section_compound_with_lengths(4096, 2048, y)
}

/// The reference fixture: a handful of voxels exercising both add nibbles,
/// signed block bytes and a high data nibble.
pub fn fixture_compound() -> HashMap<String, Tag> {
    let mut blocks = vec![0i8; 4096];
    let mut add = vec![0i8; 2048];
    let mut data = vec![0i8; 2048];
    blocks[0] = 1;
    blocks[10] = 2;
    blocks[18] = 24;
    blocks[19] = 13;
    blocks[3475] = 45;
    blocks[4054] = b2i(194);
    add[9] = b2i(12 << 4 | 7);
    add[2027] = 5;
    data[1737] = b2i(9 << 4);
    data[2027] = 8;

    let mut compound = empty_section_compound(0);
    compound.insert("Blocks".to_string(), Tag::ByteArray(blocks));
    compound.insert("Add".to_string(), Tag::ByteArray(add));
    compound.insert("Data".to_string(), Tag::ByteArray(data));
    compound
}
