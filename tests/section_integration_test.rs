mod common;

use assert_matches::assert_matches;
use common::*;
use std::io::Cursor;
use tessera::{Block, DecodeFailure, NamedTag, NbtFile, Section, Tag, TesseraError, Tick};

#[test]
fn test_get_block_reference_fixture() {
    init_logging();
    let section = Section::load(&fixture_compound()).unwrap();

    let cases = [
        ((0, 0, 0), 1, 0),
        ((10, 0, 0), 2, 0),
        ((2, 0, 1), 1816, 0),
        ((3, 0, 1), 3085, 0),
        ((3, 13, 9), 45, 9),
        ((6, 15, 13), 1474, 8),
        ((9, 12, 11), 0, 0),
    ];
    for (n, ((x, y, z), id, data)) in cases.into_iter().enumerate() {
        let expected = Block::new(id, data).unwrap();
        let got = section.get_block(x, y, z).unwrap();
        assert_eq!(got, expected, "case {}\nExpecting: {}\nGot: {}", n + 1, expected, got);
    }
}

#[test]
fn test_set_block_sequence() {
    init_logging();
    let mut section = Section::new(32);
    let cases = [
        ((4, 7, 9), (12, 4), false),
        ((4, 7, 9), (15, 0), false),
        ((1, 12, 10), (1345, 12), true),
        ((2, 12, 10), (765, 5), true),
        ((3, 12, 10), (451, 11), false),
        ((4, 7, 9), (761, 5), false),
        ((4, 7, 9), (0, 0), false),
    ];
    for (n, ((x, y, z), (id, data), _)) in cases.iter().enumerate() {
        let block = Block::new(*id, *data).unwrap();
        section.set_block(*x, *y, *z, &block).unwrap();
        assert_eq!(section.get_block(*x, *y, *z).unwrap(), block, "case {}", n + 1);
    }
    for ((x, y, z), (id, data), recheck) in cases {
        if recheck {
            assert_eq!(
                section.get_block(x, y, z).unwrap(),
                Block::new(id, data).unwrap()
            );
        }
    }
}

#[test]
fn test_full_grid_round_trip() {
    let mut section = Section::new(0);
    let expected = |x: i32, y: i32, z: i32| {
        let seed = (x * 7 + y * 131 + z * 1031) as u16;
        Block::new(seed % 4096, (seed % 16) as u8).unwrap()
    };
    for y in 0..16 {
        for z in 0..16 {
            for x in 0..16 {
                section.set_block(x, y, z, &expected(x, y, z)).unwrap();
            }
        }
    }
    for y in 0..16 {
        for z in 0..16 {
            for x in 0..16 {
                assert_eq!(section.get_block(x, y, z).unwrap(), expected(x, y, z));
            }
        }
    }
}

#[test]
fn test_nibble_isolation() {
    let mut section = Section::new(0);
    let filler = Block::new(0xABC, 0x5).unwrap();
    for y in 0..16 {
        for z in 0..16 {
            for x in 0..16 {
                section.set_block(x, y, z, &filler).unwrap();
            }
        }
    }

    // (6, 15, 13) is index 4054; (7, 15, 13) shares its nibble bytes.
    let changed = Block::new(0x301, 0xE).unwrap();
    section.set_block(6, 15, 13, &changed).unwrap();
    assert_eq!(section.get_block(6, 15, 13).unwrap(), changed);
    assert_eq!(section.get_block(7, 15, 13).unwrap(), filler);

    section.set_block(7, 15, 13, &Block::default()).unwrap();
    assert_eq!(section.get_block(6, 15, 13).unwrap(), changed);

    let mut others = 0;
    for y in 0..16 {
        for z in 0..16 {
            for x in 0..16 {
                if (x, y, z) == (6, 15, 13) || (x, y, z) == (7, 15, 13) {
                    continue;
                }
                assert_eq!(section.get_block(x, y, z).unwrap(), filler);
                others += 1;
            }
        }
    }
    assert_eq!(others, 4094);
}

#[test]
fn test_encode_mirrors_load() {
    init_logging();
    let original = fixture_compound();
    let section = Section::load(&original).unwrap();
    assert_eq!(section.to_compound(), original);
    assert_eq!(Section::from_tag(&section.to_tag()).unwrap(), section);
}

#[test]
fn test_load_copies_buffers() {
    let mut compound = fixture_compound();
    let section = Section::load(&compound).unwrap();
    compound.insert("Blocks".to_string(), Tag::ByteArray(vec![0; 4096]));
    assert_eq!(section.get_block(0, 0, 0).unwrap().id(), 1);
}

#[test]
fn test_load_reports_missing_tag() {
    for name in ["Blocks", "Add", "Data", "BlockLight", "SkyLight", "Y"] {
        let mut compound = empty_section_compound(0);
        compound.remove(name);
        let err = Section::load(&compound).unwrap_err();
        assert_matches!(
            err,
            TesseraError::DecodeError { ref tag, failure: DecodeFailure::Missing } if tag == name
        );
    }
}

#[test]
fn test_load_reports_wrong_length() {
    let err = Section::load(&section_compound_with_lengths(4095, 2048, 0)).unwrap_err();
    assert_matches!(
        err,
        TesseraError::DecodeError {
            failure: DecodeFailure::WrongLength { expected: 4096, found: 4095 },
            ..
        }
    );
    assert_eq!(err.tag_name(), Some("Blocks"));

    let mut compound = empty_section_compound(0);
    compound.insert("SkyLight".to_string(), Tag::ByteArray(vec![0; 4096]));
    let err = Section::load(&compound).unwrap_err();
    assert_eq!(err.tag_name(), Some("SkyLight"));
}

#[test]
fn test_load_reports_wrong_type() {
    let mut compound = empty_section_compound(0);
    compound.insert("Y".to_string(), Tag::Int(0));
    assert_matches!(
        Section::load(&compound),
        Err(TesseraError::DecodeError {
            failure: DecodeFailure::WrongType { expected: "TAG_Byte", found: "TAG_Int" },
            ..
        })
    );

    let mut compound = empty_section_compound(0);
    compound.insert("Data".to_string(), Tag::IntArray(vec![0; 2048]));
    assert_eq!(Section::load(&compound).unwrap_err().tag_name(), Some("Data"));
}

#[test]
fn test_load_rejects_y_outside_slabs() {
    for y in [-1i8, 16, 127] {
        assert_matches!(
            Section::load(&empty_section_compound(y)),
            Err(TesseraError::DecodeError { failure: DecodeFailure::OutOfRange { .. }, .. })
        );
    }
    assert_eq!(Section::load(&empty_section_compound(15)).unwrap().y(), 15);
}

#[test]
fn test_nbt_file_round_trip() {
    init_logging();
    let mut section = Section::new(80);
    section.set_block(1, 2, 3, &Block::new(2000, 7).unwrap()).unwrap();
    section.set_sky_light(1, 3, 3, 15).unwrap();

    let file = NbtFile::new("", section.to_tag());
    let mut plain: Vec<u8> = Vec::new();
    file.write(&mut plain).unwrap();
    let mut again: Vec<u8> = Vec::new();
    file.write(&mut again).unwrap();
    assert_eq!(plain, again);

    let mut gzip: Vec<u8> = Vec::new();
    file.write_gzip(&mut gzip).unwrap();
    let read = NbtFile::read_gzip(&mut Cursor::new(gzip)).unwrap();
    let restored = Section::from_tag(&read.root).unwrap();

    assert_eq!(restored, section);
    assert_eq!(restored.y(), 5);
    assert_eq!(restored.get_block(1, 2, 3).unwrap(), Block::new(2000, 7).unwrap());
    assert_eq!(restored.sky_light(1, 3, 3).unwrap(), 15);
}

#[test]
fn test_chunk_level_metadata_survives_save() {
    init_logging();
    let mut section = Section::new(16);
    let mut spawner = Block::new(52, 0).unwrap();
    spawner.set_metadata(&[
        NamedTag::new("id", Tag::String("MobSpawner".into())),
        NamedTag::new("Delay", Tag::Short(20)),
    ]);
    spawner.set_ticks(&[Tick::new(52, 40, 0)]);
    section.set_block(8, 8, 8, &spawner).unwrap();

    let entities = section.tile_entities(0, 0);
    let ticks = section.tile_ticks(0, 0);

    let mut restored = Section::from_tag(&section.to_tag()).unwrap();
    assert!(!restored.get_block(8, 8, 8).unwrap().has_metadata());
    for entity in &entities {
        restored.load_tile_entity(entity).unwrap();
    }
    for tick in &ticks {
        restored.load_tile_tick(tick).unwrap();
    }
    assert_eq!(restored.get_block(8, 8, 8).unwrap(), spawner);
    assert!(!restored.is_empty());
}
