use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

#[derive(Deserialize, Debug)]
struct BlockProperties {
    id: u16,
    name: String,
    #[serde(default)]
    transparent: bool,
    #[serde(default)]
    light: u8,
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let json_path = Path::new(&manifest_dir).join("block_properties.json");
    let json = fs::read_to_string(&json_path).expect("Failed to read block_properties.json");

    let blocks: Vec<BlockProperties> =
        serde_json::from_str(&json).expect("Failed to parse block_properties.json");

    let mut seen = HashSet::new();
    for block in &blocks {
        assert!(block.id <= 4095, "{} has id {} above 4095", block.name, block.id);
        assert!(block.light <= 15, "{} emits light {} above 15", block.name, block.light);
        assert!(seen.insert(block.id), "duplicate block id {}", block.id);
    }

    let out_dir = env::var_os("OUT_DIR").expect("OUT_DIR not set");
    let dest_path = Path::new(&out_dir).join("block_properties.rs");
    let mut out_file = File::create(&dest_path).expect("Failed to create block_properties.rs");

    writeln!(out_file, "pub static TRANSPARENT_IDS: &[u16] = &[").unwrap();
    for block in blocks.iter().filter(|b| b.transparent) {
        writeln!(out_file, "    {}, // {}", block.id, block.name).unwrap();
    }
    writeln!(out_file, "];").unwrap();

    writeln!(out_file, "pub static LIGHT_LEVELS: &[(u16, u8)] = &[").unwrap();
    for block in blocks.iter().filter(|b| b.light > 0) {
        writeln!(out_file, "    ({}, {}), // {}", block.id, block.light, block.name).unwrap();
    }
    writeln!(out_file, "];").unwrap();

    println!("cargo:rerun-if-changed=block_properties.json");
}
