//! Inspect command implementation.
//!
//! Decodes a single asset file and prints a summary of its structure,
//! useful when poking at an unfamiliar asset archive.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::decode::{decode_anim_table, decode_map, decode_sprite_bank, decode_tile_set};
use crate::discovery::{detect_asset_kind, AssetKind};
use crate::error::{Result, RetconError};
use crate::types::Compression;

/// Decode a single asset file and print its structure
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Asset file to inspect
    pub file: PathBuf,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let kind = detect_asset_kind(&args.file).ok_or_else(|| RetconError::Unsupported {
        message: format!("Unrecognized asset extension: {}", args.file.display()),
        help: Some("Known extensions: .shp, .icn, .anm, .map".to_string()),
    })?;

    let data = fs::read(&args.file).map_err(|e| RetconError::Io {
        path: args.file.clone(),
        message: format!("Failed to read file: {}", e),
    })?;

    print!("{}", summarize(kind, &data));
    Ok(())
}

/// Render the summary text for one decoded asset.
fn summarize(kind: AssetKind, data: &[u8]) -> String {
    let mut out = String::new();
    match kind {
        AssetKind::Sprite => {
            let bank = decode_sprite_bank(data);
            let mode = match bank.compression {
                Compression::Rle => "run-length encoded",
                Compression::Raw => "raw",
            };
            out.push_str(&format!("sprite bank, {}, {} frame(s)\n", mode, bank.frames.len()));
            for (i, frame) in bank.frames.iter().enumerate() {
                out.push_str(&format!(
                    "  frame {:3}: {}x{} offset ({}, {})\n",
                    i, frame.width, frame.height, frame.offset_x, frame.offset_y
                ));
            }
        }
        AssetKind::Terrain => {
            let set = decode_tile_set(data);
            out.push_str(&format!("terrain tile set, {} tile(s)\n", set.tiles.len()));
            for tile in &set.tiles {
                out.push_str(&format!("  tile {}\n", tile.id));
            }
        }
        AssetKind::Anim => {
            let table = decode_anim_table(data);
            out.push_str(&format!("animation table, {} animation(s)\n", table.animations.len()));
            for anim in &table.animations {
                out.push_str(&format!(
                    "  {}: frames {}..={} ({} detail record(s))\n",
                    anim.name,
                    anim.start,
                    anim.end,
                    anim.frames.len()
                ));
            }
        }
        AssetKind::Map => {
            let grid = decode_map(data);
            let impassable = grid.cells().iter().filter(|c| c.impassable).count();
            out.push_str(&format!(
                "map, {}x{}, {} impassable cell(s)\n",
                grid.width, grid.height, impassable
            ));
        }
    }
    out
}
