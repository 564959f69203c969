//! Sequence descriptor export.
//!
//! Emits one textual block per processed animation table, naming each
//! canonical animation with its start frame and length. Movement-class
//! animations carry a directional facing count. Blocks are appended by the
//! caller to a shared accumulation file so a whole mod's sequences end up
//! in one descriptor.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use crate::error::{Result, RetconError};
use crate::types::{is_movement_class, AnimTable};

/// Facing count emitted for movement-class sequences.
pub const MOVEMENT_FACINGS: u32 = 8;

/// Render the sequence block for one animation table.
///
/// Each animation names the sprite of its first frame detail (lower-cased,
/// extension stripped), falling back to the table's own stem when the
/// animation has no details.
pub fn sequence_block(stem: &str, table: &AnimTable) -> String {
    let mut out = String::new();
    writeln!(out, "{}:", stem).unwrap();

    for anim in &table.animations {
        let sprite = anim
            .frames
            .first()
            .map(|f| sprite_stem(&f.source))
            .unwrap_or_else(|| stem.to_string());

        writeln!(out, "\t{}: {}", anim.name, sprite).unwrap();
        writeln!(out, "\t\tStart: {}", anim.start).unwrap();
        writeln!(out, "\t\tLength: {}", anim.frames.len()).unwrap();
        if is_movement_class(&anim.name) {
            writeln!(out, "\t\tFacings: {}", MOVEMENT_FACINGS).unwrap();
        }
    }

    out
}

/// Append a sequence block to the shared accumulation file.
pub fn append_sequences(path: &Path, block: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| RetconError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to open sequence file: {}", e),
        })?;
    file.write_all(block.as_bytes())?;
    Ok(())
}

/// Lower-case a source sprite filename and strip its extension.
fn sprite_stem(source: &str) -> String {
    let lower = source.to_ascii_lowercase();
    match lower.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => lower,
    }
}
