//! Level map decoder.
//!
//! Layout: u32 width, u32 height (little-endian), then width×height cells
//! in row-major order. Each cell is two u16 fields: a main field carrying
//! flip/passability flags in its top 3 bits and a 13-bit tile index, and an
//! overlay tile field.

use crate::types::{Cell, MapGrid};

use super::Reader;

/// Decode a level map from raw file bytes.
///
/// A truncated grid body stops where the input ends; the remaining cells
/// keep their zero-initialized defaults.
pub fn decode(data: &[u8]) -> MapGrid {
    let mut reader = Reader::new(data);
    let width = reader.read_u32().unwrap_or(0);
    let height = reader.read_u32().unwrap_or(0);

    let cell_count = width as usize * height as usize;
    let mut cells = Vec::with_capacity(cell_count.min(reader.remaining() / 4 + 1));
    for _ in 0..cell_count {
        let Some(main) = reader.read_u16() else {
            break;
        };
        let overlay = reader.read_u16().unwrap_or(0);
        cells.push(Cell::from_raw(main, overlay));
    }

    MapGrid::new(width, height, cells)
}
