//! Terrain tile set decoder.
//!
//! Layout: packed palette at bytes 8..776, then uncompressed tile blocks of
//! 1028 bytes each (4-byte little-endian tile index + 1024 row-major
//! palette indices for a 32×32 tile).

use crate::types::{Palette, Tile, TileSet, Transparency, PALETTE_BYTES, TILE_PIXELS};

use super::Reader;

/// Offset of the packed palette.
const PALETTE_OFFSET: usize = 8;

/// Offset of the first tile block.
const TILES_OFFSET: usize = PALETTE_OFFSET + PALETTE_BYTES;

/// Size of one tile block: 4-byte index plus 32×32 pixels.
pub const TILE_BLOCK_BYTES: usize = 4 + TILE_PIXELS;

/// Decode a terrain tile set from raw file bytes.
///
/// The tile count is derived from the bytes remaining after the palette;
/// a partial trailing block is truncated rather than decoded.
pub fn decode(data: &[u8]) -> TileSet {
    let palette = Palette::from_six_bit_bytes(data, PALETTE_OFFSET, Transparency::Opaque);

    let tile_count = data.len().saturating_sub(TILES_OFFSET) / TILE_BLOCK_BYTES;
    let mut reader = Reader::new(data);
    reader.seek(TILES_OFFSET);

    let mut tiles = Vec::with_capacity(tile_count);
    for _ in 0..tile_count {
        let (Some(id), Some(indices)) = (reader.read_u32(), reader.take(TILE_PIXELS)) else {
            break;
        };
        tiles.push(Tile::new(id, indices.to_vec()));
    }

    TileSet { palette, tiles }
}
