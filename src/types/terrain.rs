//! Terrain tile set model.

use super::Palette;

/// Edge length of a terrain tile in pixels.
pub const TILE_SIZE: u32 = 32;

/// Pixels per tile.
pub const TILE_PIXELS: usize = (TILE_SIZE * TILE_SIZE) as usize;

/// A single 32×32 terrain tile tagged with its source index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Tile index as stored in the source file.
    pub id: u32,
    indices: Vec<u8>,
}

impl Tile {
    /// Create a tile; the buffer is resized to exactly 32×32 entries.
    pub fn new(id: u32, mut indices: Vec<u8>) -> Self {
        indices.resize(TILE_PIXELS, 0);
        Self { id, indices }
    }

    /// Palette index at (x, y), row-major.
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.indices[(y * TILE_SIZE + x) as usize]
    }

    /// The raw palette-index buffer, row-major.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }
}

/// A decoded terrain tile set: shared palette plus ordered tiles.
#[derive(Debug, Clone)]
pub struct TileSet {
    pub palette: Palette,
    pub tiles: Vec<Tile>,
}
