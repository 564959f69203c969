//! Sheet compositing.
//!
//! Renders palette-indexed frames and tiles to true colour and lays them
//! out in a horizontal strip, one cell per frame. Alongside the pixel data
//! a frame map records where each cell landed, for engines that address
//! frames individually.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, RetconError};
use crate::types::{Colour, Frame, Palette, SpriteBank, TileSet, TILE_SIZE};

/// A composited sheet: a named grid of true-colour pixels.
#[derive(Debug, Clone)]
pub struct RenderedSheet {
    /// Sheet name (source file stem).
    pub name: String,

    /// Pixel grid (row-major: pixels[y][x]).
    pixels: Vec<Vec<Colour>>,
}

impl RenderedSheet {
    /// Create a sheet from a pixel grid.
    pub fn new(name: impl Into<String>, pixels: Vec<Vec<Colour>>) -> Self {
        Self {
            name: name.into(),
            pixels,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.pixels.first().map_or(0, |row| row.len())
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.pixels.len()
    }

    /// Pixel at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    /// The full pixel grid.
    pub fn pixels(&self) -> &[Vec<Colour>] {
        &self.pixels
    }
}

/// Placement of one frame within a composited sheet.
#[derive(Debug, Clone, Serialize)]
pub struct FrameRect {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Frame map written alongside a sheet image.
#[derive(Debug, Clone, Serialize)]
pub struct SheetMeta {
    pub image: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: Vec<FrameRect>,
}

/// Render one sprite frame to true colour via its palette.
///
/// A pure lookup: every palette index maps to its palette colour.
pub fn render_frame(frame: &Frame, palette: &Palette) -> Vec<Vec<Colour>> {
    (0..frame.height)
        .map(|y| {
            (0..frame.width)
                .map(|x| palette.get(frame.index_at(x, y)))
                .collect()
        })
        .collect()
}

/// Composite a sprite bank into a horizontal strip sheet.
///
/// Cell size is the bank's maximum frame width and height; each frame is
/// centred within its cell and then shifted by its signed displacement,
/// clamped so it never leaves the cell.
pub fn compose_sprite_sheet(name: &str, bank: &SpriteBank) -> (RenderedSheet, SheetMeta) {
    let (cell_w, cell_h) = bank.max_frame_size();
    let sheet_w = cell_w as usize * bank.frames.len();
    let sheet_h = cell_h as usize;

    let mut pixels = vec![vec![Colour::TRANSPARENT; sheet_w]; sheet_h];
    let mut frames = Vec::with_capacity(bank.frames.len());

    for (index, frame) in bank.frames.iter().enumerate() {
        let cell_x = index as u32 * cell_w;
        let off_x = placement(cell_w, frame.width, frame.offset_x);
        let off_y = placement(cell_h, frame.height, frame.offset_y);

        let rendered = render_frame(frame, &bank.palette);
        blit(&mut pixels, &rendered, (cell_x + off_x) as usize, off_y as usize);

        frames.push(FrameRect {
            name: format!("{}-{}", name, index),
            x: cell_x,
            y: 0,
            w: cell_w,
            h: cell_h,
        });
    }

    let meta = SheetMeta {
        image: format!("{}.png", name),
        frame_width: cell_w,
        frame_height: cell_h,
        frames,
    };

    (RenderedSheet::new(name, pixels), meta)
}

/// Composite a terrain tile set into a horizontal strip sheet.
///
/// Tiles are uniform 32×32, drawn left-to-right with no gaps and no
/// centering.
pub fn compose_tile_sheet(name: &str, set: &TileSet) -> (RenderedSheet, SheetMeta) {
    let sheet_w = TILE_SIZE as usize * set.tiles.len();
    let sheet_h = TILE_SIZE as usize;

    let mut pixels = vec![vec![Colour::TRANSPARENT; sheet_w]; sheet_h];
    let mut frames = Vec::with_capacity(set.tiles.len());

    for (index, tile) in set.tiles.iter().enumerate() {
        let cell_x = index as u32 * TILE_SIZE;
        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                pixels[y as usize][(cell_x + x) as usize] =
                    set.palette.get(tile.index_at(x, y));
            }
        }
        frames.push(FrameRect {
            name: format!("{}-{}", name, tile.id),
            x: cell_x,
            y: 0,
            w: TILE_SIZE,
            h: TILE_SIZE,
        });
    }

    let meta = SheetMeta {
        image: format!("{}.png", name),
        frame_width: TILE_SIZE,
        frame_height: TILE_SIZE,
        frames,
    };

    (RenderedSheet::new(name, pixels), meta)
}

/// Centre a frame in its cell, apply its signed displacement, and clamp so
/// the frame stays inside the cell.
fn placement(cell: u32, frame: u32, displacement: i32) -> u32 {
    let centred = (cell.saturating_sub(frame) / 2) as i32;
    let max = cell.saturating_sub(frame) as i32;
    (centred + displacement).clamp(0, max) as u32
}

/// Draw `src` into `dst` with its top-left corner at (x0, y0).
fn blit(dst: &mut [Vec<Colour>], src: &[Vec<Colour>], x0: usize, y0: usize) {
    for (y, row) in src.iter().enumerate() {
        for (x, &colour) in row.iter().enumerate() {
            if let Some(slot) = dst.get_mut(y0 + y).and_then(|r| r.get_mut(x0 + x)) {
                *slot = colour;
            }
        }
    }
}

/// Write a sheet's frame map as JSON next to the image.
pub fn write_sheet_meta(meta: &SheetMeta, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(meta).map_err(|e| RetconError::Export {
        message: format!("Failed to serialize sheet metadata: {}", e),
        help: None,
    })?;
    fs::write(path, json).map_err(|e| RetconError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write sheet metadata: {}", e),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Compression, Palette, Tile, Transparency};

    fn grey_palette(transparency: Transparency) -> Palette {
        let mut bytes = Vec::new();
        for i in 0..256usize {
            let v = (i % 64) as u8;
            bytes.extend_from_slice(&[v, v, v]);
        }
        Palette::from_six_bit_bytes(&bytes, 0, transparency)
    }

    fn bank(frames: Vec<Frame>) -> SpriteBank {
        SpriteBank {
            compression: Compression::Raw,
            palette: grey_palette(Transparency::IndexZero),
            frames,
        }
    }

    #[test]
    fn test_strip_layout() {
        let bank = bank(vec![
            Frame::new(4, 4, 0, 0, vec![1; 16]),
            Frame::new(4, 4, 0, 0, vec![2; 16]),
        ]);
        let (sheet, meta) = compose_sprite_sheet("unit", &bank);

        assert_eq!(sheet.width(), 8);
        assert_eq!(sheet.height(), 4);
        assert_eq!(meta.frames[0].x, 0);
        assert_eq!(meta.frames[1].x, 4);
        // Frame 1 fills cell 0, frame 2 fills cell 1.
        assert_eq!(sheet.get(0, 0), Some(grey_palette(Transparency::IndexZero).get(1)));
        assert_eq!(sheet.get(4, 0), Some(grey_palette(Transparency::IndexZero).get(2)));
    }

    #[test]
    fn test_small_frame_is_centred() {
        let bank = bank(vec![
            Frame::new(4, 4, 0, 0, vec![1; 16]),
            Frame::new(2, 2, 0, 0, vec![3; 4]),
        ]);
        let (sheet, _) = compose_sprite_sheet("unit", &bank);

        // The 2x2 frame sits at (1, 1) within its 4x4 cell.
        let expected = grey_palette(Transparency::IndexZero).get(3);
        assert_eq!(sheet.get(5, 1), Some(expected));
        assert_eq!(sheet.get(6, 2), Some(expected));
        assert_eq!(sheet.get(4, 0), Some(Colour::TRANSPARENT));
    }

    #[test]
    fn test_displacement_is_clamped() {
        let bank = bank(vec![
            Frame::new(4, 4, 0, 0, vec![1; 16]),
            Frame::new(2, 2, 100, -100, vec![3; 4]),
        ]);
        let (sheet, _) = compose_sprite_sheet("unit", &bank);

        // x clamps to the cell's right edge, y to its top.
        let expected = grey_palette(Transparency::IndexZero).get(3);
        assert_eq!(sheet.get(6, 0), Some(expected));
        assert_eq!(sheet.get(7, 1), Some(expected));
    }

    #[test]
    fn test_transparent_background() {
        let bank = bank(vec![Frame::new(2, 2, 0, 0, vec![0; 4])]);
        let (sheet, _) = compose_sprite_sheet("unit", &bank);
        // Index 0 renders transparent in sprite palettes.
        assert!(sheet.get(0, 0).unwrap().is_transparent());
    }

    #[test]
    fn test_empty_bank() {
        let (sheet, meta) = compose_sprite_sheet("unit", &bank(vec![]));
        assert_eq!(sheet.width(), 0);
        assert_eq!(sheet.height(), 0);
        assert!(meta.frames.is_empty());
    }

    #[test]
    fn test_tile_sheet_layout() {
        let set = TileSet {
            palette: grey_palette(Transparency::Opaque),
            tiles: vec![Tile::new(0, vec![1; 1024]), Tile::new(7, vec![2; 1024])],
        };
        let (sheet, meta) = compose_tile_sheet("desert", &set);

        assert_eq!(sheet.width(), 64);
        assert_eq!(sheet.height(), 32);
        assert_eq!(meta.frames[1].name, "desert-7");
        assert_eq!(meta.frames[1].x, 32);
        assert_eq!(sheet.get(32, 0), Some(grey_palette(Transparency::Opaque).get(2)));
    }

    #[test]
    fn test_write_sheet_meta() {
        let meta = SheetMeta {
            image: "unit.png".to_string(),
            frame_width: 4,
            frame_height: 4,
            frames: vec![FrameRect {
                name: "unit-0".to_string(),
                x: 0,
                y: 0,
                w: 4,
                h: 4,
            }],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unit.json");
        write_sheet_meta(&meta, &path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["image"], "unit.png");
        assert_eq!(parsed["frames"][0]["name"], "unit-0");
        assert_eq!(parsed["frames"][0]["w"], 4);
    }
}
