//! PNG input/output for pixel grids.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{Result, RetconError};
use crate::types::Colour;

/// Convert a pixel grid to an RGBA image buffer.
pub fn to_rgba_image(pixels: &[Vec<Colour>]) -> RgbaImage {
    let height = pixels.len() as u32;
    let width = pixels.first().map_or(0, |row| row.len()) as u32;

    let mut img: RgbaImage = ImageBuffer::new(width, height);
    for (y, row) in pixels.iter().enumerate() {
        for (x, colour) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, Rgba(colour.to_rgba()));
        }
    }
    img
}

/// Write a pixel grid to a PNG file.
pub fn write_png(pixels: &[Vec<Colour>], path: &Path) -> Result<()> {
    to_rgba_image(pixels).save(path).map_err(|e| RetconError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;
    Ok(())
}

/// Read a PNG file back into a pixel grid.
pub fn read_png(path: &Path) -> Result<Vec<Vec<Colour>>> {
    let img = image::open(path)
        .map_err(|e| RetconError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read PNG: {}", e),
        })?
        .to_rgba8();

    let pixels = (0..img.height())
        .map(|y| {
            (0..img.width())
                .map(|x| {
                    let [r, g, b, a] = img.get_pixel(x, y).0;
                    Colour::new(r, g, b, a)
                })
                .collect()
        })
        .collect();
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_png_round_trip() {
        let pixels = vec![
            vec![Colour::rgb(255, 0, 0), Colour::TRANSPARENT],
            vec![Colour::new(0, 255, 0, 128), Colour::BLACK],
        ];

        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.png");
        write_png(&pixels, &path).unwrap();

        assert_eq!(read_png(&path).unwrap(), pixels);
    }

    #[test]
    fn test_dimensions() {
        let pixels = vec![vec![Colour::WHITE; 3]; 2];
        let img = to_rgba_image(&pixels);
        assert_eq!((img.width(), img.height()), (3, 2));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        assert!(read_png(&dir.path().join("absent.png")).is_err());
    }
}
