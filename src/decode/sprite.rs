//! Sprite bank decoder.
//!
//! Layout: byte 0 is the compression flag, bytes 2-3 the frame count,
//! bytes 8..776 the packed palette. A table of 8-byte frame headers
//! (width u16, height u16, offset-x i16, offset-y i16) follows the palette,
//! then the pixel blocks for all frames, contiguous in header order.

use crate::types::{Compression, Frame, Palette, SpriteBank, Transparency};

use super::Reader;

/// Offset of the frame count in the file header.
const FRAME_COUNT_OFFSET: usize = 2;

/// Offset of the packed palette.
const PALETTE_OFFSET: usize = 8;

/// Offset of the frame header table.
const FRAME_HEADERS_OFFSET: usize = PALETTE_OFFSET + crate::types::PALETTE_BYTES;

/// Control bytes below this value start a literal run.
const LITERAL_LIMIT: u8 = 0x80;

/// Decode a sprite bank from raw file bytes.
///
/// Truncated input is not an error: decoding stops where the bytes run out
/// and returns the frames built so far, with any partially-read pixel
/// buffers zero-filled (palette index 0, the transparent colour).
pub fn decode(data: &[u8]) -> SpriteBank {
    let compression = Compression::from_flag(data.first().copied().unwrap_or(0));
    let palette = Palette::from_six_bit_bytes(data, PALETTE_OFFSET, Transparency::IndexZero);

    let mut reader = Reader::new(data);
    reader.seek(FRAME_COUNT_OFFSET);
    let frame_count = reader.read_u16().unwrap_or(0);

    // Frame header table. Stops early if the declared count overruns the
    // file; the pixel pass then only sees the headers that fully decoded.
    reader.seek(FRAME_HEADERS_OFFSET);
    let mut headers = Vec::with_capacity(frame_count as usize);
    for _ in 0..frame_count {
        let (Some(width), Some(height), Some(dx), Some(dy)) = (
            reader.read_u16(),
            reader.read_u16(),
            reader.read_i16(),
            reader.read_i16(),
        ) else {
            break;
        };
        headers.push((width, height, dx, dy));
    }

    // Pixel blocks follow the full declared header table.
    reader.seek(FRAME_HEADERS_OFFSET + frame_count as usize * 8);
    let frames = headers
        .into_iter()
        .map(|(width, height, dx, dy)| {
            let pixel_count = width as usize * height as usize;
            let indices = match compression {
                Compression::Raw => reader.take_up_to(pixel_count).to_vec(),
                Compression::Rle => decode_rle_block(&mut reader, pixel_count),
            };
            Frame::new(width.into(), height.into(), dx.into(), dy.into(), indices)
        })
        .collect();

    SpriteBank {
        compression,
        palette,
        frames,
    }
}

/// Decode one frame's run-length-encoded pixel block.
///
/// A control byte below 0x80 is a literal run: the next `control + 1` bytes
/// are palette indices. A control byte at or above 0x80 is a transparent
/// run of `256 - control` pixels (index 0), consuming no further input.
/// Stops when the frame's pixel count is satisfied or the input ends;
/// never reads past the buffer and never writes past the frame.
fn decode_rle_block(reader: &mut Reader<'_>, pixel_count: usize) -> Vec<u8> {
    let mut out = vec![0u8; pixel_count];
    let mut filled = 0;

    while filled < pixel_count {
        let Some(control) = reader.read_u8() else {
            break;
        };
        if control < LITERAL_LIMIT {
            let want = control as usize + 1;
            let run = reader.take_up_to(want);
            let n = run.len().min(pixel_count - filled);
            out[filled..filled + n].copy_from_slice(&run[..n]);
            filled += n;
            if run.len() < want {
                break;
            }
        } else {
            // Output is pre-zeroed; a transparent run just advances.
            filled += (256 - control as usize).min(pixel_count - filled);
        }
    }

    out
}
