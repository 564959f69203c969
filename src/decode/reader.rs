//! Little-endian cursor over a raw byte slice.
//!
//! Reads return `Option` so a truncated file stops decoding at the point
//! the input runs out instead of failing; decoders hand back whatever model
//! they built up to that point.

use std::io::Cursor;

use byteorder::{ReadBytesExt, LE};

/// Forward-only reader over a legacy asset file's bytes.
pub struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Jump to an absolute offset. Offsets past the end are allowed; the
    /// next read simply returns `None`.
    pub fn seek(&mut self, offset: usize) {
        self.cursor.set_position(offset as u64);
    }

    /// Bytes left between the current position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.cursor
            .get_ref()
            .len()
            .saturating_sub(self.position())
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        self.cursor.read_u8().ok()
    }

    pub fn read_u16(&mut self) -> Option<u16> {
        self.cursor.read_u16::<LE>().ok()
    }

    pub fn read_i16(&mut self) -> Option<i16> {
        self.cursor.read_i16::<LE>().ok()
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        self.cursor.read_u32::<LE>().ok()
    }

    /// Take exactly `n` bytes, or `None` without consuming if fewer remain.
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let data = *self.cursor.get_ref();
        let start = self.position();
        let slice = data.get(start..start + n)?;
        self.seek(start + n);
        Some(slice)
    }

    /// Take up to `n` bytes, clamped to what remains.
    pub fn take_up_to(&mut self, n: usize) -> &'a [u8] {
        let data = *self.cursor.get_ref();
        let start = self.position().min(data.len());
        let end = (start + n).min(data.len());
        self.seek(end);
        &data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_reads() {
        let data = [0x05, 0xA0, 0x01, 0x00, 0x00, 0x00];
        let mut r = Reader::new(&data);
        assert_eq!(r.read_u16(), Some(0xA005));
        assert_eq!(r.read_u32(), Some(1));
        assert_eq!(r.read_u8(), None);
    }

    #[test]
    fn test_signed_read() {
        let data = (-3i16).to_le_bytes();
        let mut r = Reader::new(&data);
        assert_eq!(r.read_i16(), Some(-3));
    }

    #[test]
    fn test_read_past_end_returns_none() {
        let data = [0x01];
        let mut r = Reader::new(&data);
        assert_eq!(r.read_u16(), None);
    }

    #[test]
    fn test_take_exact() {
        let data = [1, 2, 3, 4];
        let mut r = Reader::new(&data);
        assert_eq!(r.take(2), Some(&[1, 2][..]));
        assert_eq!(r.take(3), None);
        // A failed take consumes nothing.
        assert_eq!(r.position(), 2);
        assert_eq!(r.take(2), Some(&[3, 4][..]));
    }

    #[test]
    fn test_take_up_to_clamps() {
        let data = [1, 2, 3];
        let mut r = Reader::new(&data);
        assert_eq!(r.take_up_to(8), &[1, 2, 3]);
        assert_eq!(r.take_up_to(8), &[] as &[u8]);
    }

    #[test]
    fn test_seek_past_end() {
        let data = [1, 2];
        let mut r = Reader::new(&data);
        r.seek(100);
        assert_eq!(r.remaining(), 0);
        assert_eq!(r.read_u8(), None);
    }
}
