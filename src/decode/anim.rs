//! Animation table decoder.
//!
//! Two fixed-record tables: a count-prefixed list of 20-byte animation
//! headers (16-byte NUL-padded name, u16 start, u16 end inclusive), then a
//! count-prefixed list of 22-byte frame-detail records (8-byte NUL-padded
//! source filename, u16 frame number, two flag bytes, and trailing reserved
//! bytes of unknown meaning). Each animation's details are the slice of the
//! flat detail table covered by its [start, end] range.

use crate::types::{canonical_name, AnimTable, Animation, FrameDetail};

use super::Reader;

const HEADER_BYTES: usize = 20;
const NAME_BYTES: usize = 16;

const DETAIL_BYTES: usize = 22;
const FILENAME_BYTES: usize = 8;

/// Decode an animation table from raw file bytes.
///
/// Declared counts that overrun the file truncate to the records that fully
/// decode; a header range past the end of the detail table clamps rather
/// than fails.
pub fn decode(data: &[u8]) -> AnimTable {
    let mut reader = Reader::new(data);

    let header_count = reader.read_u32().unwrap_or(0);
    let mut headers = Vec::new();
    for _ in 0..header_count {
        let Some(record) = reader.take(HEADER_BYTES) else {
            break;
        };
        headers.push((
            field_text(&record[..NAME_BYTES]),
            u16::from_le_bytes([record[16], record[17]]),
            u16::from_le_bytes([record[18], record[19]]),
        ));
    }

    let detail_count = reader.read_u32().unwrap_or(0);
    let mut details = Vec::new();
    for _ in 0..detail_count {
        let Some(record) = reader.take(DETAIL_BYTES) else {
            break;
        };
        details.push(FrameDetail {
            source: field_text(&record[..FILENAME_BYTES]),
            frame: u16::from_le_bytes([record[8], record[9]]),
            primary: record[10] != 0,
            mirrored: record[11] != 0,
            reserved: record[12..].to_vec(),
        });
    }

    let animations = headers
        .into_iter()
        .map(|(name, start, end)| {
            let frames = slice_details(&details, start, end);
            Animation {
                name: canonical_name(&name),
                start,
                end,
                frames,
            }
        })
        .collect();

    AnimTable { animations }
}

/// Slice the flat detail table by an inclusive [start, end] range,
/// clamped to the table's actual length.
fn slice_details(details: &[FrameDetail], start: u16, end: u16) -> Vec<FrameDetail> {
    let start = start as usize;
    let end = (end as usize + 1).min(details.len());
    if start >= end {
        return Vec::new();
    }
    details[start..end].to_vec()
}

/// Decode a NUL-padded ASCII field, trimming trailing NULs and whitespace.
fn field_text(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn header(name: &str, start: u16, end: u16) -> Vec<u8> {
        let mut record = vec![0u8; HEADER_BYTES];
        record[..name.len()].copy_from_slice(name.as_bytes());
        record[16..18].copy_from_slice(&start.to_le_bytes());
        record[18..20].copy_from_slice(&end.to_le_bytes());
        record
    }

    fn detail(source: &str, frame: u16, primary: bool, mirrored: bool) -> Vec<u8> {
        let mut record = vec![0u8; DETAIL_BYTES];
        record[..source.len()].copy_from_slice(source.as_bytes());
        record[8..10].copy_from_slice(&frame.to_le_bytes());
        record[10] = primary as u8;
        record[11] = mirrored as u8;
        record[12..].copy_from_slice(&[0xAA; 10]);
        record
    }

    fn table_file(headers: &[Vec<u8>], details: &[Vec<u8>]) -> Vec<u8> {
        let mut data = (headers.len() as u32).to_le_bytes().to_vec();
        for h in headers {
            data.extend_from_slice(h);
        }
        data.extend_from_slice(&(details.len() as u32).to_le_bytes());
        for d in details {
            data.extend_from_slice(d);
        }
        data
    }

    #[test]
    fn test_join_by_frame_range() {
        let data = table_file(
            &[header("walk", 0, 3)],
            &(0..6).map(|i| detail("unit.shp", i, true, false)).collect::<Vec<_>>(),
        );
        let table = decode(&data);

        assert_eq!(table.animations.len(), 1);
        let walk = &table.animations[0];
        assert_eq!(walk.name, "walk");
        assert_eq!(walk.frames.len(), 4);
        assert_eq!(walk.frames[3].frame, 3);
    }

    #[test]
    fn test_range_clamps_to_detail_table() {
        let data = table_file(
            &[header("move", 2, 99)],
            &(0..4).map(|i| detail("unit.shp", i, true, false)).collect::<Vec<_>>(),
        );
        let table = decode(&data);

        let walk = &table.animations[0];
        assert_eq!(walk.name, "walk");
        assert_eq!(walk.frames.len(), 2);
        assert_eq!(walk.declared_len(), 98);
    }

    #[test]
    fn test_detail_fields() {
        let data = table_file(&[header("fire", 0, 0)], &[detail("tank.shp", 7, false, true)]);
        let table = decode(&data);

        let frame = &table.animations[0].frames[0];
        assert_eq!(frame.source, "tank.shp");
        assert_eq!(frame.frame, 7);
        assert!(!frame.primary);
        assert!(frame.mirrored);
        assert_eq!(frame.reserved, vec![0xAA; 10]);
    }

    #[test]
    fn test_name_canonicalization_and_passthrough() {
        let data = table_file(
            &[header("STAND", 0, 0), header("Deploy", 0, 0)],
            &[detail("a.shp", 0, true, false)],
        );
        let table = decode(&data);
        assert_eq!(table.animations[0].name, "idle");
        assert_eq!(table.animations[1].name, "deploy");
    }

    #[test]
    fn test_truncated_header_table() {
        let mut data = table_file(&[header("walk", 0, 0)], &[]);
        data[0..4].copy_from_slice(&5u32.to_le_bytes());
        // The detail-count word was swallowed by the header over-read.
        data.truncate(4 + HEADER_BYTES + 2);
        let table = decode(&data);
        assert_eq!(table.animations.len(), 1);
        assert!(table.animations[0].frames.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let table = decode(&[]);
        assert!(table.animations.is_empty());
    }

    #[test]
    fn test_start_past_table_yields_empty() {
        let data = table_file(&[header("walk", 10, 12)], &[detail("a.shp", 0, true, false)]);
        let table = decode(&data);
        assert!(table.animations[0].frames.is_empty());
    }
}
