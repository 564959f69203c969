//! Map export: binary tile grid plus textual map descriptor.

use std::fmt::Write as _;

use byteorder::{WriteBytesExt, LE};

use crate::types::{Cell, MapGrid};

/// Cells inset from every map edge to form the playable bounds.
pub const BOUNDS_MARGIN: u32 = 2;

/// Mapping from decoded cells to target-engine tile templates.
///
/// The passable mapping is a placeholder heuristic (`tile % 4` into four
/// generic templates), not a faithful art correspondence; carrying it as a
/// value lets callers substitute a real mapping without touching the
/// encoder.
#[derive(Debug, Clone)]
pub struct TemplateMap {
    /// Template for impassable cells.
    pub impassable: u16,
    /// Templates for passable cells, selected by `tile % 4`.
    pub passable: [u16; 4],
}

impl Default for TemplateMap {
    fn default() -> Self {
        Self {
            impassable: 255,
            passable: [16, 17, 18, 19],
        }
    }
}

impl TemplateMap {
    /// Select the template id and sub-index for one cell.
    pub fn template_for(&self, cell: &Cell) -> (u16, u8) {
        if cell.impassable {
            (self.impassable, 0)
        } else {
            (self.passable[(cell.tile % 4) as usize], 0)
        }
    }
}

/// Encode the decoded grid into the target engine's binary tile layout:
/// per cell a u16 little-endian template id and a u8 sub-index, row-major.
pub fn encode_grid(grid: &MapGrid, templates: &TemplateMap) -> Vec<u8> {
    let mut out = Vec::with_capacity(grid.cells().len() * 3);
    for cell in grid.cells() {
        let (template, sub_index) = templates.template_for(cell);
        // Writing to a Vec cannot fail.
        out.write_u16::<LE>(template).unwrap();
        out.write_u8(sub_index).unwrap();
    }
    out
}

/// Render the textual map descriptor: dimensions, playable bounds inset by
/// a fixed margin, a single neutral player, and empty actor/rule sections.
pub fn descriptor(title: &str, grid: &MapGrid) -> String {
    let inset_x = BOUNDS_MARGIN.min(grid.width / 2);
    let inset_y = BOUNDS_MARGIN.min(grid.height / 2);

    let mut out = String::new();
    writeln!(out, "Title: {}", title).unwrap();
    writeln!(out, "MapSize: {},{}", grid.width, grid.height).unwrap();
    writeln!(
        out,
        "Bounds: {},{},{},{}",
        inset_x,
        inset_y,
        grid.width - inset_x * 2,
        grid.height - inset_y * 2
    )
    .unwrap();
    writeln!(out, "Players:").unwrap();
    writeln!(out, "\tPlayer@Neutral:").unwrap();
    writeln!(out, "\t\tName: Neutral").unwrap();
    writeln!(out, "\t\tOwnsWorld: True").unwrap();
    writeln!(out, "\t\tNonCombatant: True").unwrap();
    writeln!(out, "Actors:").unwrap();
    writeln!(out, "Rules:").unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(main: u16) -> Cell {
        Cell::from_raw(main, 0)
    }

    #[test]
    fn test_impassable_template() {
        let templates = TemplateMap::default();
        // Impassable wins regardless of tile index.
        let (template, sub) = templates.template_for(&cell(0x2007));
        assert_eq!(template, 255);
        assert_eq!(sub, 0);
    }

    #[test]
    fn test_passable_templates_cycle() {
        let templates = TemplateMap::default();
        assert_eq!(templates.template_for(&cell(0)).0, 16);
        assert_eq!(templates.template_for(&cell(1)).0, 17);
        assert_eq!(templates.template_for(&cell(2)).0, 18);
        assert_eq!(templates.template_for(&cell(3)).0, 19);
        assert_eq!(templates.template_for(&cell(4)).0, 16);
    }

    #[test]
    fn test_encode_grid_layout() {
        let grid = MapGrid::new(2, 1, vec![cell(0), cell(0x2000)]);
        let bytes = encode_grid(&grid, &TemplateMap::default());

        assert_eq!(bytes.len(), 6);
        assert_eq!(&bytes[..3], &[16, 0, 0]);
        assert_eq!(&bytes[3..], &[255, 0, 0]);
    }

    #[test]
    fn test_custom_template_map() {
        let templates = TemplateMap {
            impassable: 1000,
            passable: [1, 2, 3, 4],
        };
        let grid = MapGrid::new(1, 1, vec![cell(0x2000)]);
        let bytes = encode_grid(&grid, &templates);
        assert_eq!(&bytes[..2], &1000u16.to_le_bytes());
    }

    #[test]
    fn test_descriptor() {
        let grid = MapGrid::new(64, 48, vec![]);
        let text = descriptor("scrapyard", &grid);
        insta::assert_snapshot!(text, @r"
Title: scrapyard
MapSize: 64,48
Bounds: 2,2,60,44
Players:
	Player@Neutral:
		Name: Neutral
		OwnsWorld: True
		NonCombatant: True
Actors:
Rules:
");
    }

    #[test]
    fn test_descriptor_degenerate_map() {
        let grid = MapGrid::new(2, 1, vec![]);
        let text = descriptor("sliver", &grid);
        // The margin clamps instead of underflowing.
        assert!(text.contains("Bounds: 1,0,0,1"));
    }
}
