//! retcon - legacy RTS asset converter
//!
//! A library for decoding a legacy real-time-strategy game's proprietary
//! binary assets (sprite banks, terrain tile sets, animation tables, level
//! maps) and re-encoding them as modern engine artifacts: PNG strip
//! sheets, sequence descriptors, and binary tile grids with map
//! descriptors.

pub mod cli;
pub mod decode;
pub mod discovery;
pub mod error;
pub mod export;
pub mod output;
pub mod render;
pub mod report;
pub mod types;

pub use decode::{decode_anim_table, decode_map, decode_sprite_bank, decode_tile_set};
pub use discovery::{detect_asset_kind, scan_directory, AssetKind, Manifest, ScanResult};
pub use error::{Result, RetconError};
pub use export::{append_sequences, encode_grid, map_descriptor, sequence_block, TemplateMap};
pub use render::{
    compose_sprite_sheet, compose_tile_sheet, read_png, render_frame, scale_builtin, scale_double,
    write_png, write_sheet_meta, ExternalTool, RenderedSheet, Scaler, SheetMeta,
};
pub use report::{ConvertReport, FileReport, Outcome};
pub use types::{
    canonical_name, AnimTable, Animation, Cell, Colour, Compression, Frame, FrameDetail, MapGrid,
    Palette, SpriteBank, Tile, TileSet, Transparency,
};
