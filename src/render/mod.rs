//! Rendering module for retcon.
//!
//! Converts palette-indexed assets to true-colour pixel grids, composites
//! them into strip sheets, scales them, and writes PNG output.

mod png;
mod scale;
mod sheet;

pub use png::{read_png, to_rgba_image, write_png};
pub use scale::{scale_builtin, scale_double, ExternalTool, Scaler, DEFAULT_TIMEOUT, DEFAULT_TOOL};
pub use sheet::{
    compose_sprite_sheet, compose_tile_sheet, render_frame, write_sheet_meta, FrameRect,
    RenderedSheet, SheetMeta,
};
