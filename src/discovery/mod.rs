//! Asset discovery: manifest configuration and directory scanning.

mod manifest;
mod scanner;

pub use manifest::Manifest;
pub use scanner::{detect_asset_kind, scan_directory, AssetKind, ScanResult};
