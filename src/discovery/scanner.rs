//! File system scanner for discovering legacy asset files.
//!
//! Recursively scans directories and classifies files by extension:
//! `.shp` sprite banks, `.icn` terrain tile sets, `.anm` animation tables,
//! `.map` level maps.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// Kind of legacy asset a file holds, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Sprite,
    Terrain,
    Anim,
    Map,
}

/// Classify a path by its extension.
pub fn detect_asset_kind(path: &Path) -> Option<AssetKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "shp" => Some(AssetKind::Sprite),
        "icn" => Some(AssetKind::Terrain),
        "anm" => Some(AssetKind::Anim),
        "map" => Some(AssetKind::Map),
        _ => None,
    }
}

/// Result of scanning a directory for legacy assets.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered sprite bank files.
    pub sprites: Vec<PathBuf>,
    /// Discovered terrain tile set files.
    pub terrains: Vec<PathBuf>,
    /// Discovered animation table files.
    pub anims: Vec<PathBuf>,
    /// Discovered map files.
    pub maps: Vec<PathBuf>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of discovered files.
    pub fn total(&self) -> usize {
        self.sprites.len() + self.terrains.len() + self.anims.len() + self.maps.len()
    }

    /// Check if no files were discovered.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Record one classified file.
    pub fn push(&mut self, kind: AssetKind, path: PathBuf) {
        match kind {
            AssetKind::Sprite => self.sprites.push(path),
            AssetKind::Terrain => self.terrains.push(path),
            AssetKind::Anim => self.anims.push(path),
            AssetKind::Map => self.maps.push(path),
        }
    }

    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.sprites.extend(other.sprites);
        self.terrains.extend(other.terrains);
        self.anims.extend(other.anims);
        self.maps.extend(other.maps);
    }

    /// All discovered files paired with their kind, sprites first, in
    /// discovery order within each kind.
    pub fn all(&self) -> Vec<(AssetKind, &PathBuf)> {
        let mut files = Vec::with_capacity(self.total());
        files.extend(self.sprites.iter().map(|p| (AssetKind::Sprite, p)));
        files.extend(self.terrains.iter().map(|p| (AssetKind::Terrain, p)));
        files.extend(self.anims.iter().map(|p| (AssetKind::Anim, p)));
        files.extend(self.maps.iter().map(|p| (AssetKind::Map, p)));
        files
    }
}

/// Scan a directory tree for legacy asset files.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() || manifest.is_excluded(path) {
            continue;
        }

        if let Some(kind) = detect_asset_kind(path) {
            result.push(kind, path.to_path_buf());
        }
    }

    result
}
