//! Convert command implementation.
//!
//! Batch-converts legacy asset files: sprite banks and terrain tile sets
//! become PNG strip sheets, animation tables accumulate into a sequence
//! descriptor, maps become a binary tile grid plus a map descriptor. Files
//! are processed independently; one bad file is reported and skipped.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;

use crate::decode::{decode_anim_table, decode_map, decode_sprite_bank, decode_tile_set};
use crate::discovery::{detect_asset_kind, scan_directory, AssetKind, Manifest, ScanResult};
use crate::error::{Result, RetconError};
use crate::export::{append_sequences, encode_grid, map_descriptor, sequence_block, TemplateMap};
use crate::output::Printer;
use crate::render::{
    compose_sprite_sheet, compose_tile_sheet, write_png, write_sheet_meta, ExternalTool,
    RenderedSheet, Scaler, SheetMeta,
};
use crate::report::ConvertReport;

/// Name of the shared sequence accumulation file.
const SEQUENCES_FILE: &str = "sequences.yaml";

/// Convert legacy asset files into engine artifacts
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input files or directories; defaults to the manifest's sources
    pub paths: Vec<PathBuf>,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,

    /// Integer scale factor for sheet output
    #[arg(long)]
    pub scale: Option<u32>,

    /// Write a JSON frame map next to each sheet
    #[arg(long)]
    pub sheet_meta: bool,

    /// Skip the external upscaler even if one is configured
    #[arg(long)]
    pub no_external_scaler: bool,

    /// Manifest file to read project settings from
    #[arg(long, default_value = "retcon.yaml")]
    pub manifest: PathBuf,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let printer = Printer::new();

    let manifest = if args.manifest.exists() {
        Manifest::load(&args.manifest)?
    } else {
        Manifest::default()
    };

    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| RetconError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let scale = args.scale.unwrap_or_else(|| manifest.effective_scale()).max(1);
    let scaler = build_scaler(&args, &manifest, scale);

    let scan = collect_inputs(&args.paths, &manifest);
    if scan.is_empty() {
        printer.warning("Nothing", "no legacy asset files found");
        return Ok(());
    }

    let mut report = ConvertReport::new();
    for (kind, path) in scan.all() {
        printer.status("Converting", &path.display().to_string());
        match convert_file(kind, path, &args, &scaler, scale) {
            Ok(artifacts) => {
                for artifact in &artifacts {
                    println!("  {} -> {}", path.display(), artifact.display());
                }
                report.converted(path, artifacts);
            }
            Err(e) => {
                printer.error("Failed", &format!("{}: {}", path.display(), e));
                report.failed(path, e.to_string());
            }
        }
    }

    println!("Converted {} file(s) to {} ({})", report.converted_count(), args.output.display(), report);

    if report.is_total_failure() {
        return Err(RetconError::Export {
            message: format!("all {} input file(s) failed", report.failed_count()),
            help: None,
        });
    }
    Ok(())
}

/// Gather input files: directories are scanned recursively, explicit files
/// are classified by extension. With no explicit paths, the manifest's
/// source directories are scanned.
fn collect_inputs(paths: &[PathBuf], manifest: &Manifest) -> ScanResult {
    let paths: Vec<PathBuf> = if paths.is_empty() {
        manifest.effective_sources().iter().map(PathBuf::from).collect()
    } else {
        paths.to_vec()
    };

    let mut scan = ScanResult::new();
    for path in &paths {
        if path.is_dir() {
            scan.merge(scan_directory(path, manifest));
        } else if let Some(kind) = detect_asset_kind(path) {
            scan.push(kind, path.clone());
        }
    }
    scan
}

/// Build the scaler: probe for the manifest's external tool unless scaling
/// is off or the caller opted out.
fn build_scaler(args: &ConvertArgs, manifest: &Manifest, scale: u32) -> Scaler {
    if scale <= 1 || args.no_external_scaler {
        return Scaler::builtin();
    }
    let timeout = Duration::from_millis(manifest.scaler_timeout_ms);
    manifest
        .scaler
        .as_deref()
        .and_then(|name| ExternalTool::probe(name, timeout))
        .map(Scaler::with_tool)
        .unwrap_or_else(Scaler::builtin)
}

/// Convert one input file, returning the artifacts it produced.
fn convert_file(
    kind: AssetKind,
    path: &Path,
    args: &ConvertArgs,
    scaler: &Scaler,
    scale: u32,
) -> Result<Vec<PathBuf>> {
    let data = fs::read(path).map_err(|e| RetconError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;
    let stem = file_stem(path);

    match kind {
        AssetKind::Sprite => {
            let bank = decode_sprite_bank(&data);
            let (sheet, meta) = compose_sprite_sheet(&stem, &bank);
            write_sheet(sheet, meta, args, scaler, scale)
        }
        AssetKind::Terrain => {
            let set = decode_tile_set(&data);
            let (sheet, meta) = compose_tile_sheet(&stem, &set);
            write_sheet(sheet, meta, args, scaler, scale)
        }
        AssetKind::Anim => {
            let table = decode_anim_table(&data);
            let block = sequence_block(&stem, &table);
            let out = args.output.join(SEQUENCES_FILE);
            append_sequences(&out, &block)?;
            Ok(vec![out])
        }
        AssetKind::Map => {
            let grid = decode_map(&data);
            let bin_path = args.output.join(format!("{}.bin", stem));
            fs::write(&bin_path, encode_grid(&grid, &TemplateMap::default())).map_err(|e| {
                RetconError::Io {
                    path: bin_path.clone(),
                    message: format!("Failed to write tile grid: {}", e),
                }
            })?;
            let desc_path = args.output.join(format!("{}.yaml", stem));
            fs::write(&desc_path, map_descriptor(&stem, &grid)).map_err(|e| RetconError::Io {
                path: desc_path.clone(),
                message: format!("Failed to write map descriptor: {}", e),
            })?;
            Ok(vec![bin_path, desc_path])
        }
    }
}

/// Scale and write one composed sheet, plus its frame map when requested.
fn write_sheet(
    sheet: RenderedSheet,
    meta: SheetMeta,
    args: &ConvertArgs,
    scaler: &Scaler,
    scale: u32,
) -> Result<Vec<PathBuf>> {
    let pixels = scaler.scale(sheet.pixels(), scale);
    let png_path = args.output.join(format!("{}.png", sheet.name));
    write_png(&pixels, &png_path)?;

    let mut artifacts = vec![png_path];
    if args.sheet_meta {
        let meta_path = args.output.join(format!("{}.json", sheet.name));
        write_sheet_meta(&meta, &meta_path)?;
        artifacts.push(meta_path);
    }
    Ok(artifacts)
}

/// Lower-cased file stem, used to name output artifacts.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_else(|| "asset".to_string())
}
