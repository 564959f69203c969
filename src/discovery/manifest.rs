//! Project manifest (retcon.yaml) parsing.
//!
//! The manifest defines project configuration: source paths, output
//! settings, scaling, and the optional external upscaler.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetconError};

/// Project manifest loaded from retcon.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Source directories to scan for legacy assets.
    /// Defaults to the current directory if empty.
    pub sources: Vec<String>,

    /// Output directory for converted assets.
    pub output: PathBuf,

    /// Integer scale factor for sheet output.
    pub scale: Option<u32>,

    /// External upscaler binary name, probed on the PATH.
    pub scaler: Option<String>,

    /// Bound on the external upscaler's runtime, in milliseconds.
    pub scaler_timeout_ms: u64,

    /// Path suffixes to exclude from discovery.
    pub excludes: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sources: vec![],
            output: PathBuf::from("dist"),
            scale: None,
            scaler: None,
            scaler_timeout_ms: 2000,
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from a retcon.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RetconError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| RetconError::Manifest {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check retcon.yaml syntax".to_string()),
        })
    }

    /// Check if a path should be excluded from discovery.
    ///
    /// A pattern excludes any path that contains it as a component-wise
    /// substring, so `backup/` or `*.bak`-style suffixes both work.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                path_str.ends_with(suffix)
            } else {
                path_str.contains(pattern.as_str())
            }
        })
    }

    /// Get effective source paths, defaulting to the current directory.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }

    /// Get the effective scale factor.
    pub fn effective_scale(&self) -> u32 {
        self.scale.unwrap_or(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("output: build").unwrap();
        assert_eq!(manifest.output, PathBuf::from("build"));
        assert!(manifest.sources.is_empty());
        assert_eq!(manifest.scaler_timeout_ms, 2000);
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
sources:
  - assets/units
  - assets/terrain
output: dist
scale: 2
scaler: xbrzscale
scaler_timeout_ms: 5000
excludes:
  - "*.bak"
  - backup/
"#;
        let manifest = Manifest::parse(yaml).unwrap();
        assert_eq!(manifest.sources.len(), 2);
        assert_eq!(manifest.effective_scale(), 2);
        assert_eq!(manifest.scaler.as_deref(), Some("xbrzscale"));
        assert_eq!(manifest.scaler_timeout_ms, 5000);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(Manifest::parse("output: [unclosed").is_err());
    }

    #[test]
    fn test_excludes() {
        let manifest = Manifest {
            excludes: vec!["*.bak".to_string(), "backup/".to_string()],
            ..Default::default()
        };
        assert!(manifest.is_excluded(Path::new("units/tank.shp.bak")));
        assert!(manifest.is_excluded(Path::new("backup/tank.shp")));
        assert!(!manifest.is_excluded(Path::new("units/tank.shp")));
    }

    #[test]
    fn test_effective_sources_default() {
        assert_eq!(Manifest::default().effective_sources(), vec!["."]);
    }

    #[test]
    fn test_effective_scale_floor() {
        let manifest = Manifest {
            scale: Some(0),
            ..Default::default()
        };
        assert_eq!(manifest.effective_scale(), 1);
    }
}
