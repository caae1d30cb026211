//! Manifest parsing and batch generation
//!
//! Parses cylinders.toml and generates every named cylinder.
//!
//! ```toml
//! [output]
//! dir = "meshes/"
//!
//! [cylinders.pillar]
//! height = 300.0
//! radius = 20.0
//! segments = 16
//!
//! [cylinders.pipe]
//! height = 120.0
//! radius = 8.0
//! cap_ends = false
//! double_sided = true
//! format = "packed"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cylinder_mesh::CylinderConfig;

use crate::export::{OutputFormat, check_config, export_cylinder};

/// Root manifest structure
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub cylinders: BTreeMap<String, CylinderEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("meshes/")
}

/// One `[cylinders.<name>]` table: cylinder parameters plus an optional format
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "toml::Table")]
pub struct CylinderEntry {
    pub config: CylinderConfig,
    pub format: OutputFormat,
}

impl TryFrom<toml::Table> for CylinderEntry {
    type Error = toml::de::Error;

    fn try_from(mut table: toml::Table) -> Result<Self, Self::Error> {
        let format = match table.remove("format") {
            Some(value) => value.try_into()?,
            None => OutputFormat::default(),
        };
        let config = toml::Value::Table(table).try_into()?;
        Ok(Self { config, format })
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let manifest: Manifest = toml::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
    Ok(manifest)
}

/// Validate a manifest without writing anything
pub fn validate(manifest: &Manifest) -> Result<()> {
    if manifest.cylinders.is_empty() {
        tracing::warn!("Manifest defines no cylinders");
    }
    for (name, entry) in &manifest.cylinders {
        check_config(&entry.config, entry.format)
            .with_context(|| format!("Cylinder '{}' is invalid", name))?;
    }
    Ok(())
}

/// Generate every cylinder in the manifest, returning the written paths
pub fn build_all(manifest: &Manifest, output_override: Option<&Path>) -> Result<Vec<PathBuf>> {
    validate(manifest)?;

    let output_dir = output_override.unwrap_or(&manifest.output.dir);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir: {:?}", output_dir))?;

    let mut written = Vec::with_capacity(manifest.cylinders.len());
    for (name, entry) in &manifest.cylinders {
        let output = output_dir.join(format!("{}.{}", name, entry.format.extension()));
        tracing::info!("Generating cylinder: {} -> {:?}", name, output);
        export_cylinder(&entry.config, &output, entry.format, name)
            .with_context(|| format!("Failed to generate cylinder '{}'", name))?;
        written.push(output);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MANIFEST: &str = r#"
[output]
dir = "out/"

[cylinders.pillar]
height = 300.0
radius = 20.0
segments = 16

[cylinders.pipe]
height = 120.0
cap_ends = false
double_sided = true
format = "packed"
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest: Manifest = toml::from_str(MANIFEST).unwrap();
        assert_eq!(manifest.output.dir, PathBuf::from("out/"));
        assert_eq!(manifest.cylinders.len(), 2);

        let pillar = &manifest.cylinders["pillar"];
        assert_eq!(pillar.format, OutputFormat::Obj);
        assert_eq!(pillar.config.radial_segment_count, 16);
        assert!(pillar.config.cap_ends);

        let pipe = &manifest.cylinders["pipe"];
        assert_eq!(pipe.format, OutputFormat::Packed);
        assert_eq!(pipe.config.radius, cylinder_mesh::config::DEFAULT_RADIUS);
        assert!(!pipe.config.cap_ends);
        assert!(pipe.config.double_sided);
    }

    #[test]
    fn test_default_output_dir() {
        let manifest: Manifest = toml::from_str("[cylinders.a]\nheight = 1.0\n").unwrap();
        assert_eq!(manifest.output.dir, PathBuf::from("meshes/"));
    }

    #[test]
    fn test_unknown_cylinder_field_rejected() {
        let result: Result<Manifest, _> = toml::from_str("[cylinders.a]\nradious = 1.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: Result<Manifest, _> = toml::from_str("[cylinders.a]\nformat = \"fbx\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_reports_cylinder_name() {
        let manifest: Manifest =
            toml::from_str("[cylinders.flat]\nheight = 0.0\n").unwrap();
        let err = validate(&manifest).unwrap_err();
        assert!(format!("{:#}", err).contains("'flat'"));
    }

    #[test]
    fn test_build_all_writes_files() {
        let dir = tempdir().expect("Failed to create temp dir");
        let manifest: Manifest = toml::from_str(MANIFEST).unwrap();

        let written = build_all(&manifest, Some(dir.path())).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("pillar.obj").exists());
        assert!(dir.path().join("pipe.cylmesh").exists());
    }
}
