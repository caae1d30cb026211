//! Cylinder generation to files

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

use cylinder_mesh::{
    CYLINDER_SECTION, CylinderConfig, CylinderMesh, MAX_PACKED_VERTICES, PackedSink, SectionStore,
    write_obj, write_packed_mesh,
};
use mesh_common::PACKED_MESH_EXT;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Wavefront OBJ text
    #[default]
    Obj,
    /// Header + packed vertices + u16 indices
    Packed,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Obj => "obj",
            OutputFormat::Packed => PACKED_MESH_EXT,
        }
    }

    /// Detect format by extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "obj" => Ok(OutputFormat::Obj),
            e if e == PACKED_MESH_EXT => Ok(OutputFormat::Packed),
            _ => bail!(
                "Unsupported output format: {:?} (use .obj or .{})",
                path,
                PACKED_MESH_EXT
            ),
        }
    }
}

/// Check that `config` can be written in `format`
pub fn check_config(config: &CylinderConfig, format: OutputFormat) -> Result<()> {
    if !config.has_mesh() {
        bail!(
            "Height {} is not positive, no mesh to write",
            config.height
        );
    }
    config.validate()?;

    if format == OutputFormat::Packed {
        let vertex_count = config.buffer_counts().vertex_count as usize;
        if vertex_count > MAX_PACKED_VERTICES {
            bail!(
                "{} vertices exceed the packed limit of {} (reduce segments or use .obj)",
                vertex_count,
                MAX_PACKED_VERTICES
            );
        }
    }
    Ok(())
}

/// Generate a cylinder and encode it in `format`
pub fn render_cylinder(
    config: &CylinderConfig,
    format: OutputFormat,
    name: &str,
) -> Result<Vec<u8>> {
    check_config(config, format)?;

    let mut bytes = Vec::new();
    match format {
        OutputFormat::Obj => {
            let mut mesh = CylinderMesh::new(*config, SectionStore::new());
            mesh.activate()?;
            let section = mesh
                .sink()
                .section(CYLINDER_SECTION)
                .context("Generated mesh has no section")?;
            write_obj(&mut bytes, &section.buffers, name)?;
        }
        OutputFormat::Packed => {
            let mut mesh = CylinderMesh::new(*config, PackedSink::new());
            mesh.activate()?;
            let section = mesh
                .sink_mut()
                .take_section(CYLINDER_SECTION)
                .context("Generated mesh has no section")?;
            write_packed_mesh(&mut bytes, &section)?;
        }
    }
    Ok(bytes)
}

/// Generate a cylinder and write it to `output`
///
/// The output file is only touched once the whole mesh has been encoded.
pub fn export_cylinder(
    config: &CylinderConfig,
    output: &Path,
    format: OutputFormat,
    name: &str,
) -> Result<()> {
    let bytes = render_cylinder(config, format, name)?;

    std::fs::write(output, &bytes)
        .with_context(|| format!("Failed to write output: {:?}", output))?;

    tracing::debug!("Wrote {:?} ({:?}, {} bytes)", output, format, bytes.len());
    Ok(())
}
