//! cylinder - procedural cylinder mesh generator
//!
//! # Commands
//!
//! - `cylinder generate` - Write one cylinder as .obj or .cylmesh
//! - `cylinder info` - Print counts and bounds without writing
//! - `cylinder build` - Generate every cylinder in a cylinders.toml manifest
//! - `cylinder check` - Validate a manifest without writing
//!
//! # Usage
//!
//! ```bash
//! # Capped 16-segment pillar as OBJ
//! cylinder generate --height 300 --radius 20 --segments 16 -o pillar.obj
//!
//! # Open double-sided pipe in packed form
//! cylinder generate --no-caps --double-sided -o pipe.cylmesh
//! ```

mod export;
mod manifest;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use cylinder_mesh::CylinderConfig;
use cylinder_mesh::config::{DEFAULT_HEIGHT, DEFAULT_RADIAL_SEGMENTS, DEFAULT_RADIUS};

use crate::export::{OutputFormat, export_cylinder};

#[derive(Parser)]
#[command(name = "cylinder")]
#[command(about = "Procedural cylinder mesh generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Cylinder shape flags shared by `generate` and `info`
#[derive(Args, Debug)]
struct ShapeArgs {
    /// Extent along +Z
    #[arg(long, default_value_t = DEFAULT_HEIGHT, allow_negative_numbers = true)]
    height: f32,

    /// Radius in the XY plane
    #[arg(long, default_value_t = DEFAULT_RADIUS, allow_negative_numbers = true)]
    radius: f32,

    /// Number of radial segments
    #[arg(long, default_value_t = DEFAULT_RADIAL_SEGMENTS)]
    segments: u32,

    /// Leave both ends open
    #[arg(long)]
    no_caps: bool,

    /// Add back faces to the side wall
    #[arg(long)]
    double_sided: bool,

    /// Use per-quad flat normals instead of smoothed ones
    #[arg(long)]
    flat: bool,
}

impl ShapeArgs {
    fn config(&self) -> CylinderConfig {
        CylinderConfig::new(self.height, self.radius, self.segments)
            .with_caps(!self.no_caps)
            .with_double_sided(self.double_sided)
            .with_smooth_normals(!self.flat)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single cylinder mesh file
    Generate {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Output file (.obj or .cylmesh)
        #[arg(short, long, default_value = "cylinder.obj")]
        output: PathBuf,
    },

    /// Print vertex/triangle counts and bounds
    Info {
        #[command(flatten)]
        shape: ShapeArgs,
    },

    /// Generate cylinders from a manifest file
    Build {
        /// Path to cylinders.toml manifest
        #[arg(default_value = "cylinders.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without generating
    Check {
        /// Path to cylinders.toml manifest
        #[arg(default_value = "cylinders.toml")]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { shape, output } => {
            let config = shape.config();
            let format = OutputFormat::from_path(&output)?;
            let name = output
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("cylinder")
                .to_string();

            tracing::info!("Generating {:?}", output);
            export_cylinder(&config, &output, format, &name)?;
            tracing::info!("Done!");
        }

        Commands::Info { shape } => {
            let config = shape.config();
            config.validate()?;
            let counts = config.buffer_counts();
            let bounds = config.bounding_box();

            println!("vertices:  {}", counts.vertex_count);
            println!("triangles: {}", counts.triangle_count);
            println!("indices:   {}", counts.index_count());
            println!("bounds:    {} .. {}", bounds.min, bounds.max);
            if !config.has_mesh() {
                println!("(height is not positive, no mesh would be generated)");
            }
        }

        Commands::Build { manifest, output } => {
            tracing::info!("Building cylinders from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let written = manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete! {} file(s) written", written.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}
