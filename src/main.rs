//! Command-line front end for stellar-mesh.
//!
//! `generate` runs the full pipeline (build, finalize, promote, project,
//! validate) and saves/streams the result; `info` reports the version or
//! writes the default configuration file.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::warn;
use std::path::PathBuf;

use stellar_mesh::config::MeshConfig;
use stellar_mesh::io::{save_vtk, view_mesh, VisualizationMode};
use stellar_mesh::topology::{build_skeleton, finalize, project_mesh, promote_to_high_order};
use stellar_mesh::validation::{mark_flipped_boundary_elements, mark_flipped_elements};

/// Multi-block mesh generator for stellar modeling.
#[derive(Parser)]
#[command(name = "stellar-mesh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate multi-block curvilinear meshes for stellar modeling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a multi-block mesh for stellar modeling.
    Generate(GenerateArgs),
    /// Access information about the program.
    Info(InfoArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Path to a TOML configuration file ([main] table).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Output base name for the generated mesh.
    #[arg(short, long, default_value = "stellar")]
    output: String,
    /// Do not save the generated mesh to a file.
    #[arg(short = 'n', long)]
    nosave: bool,
    /// View the generated mesh in a running GLVis server.
    #[arg(short, long)]
    view: bool,
    /// Viewer host.
    #[arg(long, default_value = "localhost")]
    glvis_host: String,
    /// Viewer port.
    #[arg(long, default_value_t = 19916)]
    glvis_port: u16,
}

#[derive(Args)]
struct InfoArgs {
    /// Display version information.
    #[arg(short = 'V', long)]
    version: bool,
    /// Save the default configuration to default.toml.
    #[arg(short, long)]
    default: bool,
}

fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => MeshConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => MeshConfig::default(),
    };

    let mut mesh = build_skeleton(&config);
    finalize(&mut mesh, &config).context("finalizing topology")?;
    promote_to_high_order(&mut mesh, &config).context("promoting to high order")?;
    project_mesh(&mut mesh, &config).context("projecting curvilinear nodes")?;

    let flipped_elements = mark_flipped_elements(&mut mesh)?;
    let flipped_boundary = mark_flipped_boundary_elements(&mut mesh)?;
    if flipped_elements + flipped_boundary > 0 {
        warn!(
            "geometry check: {flipped_elements} flipped elements, \
             {flipped_boundary} flipped boundary faces (tagged, not removed)"
        );
    }

    if !args.nosave {
        save_vtk(&mesh, &args.output).context("saving VTK dataset")?;
    }

    if args.view {
        view_mesh(
            &mesh,
            "Spheroidal Mesh - Colored by Element ID",
            VisualizationMode::ElementId,
            &args.glvis_host,
            args.glvis_port,
        )
        .context("streaming mesh to viewer")?;
    }
    Ok(())
}

fn info(args: InfoArgs) -> anyhow::Result<()> {
    if args.version {
        println!("stellar-mesh {}", env!("CARGO_PKG_VERSION"));
    }
    if args.default {
        MeshConfig::default()
            .save("default.toml")
            .context("writing default.toml")?;
        println!("wrote default configuration to default.toml");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Info(args) => info(args),
    }
}
