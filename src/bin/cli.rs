// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! stlview CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use stlview::cli::{load_file, LoadStrategy, Reporter};
use stlview::geometry::{rasterize, summarize, ProjectionAxis};
use stlview::{Mesh, ViewConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "stlview")]
#[command(about = "Inspect STL meshes and draw them as ASCII art", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read the whole file into memory before decoding
    #[arg(long, global = true)]
    preload: bool,

    /// Configuration file (defaults to ./stlview.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print header, triangle count and extents
    Info {
        /// Input STL file
        file: PathBuf,

        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Draw the mesh on a size x size grid from one direction
    Draw {
        /// Input STL file
        file: PathBuf,

        /// Viewing direction (front, side, top)
        #[arg(short, long)]
        axis: Option<ProjectionAxis>,

        /// Grid size; the grid has size + 1 rows and columns
        #[arg(short, long)]
        size: Option<usize>,

        /// Print the summary before the drawing
        #[arg(long)]
        info: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ViewConfig::load(cli.config.as_deref())?;
    if !config.color {
        colored::control::set_override(false);
    }

    let strategy = if cli.preload || config.preload {
        LoadStrategy::Preload
    } else {
        LoadStrategy::Stream
    };

    match &cli.command {
        Commands::Info { file, json } => {
            let mesh = load(file, strategy, cli.verbose)?;
            info_command(file, &mesh, *json, config.color)?;
        }
        Commands::Draw {
            file,
            axis,
            size,
            info,
        } => {
            let mesh = load(file, strategy, cli.verbose)?;
            if *info {
                info_command(file, &mesh, false, config.color)?;
            }
            let axis = axis.unwrap_or(config.default_axis);
            let size = size.unwrap_or(config.grid_size);
            draw_command(&mesh, axis, size, &config)?;
        }
        Commands::Version => {
            println!("stlview v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn load(file: &Path, strategy: LoadStrategy, verbose: bool) -> Result<Mesh> {
    if verbose {
        Reporter::report_info(&format!("Reading {}", file.display()));
    }

    let start = Instant::now();
    let mesh = match load_file(file, strategy) {
        Ok(mesh) => mesh,
        Err(err) => {
            Reporter::report_error(&format!("{:#}", err));
            std::process::exit(1);
        }
    };

    if verbose {
        Reporter::report_timing(mesh.triangle_count(), start.elapsed());
    }
    if mesh.is_empty() {
        Reporter::report_warning("Mesh contains no triangles");
    }
    Ok(mesh)
}

fn info_command(file: &Path, mesh: &Mesh, json: bool, color: bool) -> Result<()> {
    let summary = summarize(mesh);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if color {
        Reporter::report_summary(&file.display().to_string(), &summary);
    } else {
        print!("{}", summary);
    }
    Ok(())
}

fn draw_command(mesh: &Mesh, axis: ProjectionAxis, size: usize, config: &ViewConfig) -> Result<()> {
    let grid = rasterize(mesh, axis, size)?;
    Reporter::report_projection(axis, &grid, config.filled_glyph, config.empty_glyph);
    Ok(())
}
