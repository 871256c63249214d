/**
 * Favicon Contrast CLI - render contrast layouts and run ad-hoc assignments
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use favicon_contrast::{
    paint, palette, render_to_dir, AssignConfig, Cell, Color, GreedyAssigner, LayoutKind,
    LayoutOptions, Pins,
};

/// Contrast-maximizing favicon layouts
#[derive(Parser)]
#[command(name = "favicon-contrast")]
#[command(version)]
#[command(about = "Lay out palettes on tiny grids for maximum neighbour contrast", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render contrast layouts to PNG files
    Render {
        /// Layouts to render (all when omitted)
        #[arg(short, long = "layout", value_enum)]
        layouts: Vec<LayoutKind>,

        /// Output directory
        #[arg(short, long, default_value = "favicons/experiments")]
        output_dir: PathBuf,

        /// Override every layout's seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override every layout's restart count
        #[arg(short, long)]
        restarts: Option<usize>,

        /// Show assignment progress
        #[arg(short, long)]
        verbose: bool,
    },

    /// Assign a custom RGB palette to a grid (squared RGB distance scoring)
    Assign {
        /// Grid width in cells
        #[arg(long)]
        width: usize,

        /// Grid height in cells
        #[arg(long)]
        height: usize,

        /// Comma-separated hex colors, exactly width×height of them
        #[arg(short, long, value_delimiter = ',')]
        palette: Vec<String>,

        /// Pin a cell, as X,Y=#rrggbb (repeatable)
        #[arg(long = "pin")]
        pins: Vec<String>,

        /// Random seed for reproducibility
        #[arg(long, default_value = "1337")]
        seed: u64,

        /// Number of restarts
        #[arg(short, long, default_value = "5")]
        restarts: usize,

        /// Write the layout as a PNG
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pixels per cell in the PNG
        #[arg(short, long, default_value = "1")]
        block: u32,

        /// Show assignment progress
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the available layouts
    List,
}

/// Parse `X,Y=#rrggbb`
fn parse_pin(spec: &str) -> Result<(Cell, Color)> {
    let (coords, hex) = spec
        .split_once('=')
        .with_context(|| format!("Pin '{}' must look like X,Y=#rrggbb", spec))?;
    let (x, y) = coords
        .split_once(',')
        .with_context(|| format!("Pin '{}' must look like X,Y=#rrggbb", spec))?;

    let x: usize = x.trim().parse().with_context(|| format!("Invalid pin column in '{}'", spec))?;
    let y: usize = y.trim().parse().with_context(|| format!("Invalid pin row in '{}'", spec))?;
    let color = Color::from_hex(hex).with_context(|| format!("Invalid pin color in '{}'", spec))?;

    Ok((Cell::new(x, y), color))
}

fn run_render(
    layouts: Vec<LayoutKind>,
    output_dir: PathBuf,
    seed: Option<u64>,
    restarts: Option<usize>,
    verbose: bool,
) -> Result<()> {
    if restarts == Some(0) {
        anyhow::bail!("Restarts must be at least 1");
    }

    let layouts = if layouts.is_empty() {
        LayoutKind::ALL.to_vec()
    } else {
        layouts
    };

    println!("Rendering {} layout(s)", layouts.len());
    if let Some(s) = seed {
        println!("Seed: {}", s);
    }
    if let Some(r) = restarts {
        println!("Restarts: {}", r);
    }
    println!("Output: {}", output_dir.display());
    println!();

    let options = LayoutOptions {
        seed,
        restarts,
        verbose,
    };

    for kind in layouts {
        let (rendered, path) = render_to_dir(kind, &options, &output_dir)
            .with_context(|| format!("Failed to render layout {}", kind))?;
        println!("{:<16} score {:>14.1}  {}", kind.to_string(), rendered.score, path.display());
    }

    println!();
    println!("Done!");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_assign(
    width: usize,
    height: usize,
    palette_hex: Vec<String>,
    pin_specs: Vec<String>,
    seed: u64,
    restarts: usize,
    output: Option<PathBuf>,
    block: u32,
    verbose: bool,
) -> Result<()> {
    if block == 0 {
        anyhow::bail!("Block size must be positive");
    }

    let colors = palette_hex
        .iter()
        .map(|hex| Color::from_hex(hex))
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to parse palette")?;

    let mut pins = Pins::new();
    for spec in &pin_specs {
        let (cell, color) = parse_pin(spec)?;
        if pins.insert(cell, color).is_some() {
            anyhow::bail!("Cell ({}, {}) is pinned more than once", cell.x, cell.y);
        }
    }

    let config = AssignConfig {
        width,
        height,
        restarts,
        seed,
        verbose,
    };
    let assigner = GreedyAssigner::new(config).context("Invalid grid configuration")?;
    let assignment = assigner
        .assign(&colors, palette::rgb_distance_sq, &pins)
        .context("Failed to assign palette")?;

    for row in assignment.values().chunks(width) {
        let line: Vec<String> = row.iter().map(Color::to_hex).collect();
        println!("{}", line.join(" "));
    }
    println!("Score: {:.1}", assignment.score());

    if let Some(path) = output {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create output directory")?;
        }
        let canvas = paint(&assignment, block, |&c| c).context("Failed to paint layout")?;
        canvas.save(&path).context("Failed to save layout")?;
        println!("Saved layout to {}", path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            layouts,
            output_dir,
            seed,
            restarts,
            verbose,
        } => run_render(layouts, output_dir, seed, restarts, verbose)?,

        Commands::Assign {
            width,
            height,
            palette,
            pins,
            seed,
            restarts,
            output,
            block,
            verbose,
        } => run_assign(width, height, palette, pins, seed, restarts, output, block, verbose)?,

        Commands::List => {
            for kind in LayoutKind::ALL {
                let size = kind.grid_size();
                println!(
                    "{:<16} {}×{} grid, {} restarts, seed {:<5} -> {}",
                    kind.to_string(),
                    size,
                    size,
                    kind.default_restarts(),
                    kind.default_seed(),
                    kind.file_name()
                );
            }
        }
    }

    Ok(())
}
