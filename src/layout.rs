/**
 * Contrast layouts
 *
 * Each layout fills a 16×16 favicon from a palette arranged by the greedy
 * assigner. Full-resolution layouts place one palette entry per pixel; block
 * layouts assign a coarse grid and paint every cell as a square block so the
 * pattern stays legible at favicon size.
 */

use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::assign::{AssignConfig, AssignError, Assignment, Cell, GreedyAssigner, Pins};
use crate::canvas::{Canvas, CanvasError, Color};
use crate::palette;

/// Side length of every rendered favicon, in pixels
pub const FAVICON_SIZE: u32 = 16;

/// Error types for layout rendering
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The assigner rejected the layout's input
    #[error("Assignment failed: {0}")]
    Assign(#[from] AssignError),

    /// Painting or saving the canvas failed
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    /// Failed to create the output directory
    #[error("Failed to create output directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// The named contrast layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum LayoutKind {
    /// 256 unique gray levels, one per pixel
    #[value(name = "unique-gray")]
    UniqueGray,
    /// 256 unique colors from an 8×8×4 RGB cube, one per pixel
    #[value(name = "unique-color")]
    UniqueColor,
    /// Like `UniqueColor`, with black top-left and white bottom-right
    #[value(name = "unique-color-bw")]
    UniqueColorPinnedBw,
    /// 4×4 blocks of 16 gray levels, black and white corners
    #[value(name = "blocks-gray")]
    BlocksGray,
    /// 4×4 blocks of 16 colors, black and white corners
    #[value(name = "blocks-color")]
    BlocksColor,
    /// 2×2 blocks of 4 gray levels, black and white corners
    #[value(name = "blocks2-gray")]
    Blocks2Gray,
    /// 2×2 blocks of black, white, red and cyan
    #[value(name = "blocks2-color")]
    Blocks2Color,
}

impl LayoutKind {
    /// Every layout, in rendering order
    pub const ALL: [LayoutKind; 7] = [
        LayoutKind::UniqueGray,
        LayoutKind::UniqueColor,
        LayoutKind::UniqueColorPinnedBw,
        LayoutKind::BlocksGray,
        LayoutKind::BlocksColor,
        LayoutKind::Blocks2Gray,
        LayoutKind::Blocks2Color,
    ];

    /// Output file name
    pub fn file_name(&self) -> &'static str {
        match self {
            LayoutKind::UniqueGray => "contrast_unique_gray.png",
            LayoutKind::UniqueColor => "contrast_unique_color.png",
            LayoutKind::UniqueColorPinnedBw => "contrast_unique_color_bw.png",
            LayoutKind::BlocksGray => "favicon_blocks_gray.png",
            LayoutKind::BlocksColor => "favicon_blocks_color.png",
            LayoutKind::Blocks2Gray => "favicon_blocks2_gray.png",
            LayoutKind::Blocks2Color => "favicon_blocks2_color.png",
        }
    }

    /// Cells per side of the assignment grid
    pub fn grid_size(&self) -> usize {
        match self {
            LayoutKind::UniqueGray | LayoutKind::UniqueColor | LayoutKind::UniqueColorPinnedBw => 16,
            LayoutKind::BlocksGray | LayoutKind::BlocksColor => 4,
            LayoutKind::Blocks2Gray | LayoutKind::Blocks2Color => 2,
        }
    }

    /// Pixels per cell side on the favicon
    pub fn block_size(&self) -> u32 {
        FAVICON_SIZE / self.grid_size() as u32
    }

    /// Restarts used unless overridden
    pub fn default_restarts(&self) -> usize {
        match self {
            LayoutKind::UniqueGray | LayoutKind::UniqueColor | LayoutKind::UniqueColorPinnedBw => 5,
            LayoutKind::BlocksGray => 20,
            LayoutKind::BlocksColor | LayoutKind::Blocks2Gray | LayoutKind::Blocks2Color => 50,
        }
    }

    /// Seed used unless overridden
    pub fn default_seed(&self) -> u64 {
        match self {
            LayoutKind::UniqueGray => 2026,
            LayoutKind::UniqueColor => 2027,
            LayoutKind::UniqueColorPinnedBw => 2028,
            LayoutKind::BlocksGray => 3030,
            LayoutKind::BlocksColor => 3031,
            LayoutKind::Blocks2Gray => 4040,
            LayoutKind::Blocks2Color => 4041,
        }
    }

    /// Whether the top-left and bottom-right cells are pinned black and white
    pub fn pins_corners(&self) -> bool {
        !matches!(self, LayoutKind::UniqueGray | LayoutKind::UniqueColor)
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutKind::UniqueGray => "unique-gray",
            LayoutKind::UniqueColor => "unique-color",
            LayoutKind::UniqueColorPinnedBw => "unique-color-bw",
            LayoutKind::BlocksGray => "blocks-gray",
            LayoutKind::BlocksColor => "blocks-color",
            LayoutKind::Blocks2Gray => "blocks2-gray",
            LayoutKind::Blocks2Color => "blocks2-color",
        };
        f.write_str(name)
    }
}

/// Overrides for a layout's defaults
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    /// Replace the layout's seed
    pub seed: Option<u64>,
    /// Replace the layout's restart count
    pub restarts: Option<usize>,
    /// Show assigner progress
    pub verbose: bool,
}

/// A painted layout and the score of its assignment
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Which layout was rendered
    pub kind: LayoutKind,
    /// The 16×16 favicon
    pub canvas: Canvas,
    /// Total adjacent-pair contrast of the assignment
    pub score: f64,
}

/// Pins for the top-left and bottom-right corners of a `size`×`size` grid
fn corner_pins<T>(size: usize, top_left: T, bottom_right: T) -> Pins<T> {
    Pins::from([
        (Cell::new(0, 0), top_left),
        (Cell::new(size - 1, size - 1), bottom_right),
    ])
}

/// `cells * block_size` in pixels, if it fits a canvas side
fn scaled(cells: usize, block_size: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(block_size))
        .ok_or(LayoutError::Canvas(CanvasError::InvalidDimensions))
}

/**
 * Paint an assignment, one square block per cell
 *
 * Fails with `CanvasError::InvalidDimensions` when the scaled canvas would
 * overflow or exceed `Canvas::MAX_PIXELS`.
 */
pub fn paint<T, F>(assignment: &Assignment<T>, block_size: u32, to_color: F) -> Result<Canvas>
where
    F: Fn(&T) -> Color,
{
    let shape = assignment.shape();
    let width = scaled(shape.width(), block_size)?;
    let height = scaled(shape.height(), block_size)?;
    let mut canvas = Canvas::new(width, height, Color::BLACK)?;

    for (cell, value) in assignment.iter() {
        canvas.fill_block(
            scaled(cell.x, block_size)?,
            scaled(cell.y, block_size)?,
            block_size,
            block_size,
            to_color(value),
        )?;
    }

    Ok(canvas)
}

fn assigner_for(kind: LayoutKind, options: &LayoutOptions) -> Result<GreedyAssigner> {
    let size = kind.grid_size();
    let config = AssignConfig {
        width: size,
        height: size,
        restarts: options.restarts.unwrap_or_else(|| kind.default_restarts()),
        seed: options.seed.unwrap_or_else(|| kind.default_seed()),
        verbose: options.verbose,
    };
    Ok(GreedyAssigner::new(config)?)
}

fn render_gray(kind: LayoutKind, options: &LayoutOptions, levels: Vec<u8>) -> Result<Rendered> {
    let assigner = assigner_for(kind, options)?;
    let pins = if kind.pins_corners() {
        corner_pins(kind.grid_size(), 0, 255)
    } else {
        Pins::new()
    };

    let assignment = assigner.assign(&levels, palette::abs_diff, &pins)?;
    let canvas = paint(&assignment, kind.block_size(), |&v| Color::gray(v))?;

    Ok(Rendered {
        kind,
        canvas,
        score: assignment.score(),
    })
}

fn render_color(kind: LayoutKind, options: &LayoutOptions, colors: Vec<Color>) -> Result<Rendered> {
    let assigner = assigner_for(kind, options)?;
    let pins = if kind.pins_corners() {
        corner_pins(kind.grid_size(), Color::BLACK, Color::WHITE)
    } else {
        Pins::new()
    };

    let assignment = assigner.assign(&colors, palette::rgb_distance_sq, &pins)?;
    let canvas = paint(&assignment, kind.block_size(), |&c| c)?;

    Ok(Rendered {
        kind,
        canvas,
        score: assignment.score(),
    })
}

/**
 * Render a layout into a 16×16 canvas
 */
pub fn render(kind: LayoutKind, options: &LayoutOptions) -> Result<Rendered> {
    match kind {
        LayoutKind::UniqueGray => render_gray(kind, options, palette::gray_ramp()),
        LayoutKind::BlocksGray => render_gray(kind, options, palette::gray_levels(16)),
        LayoutKind::Blocks2Gray => render_gray(kind, options, palette::gray_levels(4)),
        LayoutKind::UniqueColor | LayoutKind::UniqueColorPinnedBw => {
            render_color(kind, options, palette::rgb_cube_256())
        }
        LayoutKind::BlocksColor => render_color(kind, options, palette::block_palette_16()),
        LayoutKind::Blocks2Color => render_color(kind, options, palette::block_palette_4()),
    }
}

/**
 * Render a layout and save it under `dir`, returning the written path
 */
pub fn render_to_dir<P: AsRef<Path>>(kind: LayoutKind, options: &LayoutOptions, dir: P) -> Result<(Rendered, PathBuf)> {
    std::fs::create_dir_all(dir.as_ref())?;

    let rendered = render(kind, options)?;
    let path = dir.as_ref().join(kind.file_name());
    rendered.canvas.save(&path)?;

    Ok((rendered, path))
}
