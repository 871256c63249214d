//! Favicon Contrast Library
//!
//! Lays out a palette of gray levels or colors on a tiny grid so that
//! neighbouring cells contrast as strongly as possible, then paints the
//! result into a 16×16 favicon.
//!
//! # Features
//!
//! - Greedy most-constrained-first assignment with seeded restarts
//! - Caller-supplied contrast scores and pinned cells
//! - Bounds-checked RGB canvas with PNG output
//! - Seven ready-made favicon layouts (per-pixel and block mosaics)
//!
//! # Quick Start
//!
//! ## Assigning a Palette
//!
//! ```
//! use favicon_contrast::{assign, palette, Cell, GridShape, Pins};
//!
//! let shape = GridShape::new(4, 4).unwrap();
//! let levels = palette::gray_levels(16);
//! let pins = Pins::from([(Cell::new(0, 0), 0u8), (Cell::new(3, 3), 255u8)]);
//!
//! let result = assign(shape, &levels, palette::abs_diff, 20, 3030, Some(&pins)).unwrap();
//! assert_eq!(result.get(Cell::new(0, 0)), Some(&0));
//! assert_eq!(result.get(Cell::new(3, 3)), Some(&255));
//! ```
//!
//! ## Rendering a Layout
//!
//! ```no_run
//! use favicon_contrast::{render_to_dir, LayoutKind, LayoutOptions};
//!
//! let (rendered, path) =
//!     render_to_dir(LayoutKind::BlocksColor, &LayoutOptions::default(), "favicons").unwrap();
//! println!("score {} written to {}", rendered.score, path.display());
//! ```
//!
//! # Algorithm
//!
//! Each restart shuffles the palette, applies pins, then repeatedly fills the
//! empty cell with the most filled neighbours using the palette entry that
//! contrasts most with them. The best of all restarts by total adjacent-pair
//! score wins. Restarts draw their seeds from one root generator, so results
//! are reproducible and adding restarts never lowers the best score.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Contrast-maximizing grid assignment
pub mod assign;
/// RGB pixel buffer
pub mod canvas;
/// Favicon layouts built on the assigner
pub mod layout;
/// Palettes and contrast scores
pub mod palette;

// Re-export main types for convenience
pub use assign::{
    assign, total_score, AssignConfig, AssignError, Assignment, Cell, GreedyAssigner, GridShape,
    Pins,
};
pub use canvas::{Canvas, CanvasError, Color};
pub use layout::{
    paint, render, render_to_dir, LayoutError, LayoutKind, LayoutOptions, Rendered, FAVICON_SIZE,
};
