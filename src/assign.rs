/**
 * Contrast-Maximizing Grid Assigner
 *
 * Places every value of a palette on exactly one cell of a small grid so that
 * the summed contrast between orthogonally adjacent cells is as high as a
 * greedy heuristic can make it.
 *
 * ALGORITHM OVERVIEW
 * ==================
 *
 * Each restart builds a complete layout:
 * 1. Shuffle the palette with a restart-local generator
 * 2. Apply the caller's pins (each pin consumes one matching palette entry)
 * 3. Without pins, drop the last shuffled entry on a random cell
 * 4. Fill the "most constrained" empty cell next: the one with the most
 *    filled 4-neighbours. Ties move to a later cell with probability 0.25
 * 5. Give that cell the remaining entry with the highest summed contrast
 *    against its filled neighbours (first entry wins exact ties)
 *
 * The completed layout is scored over every adjacent pair, and the best
 * restart is returned (first restart wins ties).
 *
 * SEEDING
 * =======
 * A root generator is seeded from the caller's seed and hands one `u64` to
 * each restart, which seeds its own generator. Restart `k` sees the same
 * randomness regardless of how many restarts run, so raising the restart
 * count can only keep or improve the best score.
 *
 * COMPLEXITY
 * ==========
 * O(restarts × cells² × neighbours) score evaluations. Fine for favicon grids
 * (at most 16×16 cells, 256 palette entries); larger grids would want an
 * index of frontier cells instead of the full rescan per placement.
 */

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use thiserror::Error;

/// A grid coordinate (column `x`, row `y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Column, 0 at the left edge
    pub x: usize,
    /// Row, 0 at the top edge
    pub y: usize,
}

impl Cell {
    /// Create a cell from its column and row
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Caller-fixed values, keyed by cell
pub type Pins<T> = BTreeMap<Cell, T>;

/// Error types for grid assignment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// Width or height is zero
    #[error("Width and height must be positive")]
    InvalidDimensions,

    /// Restart count is zero
    #[error("Restarts must be at least 1")]
    InvalidRestarts,

    /// The palette does not cover the grid exactly
    #[error("Expected {expected} candidates for the grid, got {actual}")]
    CandidateCountMismatch {
        /// Number of grid cells
        expected: usize,
        /// Number of candidates supplied
        actual: usize,
    },

    /// A pin addresses a cell outside the grid
    #[error("Pinned cell ({x}, {y}) is outside the grid")]
    PinOutOfBounds {
        /// Column of the offending pin
        x: usize,
        /// Row of the offending pin
        y: usize,
    },

    /// A pin's value is not among the candidates still available
    #[error("Pinned value at ({x}, {y}) is not an available candidate")]
    InvalidPin {
        /// Column of the offending pin
        x: usize,
        /// Row of the offending pin
        y: usize,
    },
}

/// Result type for assignment operations
pub type Result<T> = std::result::Result<T, AssignError>;

/// Width and height of an assignment grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    width: usize,
    height: usize,
}

impl GridShape {
    /// Create a shape, rejecting empty grids
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AssignError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Whether the cell lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Row-major index of a cell
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        cell.y * self.width + cell.x
    }

    /// Cell at a row-major index
    #[inline]
    pub fn cell(&self, index: usize) -> Cell {
        Cell::new(index % self.width, index / self.width)
    }

    /// Orthogonal neighbours inside the grid: left, right, up, down
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        let Cell { x, y } = cell;
        [
            (x > 0).then(|| Cell::new(x - 1, y)),
            (x + 1 < self.width).then(|| Cell::new(x + 1, y)),
            (y > 0).then(|| Cell::new(x, y - 1)),
            (y + 1 < self.height).then(|| Cell::new(x, y + 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// All cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.cells()).map(move |i| Cell::new(i % width, i / width))
    }
}

/// A complete layout: one value per cell, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<T> {
    shape: GridShape,
    values: Vec<T>,
    score: f64,
}

impl<T> Assignment<T> {
    /// Shape of the grid this assignment covers
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Total adjacent-pair score of the layout
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Value placed at `cell`, if the cell is inside the grid
    pub fn get(&self, cell: Cell) -> Option<&T> {
        if self.shape.contains(cell) {
            self.values.get(self.shape.index(cell))
        } else {
            None
        }
    }

    /// Values in row-major order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterate `(cell, value)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> {
        self.shape.iter().zip(self.values.iter())
    }

    /// Consume the assignment, returning the row-major values
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

/// Configuration for the greedy assigner
#[derive(Debug, Clone)]
pub struct AssignConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Number of independent randomized attempts (at least 1)
    pub restarts: usize,
    /// Seed for reproducible results
    pub seed: u64,
    /// Show a progress bar over restarts
    pub verbose: bool,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            restarts: 5,
            seed: 1337,
            verbose: false,
        }
    }
}

/**
 * Greedy most-constrained-first assigner
 */
pub struct GreedyAssigner {
    shape: GridShape,
    restarts: usize,
    seed: u64,
    verbose: bool,
}

impl GreedyAssigner {
    /// Probability that a later cell with an equal neighbour count takes over
    const TIE_SWAP_PROBABILITY: f64 = 0.25;

    /// Create a new assigner with the given configuration
    pub fn new(config: AssignConfig) -> Result<Self> {
        let shape = GridShape::new(config.width, config.height)?;
        if config.restarts == 0 {
            return Err(AssignError::InvalidRestarts);
        }

        Ok(Self {
            shape,
            restarts: config.restarts,
            seed: config.seed,
            verbose: config.verbose,
        })
    }

    /// Grid shape this assigner fills
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /**
     * Lay out `candidates` on the grid, honouring `pins`
     *
     * `candidates.len()` must equal the cell count. Repeated values are
     * distinct tokens: each copy is placed once.
     */
    pub fn assign<T, F>(&self, candidates: &[T], score_fn: F, pins: &Pins<T>) -> Result<Assignment<T>>
    where
        T: Clone + PartialEq,
        F: Fn(&T, &T) -> f64,
    {
        self.validate(candidates, pins)?;

        let progress = self.progress_bar();
        let mut root = StdRng::seed_from_u64(self.seed);
        let mut best: Option<(Vec<T>, f64)> = None;

        for _ in 0..self.restarts {
            let mut rng = StdRng::seed_from_u64(root.gen::<u64>());
            let values = self.run_restart(&mut rng, candidates, &score_fn, pins)?;
            let score = total_score(&self.shape, &values, &score_fn);

            if best.as_ref().map_or(true, |(_, best_score)| improves(score, *best_score)) {
                best = Some((values, score));
            }

            if let (Some(pb), Some((_, best_score))) = (&progress, &best) {
                pb.set_message(format!("best score {:.1}", best_score));
                pb.inc(1);
            }
        }

        let (values, score) = best.ok_or(AssignError::InvalidRestarts)?;

        if let Some(pb) = &progress {
            pb.finish_with_message(format!("best score {:.1}", score));
        }

        Ok(Assignment {
            shape: self.shape,
            values,
            score,
        })
    }

    /**
     * Reject malformed input before any restart runs
     *
     * Pins are checked in cell order against a scratch copy of the palette so
     * that a value pinned twice must also appear twice.
     */
    fn validate<T: Clone + PartialEq>(&self, candidates: &[T], pins: &Pins<T>) -> Result<()> {
        if candidates.len() != self.shape.cells() {
            return Err(AssignError::CandidateCountMismatch {
                expected: self.shape.cells(),
                actual: candidates.len(),
            });
        }

        let mut pool = candidates.to_vec();
        for (&cell, value) in pins {
            if !self.shape.contains(cell) {
                return Err(AssignError::PinOutOfBounds {
                    x: cell.x,
                    y: cell.y,
                });
            }
            take_first(&mut pool, value).ok_or(AssignError::InvalidPin {
                x: cell.x,
                y: cell.y,
            })?;
        }

        Ok(())
    }

    fn progress_bar(&self) -> Option<ProgressBar> {
        if !self.verbose {
            return None;
        }

        let pb = ProgressBar::new(self.restarts as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} restarts {msg}")
        {
            pb.set_style(style.progress_chars("##-"));
        }
        Some(pb)
    }

    /**
     * Build one complete layout with a restart-local generator
     */
    fn run_restart<T, F>(&self, rng: &mut StdRng, candidates: &[T], score_fn: &F, pins: &Pins<T>) -> Result<Vec<T>>
    where
        T: Clone + PartialEq,
        F: Fn(&T, &T) -> f64,
    {
        let area = self.shape.cells();
        let mut remaining = candidates.to_vec();
        remaining.shuffle(rng);

        let mut slots: Vec<Option<T>> = vec![None; area];
        let mut filled = 0;

        for (&cell, value) in pins {
            let taken = take_first(&mut remaining, value).ok_or(AssignError::InvalidPin {
                x: cell.x,
                y: cell.y,
            })?;
            slots[self.shape.index(cell)] = Some(taken);
            filled += 1;
        }

        if filled == 0 {
            let start = rng.gen_range(0..area);
            if let Some(value) = remaining.pop() {
                slots[start] = Some(value);
                filled += 1;
            }
        }

        while filled < area {
            let Some(target) = self.most_constrained(&slots, rng) else {
                break;
            };
            let cell = self.shape.cell(target);

            let mut best_idx = 0;
            let mut best_score: Option<f64> = None;
            for (i, candidate) in remaining.iter().enumerate() {
                let mut score = 0.0;
                for neighbor in self.shape.neighbors(cell) {
                    if let Some(value) = &slots[self.shape.index(neighbor)] {
                        score += score_fn(candidate, value);
                    }
                }
                if best_score.map_or(true, |best| score > best) {
                    best_score = Some(score);
                    best_idx = i;
                }
            }

            slots[target] = Some(remaining.remove(best_idx));
            filled += 1;
        }

        Ok(slots.into_iter().flatten().collect())
    }

    /**
     * Pick the empty cell with the most filled neighbours
     *
     * Cells are scanned in row-major order. An equal count replaces the
     * current pick with probability `TIE_SWAP_PROBABILITY`, drawing once per
     * tie, so later cells are favoured less than a uniform choice would.
     */
    fn most_constrained<T>(&self, slots: &[Option<T>], rng: &mut StdRng) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;

        for (idx, slot) in slots.iter().enumerate() {
            if slot.is_some() {
                continue;
            }

            let count = self
                .shape
                .neighbors(self.shape.cell(idx))
                .filter(|&n| slots[self.shape.index(n)].is_some())
                .count();

            let replace = match best {
                None => true,
                Some((_, best_count)) => {
                    count > best_count
                        || (count == best_count && rng.gen_bool(Self::TIE_SWAP_PROBABILITY))
                }
            };
            if replace {
                best = Some((idx, count));
            }
        }

        best.map(|(idx, _)| idx)
    }
}

/// Whether `score` should replace `best`; a NaN best yields to any number
fn improves(score: f64, best: f64) -> bool {
    score > best || (best.is_nan() && !score.is_nan())
}

/// Remove and return the first entry equal to `value`
fn take_first<T: PartialEq>(pool: &mut Vec<T>, value: &T) -> Option<T> {
    let pos = pool.iter().position(|c| c == value)?;
    Some(pool.remove(pos))
}

/**
 * Sum `score_fn` over every orthogonally adjacent pair, each pair once
 *
 * `values` is row-major and must cover `shape`.
 */
pub fn total_score<T, F>(shape: &GridShape, values: &[T], score_fn: F) -> f64
where
    F: Fn(&T, &T) -> f64,
{
    let (width, height) = (shape.width(), shape.height());
    let mut score = 0.0;

    for y in 0..height {
        for x in 0..width {
            let a = &values[y * width + x];
            if x + 1 < width {
                score += score_fn(a, &values[y * width + x + 1]);
            }
            if y + 1 < height {
                score += score_fn(a, &values[(y + 1) * width + x]);
            }
        }
    }

    score
}

/**
 * Convenience function: assign with explicit shape, restarts, seed and pins
 */
pub fn assign<T, F>(
    shape: GridShape,
    candidates: &[T],
    score_fn: F,
    restarts: usize,
    seed: u64,
    pinned: Option<&Pins<T>>,
) -> Result<Assignment<T>>
where
    T: Clone + PartialEq,
    F: Fn(&T, &T) -> f64,
{
    let config = AssignConfig {
        width: shape.width(),
        height: shape.height(),
        restarts,
        seed,
        verbose: false,
    };
    let assigner = GreedyAssigner::new(config)?;
    let empty = Pins::new();
    assigner.assign(candidates, score_fn, pinned.unwrap_or(&empty))
}
