/**
 * Canvas Module
 *
 * An owned RGB pixel buffer with explicit dimensions. Every read and write is
 * bounds-checked and reports an error instead of wrapping or panicking.
 * Canvases are painted cell by cell from an assignment and saved as PNG.
 */

use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;
use thiserror::Error;

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Color {
    /// Pure black
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// Pure white
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Create a new color from RGB values
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray with all three channels set to `v`
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Parse a hex color string (e.g., "#FF0000" or "FF0000")
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return Err(CanvasError::InvalidHexColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| CanvasError::InvalidHexColor(hex.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error types for canvas operations
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Failed to encode or write the image
    #[error("Failed to save image: {0}")]
    ImageSaveError(#[from] image::ImageError),

    /// Invalid hex color string format
    #[error("Invalid hex color: {0}")]
    InvalidHexColor(String),

    /// Width or height is zero, or the canvas is too large to allocate
    #[error("Canvas dimensions must be positive and at most {} pixels", Canvas::MAX_PIXELS)]
    InvalidDimensions,

    /// Pixel access outside the canvas
    #[error("Pixel ({x}, {y}) is outside the {width}×{height} canvas")]
    OutOfBounds {
        /// Requested column
        x: u32,
        /// Requested row
        y: u32,
        /// Canvas width
        width: u32,
        /// Canvas height
        height: u32,
    },
}

/// Result type for canvas operations
pub type Result<T> = std::result::Result<T, CanvasError>;

/// Owned 2D pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Largest pixel count a canvas may hold
    pub const MAX_PIXELS: usize = 1 << 26;

    /// Create a canvas filled with one color
    pub fn new(width: u32, height: u32, fill: Color) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions);
        }
        let area = (width as usize)
            .checked_mul(height as usize)
            .filter(|&area| area <= Self::MAX_PIXELS)
            .ok_or(CanvasError::InvalidDimensions)?;

        Ok(Self {
            width,
            height,
            pixels: vec![fill; area],
        })
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Read the pixel at `(x, y)`
    pub fn get(&self, x: u32, y: u32) -> Result<Color> {
        let offset = self.offset(x, y)?;
        Ok(self.pixels[offset])
    }

    /// Write the pixel at `(x, y)`
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> Result<()> {
        let offset = self.offset(x, y)?;
        self.pixels[offset] = color;
        Ok(())
    }

    /**
     * Fill a `w`×`h` block whose top-left pixel is `(x0, y0)`
     *
     * The whole block must fit; nothing is written otherwise. An empty block
     * still needs its origin on the canvas.
     */
    pub fn fill_block(&mut self, x0: u32, y0: u32, w: u32, h: u32, color: Color) -> Result<()> {
        self.offset(x0, y0)?;
        if w == 0 || h == 0 {
            return Ok(());
        }
        let x1 = x0.saturating_add(w - 1);
        let y1 = y0.saturating_add(h - 1);
        self.offset(x1, y1)?;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let offset = self.offset(x, y)?;
                self.pixels[offset] = color;
            }
        }
        Ok(())
    }

    /// Convert to an `image` RGB buffer
    pub fn to_rgb_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let color = self.pixels[y as usize * self.width as usize + x as usize];
            Rgb([color.r, color.g, color.b])
        })
    }

    /// Save as an image file; the format follows the extension (PNG)
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_rgb_image().save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let black = Color::from_hex("#000000").unwrap();
        assert_eq!(black, Color::BLACK);

        let white = Color::from_hex("#ffffff").unwrap();
        assert_eq!(white, Color::WHITE);

        let red = Color::from_hex("#ff0000").unwrap();
        assert_eq!(red, Color::new(255, 0, 0));

        // Without # prefix
        let blue = Color::from_hex("0000ff").unwrap();
        assert_eq!(blue, Color::new(0, 0, 255));

        // Case insensitivity
        let green = Color::from_hex("#00FF00").unwrap();
        assert_eq!(green, Color::new(0, 255, 0));
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#fffffff").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#ffé0f").is_err());
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::new(255, 136, 0).to_hex(), "#ff8800");
        assert_eq!(Color::from_hex("#AABBCC").unwrap().to_hex(), "#aabbcc");
    }

    #[test]
    fn test_color_gray() {
        assert_eq!(Color::gray(85), Color::new(85, 85, 85));
    }

    #[test]
    fn test_canvas_new() {
        let canvas = Canvas::new(16, 8, Color::WHITE).unwrap();
        assert_eq!(canvas.width(), 16);
        assert_eq!(canvas.height(), 8);
        assert_eq!(canvas.pixels().len(), 128);
        assert!(canvas.pixels().iter().all(|&c| c == Color::WHITE));

        assert!(matches!(Canvas::new(0, 8, Color::BLACK), Err(CanvasError::InvalidDimensions)));
    }

    #[test]
    fn test_get_set() {
        let mut canvas = Canvas::new(4, 4, Color::BLACK).unwrap();
        canvas.set(3, 2, Color::new(1, 2, 3)).unwrap();

        assert_eq!(canvas.get(3, 2).unwrap(), Color::new(1, 2, 3));
        assert_eq!(canvas.get(2, 3).unwrap(), Color::BLACK);
        assert_eq!(canvas.pixels()[2 * 4 + 3], Color::new(1, 2, 3));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut canvas = Canvas::new(4, 4, Color::BLACK).unwrap();

        assert!(matches!(
            canvas.get(4, 0),
            Err(CanvasError::OutOfBounds { x: 4, y: 0, width: 4, height: 4 })
        ));
        assert!(canvas.set(0, 4, Color::WHITE).is_err());
        assert!(canvas.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_fill_block() {
        let mut canvas = Canvas::new(4, 4, Color::BLACK).unwrap();
        canvas.fill_block(2, 2, 2, 2, Color::WHITE).unwrap();

        assert_eq!(canvas.get(2, 2).unwrap(), Color::WHITE);
        assert_eq!(canvas.get(3, 3).unwrap(), Color::WHITE);
        assert_eq!(canvas.get(1, 2).unwrap(), Color::BLACK);
        assert_eq!(canvas.pixels().iter().filter(|&&c| c == Color::WHITE).count(), 4);
    }

    #[test]
    fn test_fill_block_empty_checks_origin() {
        let mut canvas = Canvas::new(4, 4, Color::BLACK).unwrap();

        assert!(canvas.fill_block(1, 1, 0, 3, Color::WHITE).is_ok());
        assert!(matches!(
            canvas.fill_block(9, 0, 0, 0, Color::WHITE),
            Err(CanvasError::OutOfBounds { x: 9, y: 0, .. })
        ));
        assert!(canvas.fill_block(0, 4, 2, 0, Color::WHITE).is_err());
        assert!(canvas.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_canvas_too_large() {
        assert!(matches!(
            Canvas::new(u32::MAX, u32::MAX, Color::BLACK),
            Err(CanvasError::InvalidDimensions)
        ));
        assert!(matches!(
            Canvas::new(1 << 14, 1 << 13, Color::BLACK),
            Err(CanvasError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_fill_block_overflow_writes_nothing() {
        let mut canvas = Canvas::new(4, 4, Color::BLACK).unwrap();

        assert!(canvas.fill_block(3, 3, 2, 2, Color::WHITE).is_err());
        assert!(canvas.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_to_rgb_image() {
        let mut canvas = Canvas::new(2, 2, Color::BLACK).unwrap();
        canvas.set(1, 0, Color::new(10, 20, 30)).unwrap();

        let img = canvas.to_rgb_image();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 0), &Rgb([10, 20, 30]));
        assert_eq!(img.get_pixel(0, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.png");

        let mut canvas = Canvas::new(3, 2, Color::gray(128)).unwrap();
        canvas.set(2, 1, Color::WHITE).unwrap();
        canvas.save(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 1), &Rgb([255, 255, 255]));
        assert_eq!(loaded.get_pixel(0, 0), &Rgb([128, 128, 128]));
    }
}
