/**
 * Palettes and contrast scores
 *
 * Palettes are plain vectors sized to the grid they fill. Scores are
 * symmetric and higher means more contrast.
 */

use crate::canvas::Color;

/// Evenly spaced channel level `i` of `n` (0 and 255 at the ends)
fn level(i: usize, n: usize) -> u8 {
    if n <= 1 {
        return 0;
    }
    (255.0 * i as f64 / (n - 1) as f64).round() as u8
}

/// `n` evenly spaced gray levels from 0 to 255
pub fn gray_levels(n: usize) -> Vec<u8> {
    (0..n).map(|i| level(i, n)).collect()
}

/// Every gray level, 0 through 255
pub fn gray_ramp() -> Vec<u8> {
    (0..=255).collect()
}

/**
 * Every combination of evenly spaced channel levels
 *
 * Red varies slowest and blue fastest.
 */
pub fn rgb_cube(r_levels: usize, g_levels: usize, b_levels: usize) -> Vec<Color> {
    let mut palette = Vec::with_capacity(r_levels * g_levels * b_levels);
    for r in 0..r_levels {
        for g in 0..g_levels {
            for b in 0..b_levels {
                palette.push(Color::new(
                    level(r, r_levels),
                    level(g, g_levels),
                    level(b, b_levels),
                ));
            }
        }
    }
    palette
}

/// 256 colors: 8 red × 8 green × 4 blue levels
pub fn rgb_cube_256() -> Vec<Color> {
    rgb_cube(8, 8, 4)
}

/**
 * 16 colors for a 4×4 block favicon
 *
 * Red × green over {0, 85, 170, 255} with blue off. The cube lacks white, so
 * the last entry (yellow) becomes white; black is already first.
 */
pub fn block_palette_16() -> Vec<Color> {
    let mut palette = rgb_cube(4, 4, 1);
    if !palette.contains(&Color::WHITE) {
        if let Some(last) = palette.last_mut() {
            *last = Color::WHITE;
        }
    }
    if !palette.contains(&Color::BLACK) {
        if let Some(first) = palette.first_mut() {
            *first = Color::BLACK;
        }
    }
    palette
}

/// Black, white, red and cyan
pub fn block_palette_4() -> Vec<Color> {
    vec![
        Color::BLACK,
        Color::WHITE,
        Color::new(255, 0, 0),
        Color::new(0, 255, 255),
    ]
}

/// Absolute difference between two gray levels
pub fn abs_diff(a: &u8, b: &u8) -> f64 {
    a.abs_diff(*b) as f64
}

/// Squared Euclidean distance in RGB
pub fn rgb_distance_sq(a: &Color, b: &Color) -> f64 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_levels() {
        assert_eq!(gray_levels(4), vec![0, 85, 170, 255]);
        assert_eq!(gray_levels(1), vec![0]);
        assert!(gray_levels(0).is_empty());

        let sixteen = gray_levels(16);
        assert_eq!(sixteen.len(), 16);
        assert_eq!(sixteen[0], 0);
        assert_eq!(sixteen[1], 17);
        assert_eq!(sixteen[15], 255);
    }

    #[test]
    fn test_gray_ramp() {
        let ramp = gray_ramp();
        assert_eq!(ramp.len(), 256);
        assert_eq!(ramp[0], 0);
        assert_eq!(ramp[255], 255);
    }

    #[test]
    fn test_rgb_cube_256() {
        let palette = rgb_cube_256();
        assert_eq!(palette.len(), 256);
        assert_eq!(palette[0], Color::BLACK);
        assert_eq!(palette[255], Color::WHITE);
        // Blue varies fastest: 0, 85, 170, 255
        assert_eq!(palette[1], Color::new(0, 0, 85));
        assert_eq!(palette[4], Color::new(0, 36, 0));

        let mut unique = palette.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn test_block_palette_16() {
        let palette = block_palette_16();
        assert_eq!(palette.len(), 16);
        assert_eq!(palette[0], Color::BLACK);
        assert_eq!(palette[15], Color::WHITE);
        assert!(!palette.contains(&Color::new(255, 255, 0)));
    }

    #[test]
    fn test_block_palette_4() {
        let palette = block_palette_4();
        assert_eq!(palette.len(), 4);
        assert!(palette.contains(&Color::BLACK));
        assert!(palette.contains(&Color::WHITE));
    }

    #[test]
    fn test_scores() {
        assert_eq!(abs_diff(&0, &255), 255.0);
        assert_eq!(abs_diff(&200, &50), abs_diff(&50, &200));

        assert_eq!(rgb_distance_sq(&Color::BLACK, &Color::WHITE), 3.0 * 255.0 * 255.0);
        assert_eq!(rgb_distance_sq(&Color::new(1, 2, 3), &Color::new(4, 6, 3)), 25.0);
        assert_eq!(rgb_distance_sq(&Color::WHITE, &Color::WHITE), 0.0);
    }
}
