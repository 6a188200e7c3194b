use crate::image_pipeline::classify::types::ClassificationResult;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::common::grid::PixelGrid;
use crate::image_pipeline::filters::{check_unit_threshold, luminance};

/// Pixels with luminance at or below this value count as black.
pub const BLACK_LUMINANCE_LIMIT: u8 = 10;

/// Fraction of pixels whose luminance is at most `BLACK_LUMINANCE_LIMIT`.
///
/// Computed in `f32`, the type of the threshold, so 3 black pixels out of 10
/// compare equal to `0.3`. A `PixelGrid` is never empty; the check below only
/// guards the division.
pub fn black_fraction(grid: &PixelGrid) -> Result<f32> {
    if grid.is_empty() {
        return Err(PipelineError::InvalidArgumentError(
            "cannot classify an image with no pixels".to_string(),
        ));
    }

    let black = grid
        .pixels()
        .iter()
        .filter(|&&p| luminance(p) <= BLACK_LUMINANCE_LIMIT)
        .count();
    Ok(black as f32 / grid.len() as f32)
}

/// True when the fraction of black pixels is at least `threshold`.
pub fn is_nearly_black(grid: &PixelGrid, threshold: f32) -> Result<bool> {
    check_unit_threshold("classification threshold", threshold)?;
    Ok(black_fraction(grid)? >= threshold)
}

/// Classifies `grid` and tags the outcome with the image identifier.
pub fn classify(image: impl Into<String>, grid: &PixelGrid, threshold: f32) -> Result<ClassificationResult> {
    Ok(ClassificationResult {
        image: image.into(),
        nearly_black: is_nearly_black(grid, threshold)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::common::grid::Rgb;

    #[test]
    fn test_all_black_and_all_white() {
        let black = PixelGrid::new(10, 10, Rgb::BLACK).unwrap();
        let white = PixelGrid::new(10, 10, Rgb::WHITE).unwrap();

        assert!(is_nearly_black(&black, 0.5).unwrap());
        assert!(!is_nearly_black(&white, 0.5).unwrap());
    }

    #[test]
    fn test_black_limit_is_inclusive() {
        let grid = PixelGrid::from_pixels(2, 1, vec![Rgb::grey(10), Rgb::grey(11)]).unwrap();
        assert_eq!(black_fraction(&grid).unwrap(), 0.5);
    }

    #[test]
    fn test_fraction_at_threshold_is_nearly_black() {
        let mut grid = PixelGrid::new(2, 2, Rgb::WHITE).unwrap();
        grid[(0, 0)] = Rgb::BLACK;

        assert!(is_nearly_black(&grid, 0.25).unwrap());
        assert!(!is_nearly_black(&grid, 0.26).unwrap());
        assert!(is_nearly_black(&grid, 0.0).unwrap());
    }

    #[test]
    fn test_fraction_equal_to_decimal_threshold() {
        for (black, threshold) in [(1, 0.1f32), (3, 0.3), (6, 0.6), (7, 0.7), (9, 0.9)] {
            let mut grid = PixelGrid::new(10, 1, Rgb::WHITE).unwrap();
            for col in 0..black {
                grid[(0, col)] = Rgb::BLACK;
            }

            assert!(
                is_nearly_black(&grid, threshold).unwrap(),
                "{}/10 black should reach threshold {}",
                black,
                threshold
            );
            let above = f32::from_bits(threshold.to_bits() + 1);
            assert!(!is_nearly_black(&grid, above).unwrap());
        }
    }

    #[test]
    fn test_invalid_threshold() {
        let grid = PixelGrid::new(1, 1, Rgb::BLACK).unwrap();
        assert!(matches!(
            is_nearly_black(&grid, 1.5),
            Err(PipelineError::InvalidArgumentError(_))
        ));
        assert!(matches!(
            is_nearly_black(&grid, -1.0),
            Err(PipelineError::InvalidArgumentError(_))
        ));
    }

    #[test]
    fn test_classify_keeps_identifier() {
        let grid = PixelGrid::new(1, 1, Rgb::BLACK).unwrap();
        let result = classify("night.bmp", &grid, 0.9).unwrap();
        assert_eq!(result.image, "night.bmp");
        assert!(result.nearly_black);
    }
}
