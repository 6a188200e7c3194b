use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::grid::{PixelGrid, Rgb};
use crate::image_pipeline::filters::check_unit_threshold;
use crate::image_pipeline::filters::greyscale::greyscale;

/// Maps every pixel to pure white if its grey level, scaled to `0..=1`, is
/// strictly greater than `threshold`, and to pure black otherwise.
pub fn binarize(grid: &PixelGrid, threshold: f32) -> Result<PixelGrid> {
    check_unit_threshold("binarization threshold", threshold)?;

    let grey = greyscale(grid);
    Ok(grey.map(|p| {
        if f32::from(p.r) / 255.0 > threshold {
            Rgb::WHITE
        } else {
            Rgb::BLACK
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::common::error::PipelineError;

    #[test]
    fn test_splits_on_threshold() {
        let grid = PixelGrid::from_pixels(
            4,
            1,
            vec![Rgb::grey(0), Rgb::grey(127), Rgb::grey(128), Rgb::new(255, 255, 0)],
        )
        .unwrap();
        let out = binarize(&grid, 0.5).unwrap();

        assert_eq!(out[(0, 0)], Rgb::BLACK);
        assert_eq!(out[(0, 1)], Rgb::BLACK);
        assert_eq!(out[(0, 2)], Rgb::WHITE);
        // luminance 226
        assert_eq!(out[(0, 3)], Rgb::WHITE);
    }

    #[test]
    fn test_equal_to_threshold_is_black() {
        let grid = PixelGrid::new(3, 3, Rgb::grey(128)).unwrap();
        let threshold = 128.0 / 255.0;

        let out = binarize(&grid, threshold).unwrap();
        assert!(out.pixels().iter().all(|&p| p == Rgb::BLACK));
    }

    #[test]
    fn test_extreme_thresholds() {
        let grid = PixelGrid::from_pixels(2, 1, vec![Rgb::BLACK, Rgb::WHITE]).unwrap();

        let low = binarize(&grid, 0.0).unwrap();
        assert_eq!(low.pixels(), &[Rgb::BLACK, Rgb::WHITE]);

        let high = binarize(&grid, 1.0).unwrap();
        assert_eq!(high.pixels(), &[Rgb::BLACK, Rgb::BLACK]);
    }

    #[test]
    fn test_threshold_out_of_range() {
        let grid = PixelGrid::new(1, 1, Rgb::WHITE).unwrap();
        for threshold in [-0.01, 1.01, f32::NAN] {
            assert!(matches!(
                binarize(&grid, threshold),
                Err(PipelineError::InvalidArgumentError(_))
            ));
        }
    }
}
