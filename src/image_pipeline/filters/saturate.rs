use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::grid::{PixelGrid, Rgb};
use crate::image_pipeline::filters::check_saturation_factor;

fn scale_channel(value: u8, factor: f32) -> u8 {
    // inf * 0 is NaN, which `as u8` maps to 0.
    (f32::from(value) * factor).clamp(0.0, 255.0) as u8
}

/// Multiplies every channel by `factor`, clamping to `0..=255`.
///
/// `factor` must be non-negative; `1.0` returns an identical grid.
pub fn saturate(grid: &PixelGrid, factor: f32) -> Result<PixelGrid> {
    check_saturation_factor(factor)?;

    Ok(grid.map(|p| {
        Rgb::new(
            scale_channel(p.r, factor),
            scale_channel(p.g, factor),
            scale_channel(p.b, factor),
        )
    }))
}
