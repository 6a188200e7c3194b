use crate::image_pipeline::common::grid::{PixelGrid, Rgb};

/// Perceived brightness `0.3 R + 0.59 G + 0.11 B`, truncated.
///
/// Evaluated in integer hundredths so a grey pixel maps exactly to itself.
pub fn luminance(pixel: Rgb) -> u8 {
    let weighted = 30 * u32::from(pixel.r) + 59 * u32::from(pixel.g) + 11 * u32::from(pixel.b);
    // At most 100 * 255, so the quotient fits in a u8.
    (weighted / 100) as u8
}

/// Replaces every pixel by its luminance, written to all three channels.
pub fn greyscale(grid: &PixelGrid) -> PixelGrid {
    grid.map(|p| Rgb::grey(luminance(p)))
}
