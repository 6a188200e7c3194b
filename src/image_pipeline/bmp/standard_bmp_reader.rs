//! BMP reader backed by the in-crate 24-bit codec.

use crate::image_pipeline::bmp::codec;
use crate::image_pipeline::bmp::reader::BmpReader;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::grid::PixelGrid;

/// Reads uncompressed 24-bit BMP files.
///
/// Anything else (palette images, other bit depths, RLE or bitfield
/// compression) is rejected with `UnsupportedFormatError`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBmpReader;

impl BmpReader for StandardBmpReader {
    /// Decodes BMP bytes into a grid whose row 0 is the visual top row.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bmp_batch_rs::image_pipeline::{BmpReader, StandardBmpReader};
    ///
    /// let bytes = std::fs::read("image.bmp").unwrap();
    /// let grid = StandardBmpReader.read_bmp(&bytes).unwrap();
    /// println!("{}x{}", grid.width(), grid.height());
    /// ```
    fn read_bmp(&self, data: &[u8]) -> Result<PixelGrid> {
        codec::decode(data)
    }
}
