use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::grid::PixelGrid;

pub trait BmpReader {
    fn read_bmp(&self, data: &[u8]) -> Result<PixelGrid>;
}
