use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::grid::PixelGrid;

pub trait BmpWriter {
    fn write_bmp(&self, grid: &PixelGrid, output: &mut dyn Write) -> Result<()>;
}
