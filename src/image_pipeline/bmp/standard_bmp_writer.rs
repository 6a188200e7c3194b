use std::io::Write;
use tracing::debug;
use crate::image_pipeline::bmp::codec;
use crate::image_pipeline::bmp::writer::BmpWriter;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::grid::PixelGrid;

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBmpWriter;

impl BmpWriter for StandardBmpWriter {
    fn write_bmp(&self, grid: &PixelGrid, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding BMP image: {}x{}", grid.width(), grid.height());

        let buffer = codec::encode(grid)?;
        output.write_all(&buffer)?;

        Ok(())
    }
}
