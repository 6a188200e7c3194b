//! 24-bit uncompressed BMP decoding and encoding.

use tracing::debug;

use crate::image_pipeline::bmp::header::{
    BYTES_PER_PIXEL, FILE_HEADER_SIZE, FileHeader, InfoHeader, PIXEL_DATA_OFFSET, row_stride,
};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::common::grid::{PixelGrid, Rgb};

/// A decoded BMP file: its header records plus the pixels they describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    pub grid: PixelGrid,
}

/// Decodes a 24-bit BMP into a grid whose row 0 is the visual top row.
pub fn decode(data: &[u8]) -> Result<PixelGrid> {
    decode_bitmap(data).map(|bitmap| bitmap.grid)
}

/// Decodes a 24-bit BMP, keeping the parsed headers alongside the pixels.
pub fn decode_bitmap(data: &[u8]) -> Result<Bitmap> {
    debug!("Decoding BMP image, {} bytes", data.len());

    let file_header = FileHeader::parse(data)?;
    let info_header = InfoHeader::parse(data)?;
    info_header.validate()?;

    let (width, height) = info_header.dimensions();
    let offset = file_header.data_offset as usize;
    let headers_end = FILE_HEADER_SIZE + info_header.header_size as usize;
    if offset < headers_end {
        return Err(PipelineError::FormatError(format!(
            "pixel data offset {} points inside the {}-byte headers",
            offset, headers_end
        )));
    }

    let overflow = || PipelineError::FormatError(format!("dimensions {}x{} overflow", width, height));
    let stride = row_stride(width).ok_or_else(overflow)?;
    let expected = stride
        .checked_mul(height)
        .and_then(|len| len.checked_add(offset))
        .ok_or_else(overflow)?;
    if data.len() < expected {
        return Err(PipelineError::TruncatedDataError {
            expected,
            actual: data.len(),
        });
    }

    debug!(
        "BMP header: {}x{}, offset {}, stride {}, bottom_up={}",
        width,
        height,
        offset,
        stride,
        info_header.is_bottom_up()
    );

    let pixel_data = &data[offset..expected];
    let row_bytes = width * BYTES_PER_PIXEL;
    let mut pixels = Vec::with_capacity(width * height);
    for row in 0..height {
        let stored = if info_header.is_bottom_up() {
            height - 1 - row
        } else {
            row
        };
        let start = stored * stride;
        pixels.extend(
            pixel_data[start..start + row_bytes]
                .chunks_exact(BYTES_PER_PIXEL)
                .map(|bgr| Rgb::new(bgr[2], bgr[1], bgr[0])),
        );
    }

    let grid = PixelGrid::from_pixels(width, height, pixels)?;
    Ok(Bitmap {
        file_header,
        info_header,
        grid,
    })
}

/// Encodes a grid as a bottom-up 24-bit BMP with freshly generated headers.
pub fn encode(grid: &PixelGrid) -> Result<Vec<u8>> {
    let (file_header, info_header) = headers_for(grid)?;
    write_bitmap(&file_header, &info_header, grid)
}

/// Encodes a decoded bitmap, carrying over the reserved and resolution
/// fields of its headers. Size, offset and dimension fields are always
/// recomputed from the grid.
pub fn encode_bitmap(bitmap: &Bitmap) -> Result<Vec<u8>> {
    let (mut file_header, mut info_header) = headers_for(&bitmap.grid)?;
    file_header.reserved1 = bitmap.file_header.reserved1;
    file_header.reserved2 = bitmap.file_header.reserved2;
    info_header.x_pixels_per_meter = bitmap.info_header.x_pixels_per_meter;
    info_header.y_pixels_per_meter = bitmap.info_header.y_pixels_per_meter;
    write_bitmap(&file_header, &info_header, &bitmap.grid)
}

fn headers_for(grid: &PixelGrid) -> Result<(FileHeader, InfoHeader)> {
    let too_large = || {
        PipelineError::InvalidArgumentError(format!(
            "{}x{} grid is too large for a BMP file",
            grid.width(),
            grid.height()
        ))
    };

    let width = i32::try_from(grid.width()).map_err(|_| too_large())?;
    let height = i32::try_from(grid.height()).map_err(|_| too_large())?;
    let image_size = row_stride(grid.width())
        .and_then(|stride| stride.checked_mul(grid.height()))
        .ok_or_else(too_large)?;
    let file_size = image_size
        .checked_add(PIXEL_DATA_OFFSET)
        .and_then(|size| u32::try_from(size).ok())
        .ok_or_else(too_large)?;

    let file_header = FileHeader {
        file_size,
        reserved1: 0,
        reserved2: 0,
        data_offset: PIXEL_DATA_OFFSET as u32,
    };
    // file_size fits in u32, so image_size does too.
    let info_header = InfoHeader::for_dimensions(width, height, image_size as u32);
    Ok((file_header, info_header))
}

fn write_bitmap(file_header: &FileHeader, info_header: &InfoHeader, grid: &PixelGrid) -> Result<Vec<u8>> {
    let padding = info_header.image_size as usize / grid.height() - grid.width() * BYTES_PER_PIXEL;

    let mut out = Vec::with_capacity(file_header.file_size as usize);
    file_header.write_to(&mut out)?;
    info_header.write_to(&mut out)?;
    for row in grid.rows().rev() {
        for pixel in row {
            out.extend_from_slice(&[pixel.b, pixel.g, pixel.r]);
        }
        out.extend(std::iter::repeat_n(0u8, padding));
    }

    debug!(
        "BMP encoding complete: {}x{}, {} bytes",
        grid.width(),
        grid.height(),
        out.len()
    );
    Ok(out)
}
