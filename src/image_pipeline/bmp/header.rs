//! BMP file and info header records
//!
//! Both records are decoded field by field as little-endian integers from a
//! cursor, so nothing depends on in-memory struct layout and a short buffer
//! surfaces as a truncation error at the read that ran out of bytes.

use std::io::{self, Cursor, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::image_pipeline::common::error::{PipelineError, Result};

pub const BMP_SIGNATURE: [u8; 2] = *b"BM";
pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;
/// Offset of the pixel array when both headers are packed back to back.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
pub const BITS_PER_PIXEL_RGB: u16 = 24;
pub const COMPRESSION_NONE: u32 = 0;
pub const BYTES_PER_PIXEL: usize = 3;

/// 72 DPI expressed in pixels per metre.
const DEFAULT_PIXELS_PER_METER: i32 = 2835;

fn truncated(expected: usize, actual: usize) -> impl Fn(io::Error) -> PipelineError {
    move |_| PipelineError::TruncatedDataError { expected, actual }
}

/// Length in bytes of one stored pixel row, rounded up to a multiple of 4.
///
/// Returns `None` if the computation overflows.
pub fn row_stride(width: usize) -> Option<usize> {
    width
        .checked_mul(BYTES_PER_PIXEL)?
        .checked_add(3)
        .map(|len| len & !3)
}

/// The fixed 14-byte record at the start of every BMP file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Total file size in bytes as recorded by the producer
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Absolute offset of the first pixel row
    pub data_offset: u32,
}

impl FileHeader {
    /// Parses the file header from the start of `data`.
    ///
    /// The signature is checked before anything else so that non-BMP input
    /// is always reported as a format error, however short it is.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < BMP_SIGNATURE.len() || data[..2] != BMP_SIGNATURE {
            return Err(PipelineError::FormatError(
                "missing 'BM' signature".to_string(),
            ));
        }
        let mut cursor = Cursor::new(&data[BMP_SIGNATURE.len()..]);
        let read = |cursor: &mut Cursor<&[u8]>| -> io::Result<Self> {
            Ok(Self {
                file_size: cursor.read_u32::<LittleEndian>()?,
                reserved1: cursor.read_u16::<LittleEndian>()?,
                reserved2: cursor.read_u16::<LittleEndian>()?,
                data_offset: cursor.read_u32::<LittleEndian>()?,
            })
        };
        read(&mut cursor).map_err(truncated(FILE_HEADER_SIZE, data.len()))
    }

    /// Writes the 14 header bytes, signature first.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&BMP_SIGNATURE)?;
        out.write_u32::<LittleEndian>(self.file_size)?;
        out.write_u16::<LittleEndian>(self.reserved1)?;
        out.write_u16::<LittleEndian>(self.reserved2)?;
        out.write_u32::<LittleEndian>(self.data_offset)
    }
}

/// The 40-byte BITMAPINFOHEADER record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    /// Declared size of this header; 40, or larger for V4/V5 headers
    pub header_size: u32,
    pub width: i32,
    /// Positive for bottom-up storage, negative for top-down
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    /// Parses the info header that follows the file header in `data`.
    ///
    /// Only the common 40-byte prefix is read; V4/V5 extensions are skipped.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        cursor.set_position(FILE_HEADER_SIZE as u64);
        let read = |cursor: &mut Cursor<&[u8]>| -> io::Result<Self> {
            Ok(Self {
                header_size: cursor.read_u32::<LittleEndian>()?,
                width: cursor.read_i32::<LittleEndian>()?,
                height: cursor.read_i32::<LittleEndian>()?,
                planes: cursor.read_u16::<LittleEndian>()?,
                bits_per_pixel: cursor.read_u16::<LittleEndian>()?,
                compression: cursor.read_u32::<LittleEndian>()?,
                image_size: cursor.read_u32::<LittleEndian>()?,
                x_pixels_per_meter: cursor.read_i32::<LittleEndian>()?,
                y_pixels_per_meter: cursor.read_i32::<LittleEndian>()?,
                colors_used: cursor.read_u32::<LittleEndian>()?,
                colors_important: cursor.read_u32::<LittleEndian>()?,
            })
        };
        let header = read(&mut cursor).map_err(truncated(PIXEL_DATA_OFFSET, data.len()))?;

        if (header.header_size as usize) < INFO_HEADER_SIZE {
            return Err(PipelineError::UnsupportedFormatError(format!(
                "{}-byte info header, need at least {}",
                header.header_size, INFO_HEADER_SIZE
            )));
        }
        Ok(header)
    }

    /// Rejects anything other than an uncompressed, single-plane, 24-bit image
    /// with non-zero dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.planes != 1 {
            return Err(PipelineError::FormatError(format!(
                "color plane count must be 1, got {}",
                self.planes
            )));
        }
        if self.bits_per_pixel != BITS_PER_PIXEL_RGB {
            return Err(PipelineError::UnsupportedFormatError(format!(
                "{} bits per pixel, only 24 is supported",
                self.bits_per_pixel
            )));
        }
        if self.compression != COMPRESSION_NONE {
            return Err(PipelineError::UnsupportedFormatError(format!(
                "compression method {}, only uncompressed is supported",
                self.compression
            )));
        }
        if self.width <= 0 || self.height == 0 {
            return Err(PipelineError::FormatError(format!(
                "invalid dimensions {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }

    /// Width and absolute height in pixels.
    pub fn dimensions(&self) -> (usize, usize) {
        (
            self.width.unsigned_abs() as usize,
            self.height.unsigned_abs() as usize,
        )
    }

    /// A bottom-up 24-bit header for a `width` x `height` image.
    pub fn for_dimensions(width: i32, height: i32, image_size: u32) -> Self {
        Self {
            header_size: INFO_HEADER_SIZE as u32,
            width,
            height,
            planes: 1,
            bits_per_pixel: BITS_PER_PIXEL_RGB,
            compression: COMPRESSION_NONE,
            image_size,
            x_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            y_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            colors_used: 0,
            colors_important: 0,
        }
    }

    /// Writes the 40-byte record. `header_size` is written as stored.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_u32::<LittleEndian>(self.header_size)?;
        out.write_i32::<LittleEndian>(self.width)?;
        out.write_i32::<LittleEndian>(self.height)?;
        out.write_u16::<LittleEndian>(self.planes)?;
        out.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        out.write_u32::<LittleEndian>(self.compression)?;
        out.write_u32::<LittleEndian>(self.image_size)?;
        out.write_i32::<LittleEndian>(self.x_pixels_per_meter)?;
        out.write_i32::<LittleEndian>(self.y_pixels_per_meter)?;
        out.write_u32::<LittleEndian>(self.colors_used)?;
        out.write_u32::<LittleEndian>(self.colors_important)
    }
}
