//! BMP codec module
//!
//! This module decodes and encodes uncompressed 24-bit BMP files and exposes
//! reader/writer traits so the batch pipeline can swap implementations.

mod header;
mod codec;
mod reader;
mod writer;
mod standard_bmp_reader;
mod standard_bmp_writer;

pub use header::{FileHeader, InfoHeader, row_stride};
pub use codec::{Bitmap, decode, decode_bitmap, encode, encode_bitmap};
pub use reader::BmpReader;
pub use writer::BmpWriter;
pub use standard_bmp_reader::StandardBmpReader;
pub use standard_bmp_writer::StandardBmpWriter;
