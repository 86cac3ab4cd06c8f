//! Error taxonomy for the decode and encode pipelines.
//!
//! One enum per phase, hand-written in the shape of `WriteError` in the
//! teacher's `vpx::expanded` module: a small `enum` implementing
//! `std::error::Error` + `Display`, with `From<io::Error>` where relevant.

use std::fmt::{self, Display, Formatter};
use std::io;

/// Errors raised while parsing a GIF container or decoding its LZW data.
#[derive(Debug)]
pub enum GifError {
    /// A read or skip would pass end-of-buffer.
    Truncated,
    /// The header magic is not `"GIF"`.
    NotGif,
    /// An image's width or height is 0.
    ImageAreaZero,
    /// `lzw_min_code_size` is outside `[2, 11]`.
    BadLzwMinCodeSize(u8),
    /// A top-level block starts with a byte other than `,`, `!`, `;`.
    BadBlockType(u8),
    /// An extension label is not one of `{0x01, 0xF9, 0xFE, 0xFF}`.
    BadExtension(u8),
    /// The trailer was reached before any Image Descriptor.
    NoImage,
    /// The first image has no LCT and no GCT is present.
    NoPalette,
    /// An LZW code exceeds the dictionary bound, or arrived illegally after CLEAR.
    BadCode,
    /// A decoded pixel index is `>= 2^palette_bits`.
    BadIndex,
}

impl Display for GifError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GifError::Truncated => write!(f, "unexpected end of GIF data"),
            GifError::NotGif => write!(f, "not a GIF file (bad magic)"),
            GifError::ImageAreaZero => write!(f, "image width or height is zero"),
            GifError::BadLzwMinCodeSize(n) => {
                write!(f, "invalid LZW minimum code size: {n}")
            }
            GifError::BadBlockType(b) => write!(f, "unexpected block type byte: {b:#04x}"),
            GifError::BadExtension(label) => {
                write!(f, "unsupported extension label: {label:#04x}")
            }
            GifError::NoImage => write!(f, "trailer reached before any image descriptor"),
            GifError::NoPalette => write!(f, "no global or local color table present"),
            GifError::BadCode => write!(f, "LZW code out of range for current dictionary"),
            GifError::BadIndex => write!(f, "pixel index exceeds palette size"),
        }
    }
}

impl std::error::Error for GifError {}

/// Errors raised while building a GIF from an RGB raster.
#[derive(Debug)]
pub enum EncodeError {
    /// The source raster has more than 256 distinct colors.
    TooManyColors(usize),
    /// The raster size is not a positive multiple of `width * 3`, or the
    /// inferred height exceeds 65535.
    BadRgbSize,
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::TooManyColors(n) => {
                write!(f, "source raster has {n} distinct colors, limit is 256")
            }
            EncodeError::BadRgbSize => write!(
                f,
                "RGB buffer length is not a positive multiple of width * 3, or height > 65535"
            ),
        }
    }
}

impl std::error::Error for EncodeError {}

/// IO-backed variant, for driver code that reads/writes files.
#[derive(Debug)]
pub enum DriverError {
    Io(io::Error),
    Decode(GifError),
    Encode(EncodeError),
}

impl Display for DriverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Io(e) => write!(f, "IO error: {e}"),
            DriverError::Decode(e) => write!(f, "decode error: {e}"),
            DriverError::Encode(e) => write!(f, "encode error: {e}"),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Io(e) => Some(e),
            DriverError::Decode(e) => Some(e),
            DriverError::Encode(e) => Some(e),
        }
    }
}

impl From<io::Error> for DriverError {
    fn from(e: io::Error) -> Self {
        DriverError::Io(e)
    }
}

impl From<GifError> for DriverError {
    fn from(e: GifError) -> Self {
        DriverError::Decode(e)
    }
}

impl From<EncodeError> for DriverError {
    fn from(e: EncodeError) -> Self {
        DriverError::Encode(e)
    }
}
