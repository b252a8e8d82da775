use png::{BitDepth, ColorType};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("heightmap must be square, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("unsupported color mode {color_type:?} at {bit_depth:?} (need 8-bit RGB or RGBA)")]
    UnsupportedColorMode {
        color_type: ColorType,
        bit_depth: BitDepth,
    },
    #[error("decoding PNG")]
    Decode(#[from] png::DecodingError),
    #[error("encoding PNG")]
    Encode(#[from] png::EncodingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed elevation map: {0}")]
    Parse(String),
}
