use crate::{ElevationMap, Error, Result};
use log::{debug, info, warn};
use png::{BitDepth, ColorType, Transformations};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to a heightmap's path to name its elevation map
pub const EMAP_SUFFIX: &str = ".emap";

/// Appends `suffix` to the whole path, keeping any existing extension.
pub fn append_suffix(path: impl AsRef<Path>, suffix: impl AsRef<OsStr>) -> PathBuf {
    let mut out = path.as_ref().as_os_str().to_owned();
    out.push(suffix);
    out.into()
}

/// `foo.png` -> `foo.png.emap`
pub fn emap_path(input: impl AsRef<Path>) -> PathBuf {
    append_suffix(input, EMAP_SUFFIX)
}

/// A PNG heightmap whose header has been read and validated. Rows are
/// decoded lazily, once, in order.
pub struct HeightmapDecoder<R: Read> {
    reader: png::Reader<R>,
    width: u32,
    stride: usize,
    interlaced: bool,
}

impl<R: Read> HeightmapDecoder<R> {
    /// Reads the PNG header, failing if the image is not a square 8-bit RGB(A) image.
    pub fn new(png: R) -> Result<Self> {
        let mut decoder = png::Decoder::new(png);
        decoder.set_transformations(Transformations::IDENTITY);
        let reader = decoder.read_info()?;

        let info = reader.info();
        let (width, height, interlaced) = (info.width, info.height, info.interlaced);
        let (color_type, bit_depth) = reader.output_color_type();
        debug!(
            "PNG header: {}x{} {:?} {:?}{}",
            width,
            height,
            color_type,
            bit_depth,
            if interlaced { " interlaced" } else { "" }
        );

        let stride = red_stride(width, height, color_type, bit_depth)?;

        Ok(Self {
            reader,
            width,
            stride,
            interlaced,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of samples per pixel (3 or 4)
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Streams the red channel of every row to `out` in `.emap` format.
    /// Returns the width written.
    pub fn write_emap(mut self, out: impl Write) -> Result<u32> {
        let mut out = BufWriter::new(out);
        let (width, stride) = (self.width as usize, self.stride);
        writeln!(out, "{}", width)?;

        let mut rows = 0;
        if self.interlaced {
            // Row streaming yields Adam7 passes here, so take the whole frame
            let mut buf = vec![0; self.reader.output_buffer_size()];
            let frame = self.reader.next_frame(&mut buf)?;
            buf.truncate(frame.buffer_size());
            for row in buf.chunks_exact(frame.line_size) {
                write_row(&mut out, red_samples(row, width, stride))?;
                rows += 1;
            }
        } else {
            while let Some(row) = self.reader.next_row()? {
                write_row(&mut out, red_samples(row.data(), width, stride))?;
                rows += 1;
            }
        }
        debug!("wrote {} rows", rows);

        out.flush()?;
        Ok(self.width)
    }
}

/// Checks the structural assumptions on a heightmap and returns the sample
/// stride to step over to reach each pixel's red value.
fn red_stride(
    width: u32,
    height: u32,
    color_type: ColorType,
    bit_depth: BitDepth,
) -> Result<usize> {
    if width != height {
        return Err(Error::InvalidDimensions { width, height });
    }

    match color_type {
        ColorType::Rgb | ColorType::Rgba if bit_depth == BitDepth::Eight => {
            Ok(color_type.samples())
        }
        _ => Err(Error::UnsupportedColorMode {
            color_type,
            bit_depth,
        }),
    }
}

fn red_samples(row: &[u8], width: usize, stride: usize) -> impl Iterator<Item = u8> + '_ {
    row.iter().copied().step_by(stride).take(width)
}

/// Writes one line of elevations, each followed by a space.
fn write_row(out: &mut impl Write, heights: impl IntoIterator<Item = u8>) -> Result<()> {
    for h in heights {
        write!(out, "{} ", h)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Decodes a PNG heightmap from `png` and writes its elevation map to `out`.
pub fn convert(png: impl Read, out: impl Write) -> Result<u32> {
    HeightmapDecoder::new(png)?.write_emap(out)
}

/// Converts the heightmap at `input` into an elevation map at `output`.
///
/// The header is validated before `output` is created. If decoding or
/// writing fails afterwards, `output` is removed rather than left truncated.
pub fn convert_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<u32> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let decoder = HeightmapDecoder::new(BufReader::new(File::open(input)?))?;
    let (width, stride) = (decoder.width(), decoder.stride());

    let file = File::create(output)?;
    match decoder.write_emap(file) {
        Ok(_) => {
            info!(
                "{} -> {} ({}x{}, {} samples per pixel)",
                input.display(),
                output.display(),
                width,
                width,
                stride
            );
            Ok(width)
        }
        Err(e) => {
            if let Err(rm) = std::fs::remove_file(output) {
                warn!("Could not remove partial output {}: {}", output.display(), rm);
            }
            Err(e)
        }
    }
}

/// Writes an elevation map in `.emap` text format.
pub fn write_emap(out: impl Write, map: &ElevationMap) -> Result<()> {
    let mut out = BufWriter::new(out);
    writeln!(out, "{}", map.width)?;
    for row in map.rows() {
        write_row(&mut out, row.iter().copied())?;
    }
    out.flush()?;
    Ok(())
}

/// Parses `.emap` text. Any whitespace separates values; line breaks carry
/// no meaning.
pub fn parse_emap(text: &str) -> Result<ElevationMap> {
    let mut tokens = text.split_whitespace().enumerate();

    let (_, first) = tokens
        .next()
        .ok_or_else(|| Error::Parse("missing width".into()))?;
    let width: usize = first
        .parse()
        .map_err(|e| Error::Parse(format!("width {:?}: {}", first, e)))?;
    if width == 0 {
        return Err(Error::Parse("width must be positive".into()));
    }
    let len = width
        .checked_mul(width)
        .ok_or_else(|| Error::Parse(format!("width {} is too large", width)))?;

    let mut heights = Vec::with_capacity(len.min(text.len() / 2));
    for (pos, token) in tokens {
        if heights.len() == len {
            return Err(Error::Parse(format!(
                "unexpected {:?} at token {} after the {}x{} grid",
                token, pos, width, width
            )));
        }
        let h: u8 = token.parse().map_err(|e| {
            Error::Parse(format!("elevation {:?} at token {}: {}", token, pos, e))
        })?;
        heights.push(h);
    }

    if heights.len() != len {
        return Err(Error::Parse(format!(
            "expected {} elevations for width {}, found {}",
            len,
            width,
            heights.len()
        )));
    }

    Ok(ElevationMap { heights, width })
}

/// Load an elevation map from a file
pub fn load_emap(path: impl AsRef<Path>) -> Result<ElevationMap> {
    let text = std::fs::read_to_string(path)?;
    parse_emap(&text)
}

/// Writes the map as an 8-bit RGB PNG with every channel set to the elevation
pub fn write_heightmap_png(path: impl AsRef<Path>, map: &ElevationMap) -> Result<()> {
    let file = File::create(path)?;
    let ref mut w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(&mut *w, map.width as _, map.width as _);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let buf: Vec<u8> = map.heights.iter().flat_map(|&h| [h, h, h]).collect();

    writer.write_image_data(&buf)?;
    writer.finish()?;
    w.flush()?;

    Ok(())
}
