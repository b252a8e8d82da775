#![allow(dead_code)]

use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};
use png::{BitDepth, ColorType};
use rand::rngs::SmallRng;
use std::io::Write;
use rand::{Rng, SeedableRng};

/// Encodes raw samples as an in-memory PNG.
pub fn encode_png(
    width: u32,
    height: u32,
    color: ColorType,
    depth: BitDepth,
    data: &[u8],
) -> Vec<u8> {
    let mut out = vec![];
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if color == ColorType::Indexed {
            encoder.set_palette(vec![0, 0, 0, 255, 0, 0]);
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }
    out
}

pub fn encode_rgb8(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    encode_png(width, height, ColorType::Rgb, BitDepth::Eight, data)
}

pub fn encode_rgba8(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    encode_png(width, height, ColorType::Rgba, BitDepth::Eight, data)
}

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Random `width * height * samples` bytes
pub fn random_samples(rng: &mut impl Rng, width: u32, height: u32, samples: usize) -> Vec<u8> {
    (0..width as usize * height as usize * samples)
        .map(|_| rng.gen())
        .collect()
}

/// First sample of every pixel, row-major
pub fn reds(data: &[u8], samples: usize) -> Vec<u8> {
    data.iter().copied().step_by(samples).collect()
}

/// Adam7 (x0, y0, dx, dy) for each of the seven passes
const ADAM7: [(usize, usize, usize, usize); 7] = [
    (0, 0, 8, 8),
    (4, 0, 8, 8),
    (0, 4, 4, 8),
    (2, 0, 4, 4),
    (0, 2, 2, 4),
    (1, 0, 2, 2),
    (0, 1, 1, 2),
];

fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let mut crc = Crc::new();
    crc.update(kind);
    crc.update(data);
    out.extend_from_slice(&crc.sum().to_be_bytes());
}

/// Builds an Adam7 interlaced 8-bit RGB PNG by hand, since `png::Encoder`
/// only writes progressive images.
pub fn encode_adam7_rgb8(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    assert_eq!(data.len(), w * h * 3);

    // Every scanline uses filter type 0
    let mut raw = vec![];
    for &(x0, y0, dx, dy) in &ADAM7 {
        if x0 >= w || y0 >= h {
            continue;
        }
        for y in (y0..h).step_by(dy) {
            raw.push(0);
            for x in (x0..w).step_by(dx) {
                let px = (y * w + x) * 3;
                raw.extend_from_slice(&data[px..px + 3]);
            }
        }
    }

    let mut zlib = ZlibEncoder::new(vec![], Compression::default());
    zlib.write_all(&raw).unwrap();
    let idat = zlib.finish().unwrap();

    let mut ihdr = vec![];
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    // depth 8, truecolor, deflate, adaptive filtering, Adam7
    ihdr.extend_from_slice(&[8, 2, 0, 0, 1]);

    let mut out = b"\x89PNG\r\n\x1a\n".to_vec();
    write_chunk(&mut out, b"IHDR", &ihdr);
    write_chunk(&mut out, b"IDAT", &idat);
    write_chunk(&mut out, b"IEND", &[]);
    out
}
