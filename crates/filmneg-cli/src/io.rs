//! PNG reading and writing.
//!
//! Everything is loaded as RGBA at the file's own depth: 8-bit files give
//! 8-bit buffers, 16-bit files 16-bit buffers. Palette and low bit depth
//! images are expanded to 8 bits; missing alpha is filled with opaque.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{bail, Context, Result};
use filmneg_core::{PixelBuffer, PixelData};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Reads a PNG file into an RGBA buffer.
pub fn read_png(path: &Path) -> Result<PixelBuffer> {
    trace!(path = %path.display(), "io::read_png");
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("Failed to decode: {}", path.display()))?;

    let buf_size = reader
        .output_buffer_size()
        .context("cannot determine output buffer size")?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    let bytes = &buf[..info.buffer_size()];

    let src_channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => bail!("unsupported PNG color type: {:?}", other),
    };

    let data = match info.bit_depth {
        png::BitDepth::Eight => PixelData::U8(to_rgba(bytes, src_channels, u8::MAX)),
        png::BitDepth::Sixteen => {
            let samples: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            PixelData::U16(to_rgba(&samples, src_channels, u16::MAX))
        }
        other => bail!("unsupported PNG bit depth: {:?}", other),
    };

    debug!(width = info.width, height = info.height, depth = ?info.bit_depth, "Loaded PNG");
    Ok(PixelBuffer::from_data(info.width, info.height, data)?)
}

/// Expands 1..4 channel samples to RGBA.
fn to_rgba<T: Copy>(samples: &[T], channels: usize, opaque: T) -> Vec<T> {
    samples
        .chunks_exact(channels)
        .flat_map(|px| match channels {
            1 => [px[0], px[0], px[0], opaque],
            2 => [px[0], px[0], px[0], px[1]],
            3 => [px[0], px[1], px[2], opaque],
            _ => [px[0], px[1], px[2], px[3]],
        })
        .collect()
}

/// Writes an RGBA buffer as PNG at the buffer's depth.
pub fn write_png(path: &Path, image: &PixelBuffer) -> Result<()> {
    trace!(path = %path.display(), "io::write_png");
    let file = File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_compression(png::Compression::default());

    let bytes: Vec<u8> = match image.data() {
        PixelData::U8(d) => {
            encoder.set_depth(png::BitDepth::Eight);
            d.clone()
        }
        PixelData::U16(d) => {
            encoder.set_depth(png::BitDepth::Sixteen);
            d.iter().flat_map(|v| v.to_be_bytes()).collect()
        }
    };

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    writer
        .write_image_data(&bytes)
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    writer
        .finish()
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmneg_core::Color;

    #[test]
    fn test_gray_expands() {
        assert_eq!(to_rgba(&[7u8, 9], 1, 255), vec![7, 7, 7, 255, 9, 9, 9, 255]);
        assert_eq!(to_rgba(&[7u16, 1], 2, 65535), vec![7, 7, 7, 1]);
    }

    #[test]
    fn test_png_round_trip_both_depths() {
        let dir = tempfile::tempdir().unwrap();
        for (name, color) in [
            ("a8.png", Color::new(10, 200, 30, 128, false)),
            ("a16.png", Color::new(1000, 60000, 300, 65535, true)),
        ] {
            let path = dir.path().join(name);
            let img = PixelBuffer::filled(5, 3, color).unwrap();
            write_png(&path, &img).unwrap();
            assert_eq!(read_png(&path).unwrap(), img);
        }
    }
}
