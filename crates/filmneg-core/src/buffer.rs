//! Interleaved RGBA pixel buffer.
//!
//! [`PixelBuffer`] is the unit every filter consumes and produces. Pixels
//! are stored row-major, top to bottom, four samples each:
//!
//! ```text
//! Memory: [R G B A R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A R G B A ...]  <- Row 1
//! ```
//!
//! Samples are `u8` for 8-bit buffers and `u16` for 16-bit buffers; see
//! [`PixelData`].
//!
//! # Usage
//!
//! ```rust
//! use filmneg_core::{BitDepth, Color, PixelBuffer};
//!
//! let mut img = PixelBuffer::new(64, 32, BitDepth::U8).unwrap();
//! img.set_pixel(3, 4, Color::new(10, 20, 30, 255, false)).unwrap();
//! assert_eq!(img.pixel(3, 4).unwrap().green(), 20);
//! ```

use crate::color::Color;
use crate::error::{Error, Result};
use crate::format::BitDepth;

/// Samples per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Raw sample storage for either bit depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    /// 8-bit samples.
    U8(Vec<u8>),
    /// 16-bit samples.
    U16(Vec<u16>),
}

impl PixelData {
    /// Number of samples (not pixels).
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            PixelData::U8(v) => v.len(),
            PixelData::U16(v) => v.len(),
        }
    }

    /// Whether no samples are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth of the stored samples.
    #[inline]
    pub fn bit_depth(&self) -> BitDepth {
        match self {
            PixelData::U8(_) => BitDepth::U8,
            PixelData::U16(_) => BitDepth::U16,
        }
    }

    /// Zero-filled storage of `len` samples.
    fn zeroed(depth: BitDepth, len: usize) -> Self {
        match depth {
            BitDepth::U8 => PixelData::U8(vec![0; len]),
            BitDepth::U16 => PixelData::U16(vec![0; len]),
        }
    }

    /// Reads one sample widened to `u32`.
    #[inline]
    fn get(&self, index: usize) -> u32 {
        match self {
            PixelData::U8(v) => v[index] as u32,
            PixelData::U16(v) => v[index] as u32,
        }
    }
}

/// Owned RGBA image with a fixed bit depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: PixelData,
}

impl PixelBuffer {
    /// Creates a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero width or height, or
    /// when the sample count overflows `usize`.
    pub fn new(width: u32, height: u32, depth: BitDepth) -> Result<Self> {
        let len = sample_count(width, height)?;
        Ok(Self {
            width,
            height,
            data: PixelData::zeroed(depth, len),
        })
    }

    /// Wraps existing 8-bit samples.
    pub fn from_u8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_data(width, height, PixelData::U8(data))
    }

    /// Wraps existing 16-bit samples.
    pub fn from_u16(width: u32, height: u32, data: Vec<u16>) -> Result<Self> {
        Self::from_data(width, height, PixelData::U16(data))
    }

    /// Wraps existing samples of either depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data` doesn't hold exactly
    /// `width * height * 4` samples.
    pub fn from_data(width: u32, height: u32, data: PixelData) -> Result<Self> {
        let expected = sample_count(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a buffer where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let len = sample_count(width, height)?;
        let [r, g, b, a] = color.to_array();
        let data = match color.bit_depth() {
            BitDepth::U8 => {
                let px = [r, g, b, a].map(|v| v.clamp(0, 255) as u8);
                PixelData::U8(px.iter().copied().cycle().take(len).collect())
            }
            BitDepth::U16 => {
                let px = [r, g, b, a].map(|v| v.clamp(0, 65535) as u16);
                PixelData::U16(px.iter().copied().cycle().take(len).collect())
            }
        };
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A zero-filled buffer with the same size and depth.
    pub fn empty_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: PixelData::zeroed(self.bit_depth(), self.data.len()),
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Samples per row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Sample depth.
    #[inline]
    pub fn bit_depth(&self) -> BitDepth {
        self.data.bit_depth()
    }

    /// Whether samples are 16-bit.
    #[inline]
    pub fn sixteen_bit(&self) -> bool {
        self.bit_depth().is_sixteen_bit()
    }

    /// Maximum sample value (255 or 65535).
    #[inline]
    pub fn max_value(&self) -> u32 {
        self.bit_depth().max_value()
    }

    /// Raw samples.
    #[inline]
    pub fn data(&self) -> &PixelData {
        &self.data
    }

    /// Raw samples, mutable.
    #[inline]
    pub fn data_mut(&mut self) -> &mut PixelData {
        &mut self.data
    }

    /// Consumes the buffer, returning its samples.
    #[inline]
    pub fn into_data(self) -> PixelData {
        self.data
    }

    /// 8-bit samples, if this is an 8-bit buffer.
    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.data {
            PixelData::U8(v) => Some(v),
            PixelData::U16(_) => None,
        }
    }

    /// 16-bit samples, if this is a 16-bit buffer.
    pub fn as_u16(&self) -> Option<&[u16]> {
        match &self.data {
            PixelData::U16(v) => Some(v),
            PixelData::U8(_) => None,
        }
    }

    #[inline]
    fn index_of(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Reads one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Result<Color> {
        let i = self.index_of(x, y)?;
        Ok(Color::new(
            self.data.get(i) as i32,
            self.data.get(i + 1) as i32,
            self.data.get(i + 2) as i32,
            self.data.get(i + 3) as i32,
            self.sixteen_bit(),
        ))
    }

    /// Reads one pixel, clamping the coordinates to the image.
    pub fn pixel_clamped(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Color::new(
            self.data.get(i) as i32,
            self.data.get(i + 1) as i32,
            self.data.get(i + 2) as i32,
            self.data.get(i + 3) as i32,
            self.sixteen_bit(),
        )
    }

    /// Writes one pixel. Samples are clamped to the buffer's range.
    ///
    /// # Errors
    ///
    /// Fails on out-of-bounds coordinates or a color of a different depth.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<()> {
        if color.bit_depth() != self.bit_depth() {
            return Err(Error::bit_depth_mismatch(self.bit_depth(), color.bit_depth()));
        }
        let i = self.index_of(x, y)?;
        let samples = color.to_array();
        match &mut self.data {
            PixelData::U8(v) => {
                for (dst, s) in v[i..i + CHANNELS].iter_mut().zip(samples) {
                    *dst = s.clamp(0, 255) as u8;
                }
            }
            PixelData::U16(v) => {
                for (dst, s) in v[i..i + CHANNELS].iter_mut().zip(samples) {
                    *dst = s.clamp(0, 65535) as u16;
                }
            }
        }
        Ok(())
    }

    /// Checks that `other` has the same dimensions and depth.
    pub fn ensure_same_layout(&self, other: &PixelBuffer) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(self.dimensions(), other.dimensions()));
        }
        if self.bit_depth() != other.bit_depth() {
            return Err(Error::bit_depth_mismatch(self.bit_depth(), other.bit_depth()));
        }
        Ok(())
    }
}

/// Validates dimensions and returns `width * height * 4`.
fn sample_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "image dimensions overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroed() {
        let img = PixelBuffer::new(4, 3, BitDepth::U16).unwrap();
        assert_eq!(img.data().len(), 4 * 3 * 4);
        assert!(img.sixteen_bit());
        assert_eq!(img.pixel(3, 2).unwrap().to_array(), [0; 4]);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(PixelBuffer::new(0, 10, BitDepth::U8).is_err());
        assert!(PixelBuffer::from_u8(10, 0, vec![]).is_err());
    }

    #[test]
    fn test_sample_count_checked() {
        let err = PixelBuffer::from_u8(2, 2, vec![0; 15]).unwrap_err();
        assert!(err.to_string().contains("expected 16 samples"));
    }

    #[test]
    fn test_filled_and_read_back() {
        let c = Color::new(128, 64, 32, 255, false);
        let img = PixelBuffer::filled(5, 5, c).unwrap();
        assert_eq!(img.pixel(4, 4).unwrap(), c);
        assert_eq!(img.as_u8().unwrap()[..4], [128, 64, 32, 255]);
    }

    #[test]
    fn test_set_pixel_depth_checked() {
        let mut img = PixelBuffer::new(2, 2, BitDepth::U8).unwrap();
        assert!(img.set_pixel(0, 0, Color::white(true)).is_err());
        assert!(img.set_pixel(2, 0, Color::white(false)).unwrap_err().is_bounds_error());
        img.set_pixel(1, 1, Color::white(false)).unwrap();
        assert_eq!(img.pixel(1, 1).unwrap(), Color::white(false));
    }

    #[test]
    fn test_pixel_clamped() {
        let mut img = PixelBuffer::new(2, 2, BitDepth::U8).unwrap();
        img.set_pixel(1, 1, Color::new(9, 9, 9, 9, false)).unwrap();
        assert_eq!(img.pixel_clamped(7, 7).red(), 9);
    }

    #[test]
    fn test_layout_mismatch() {
        let a = PixelBuffer::new(2, 2, BitDepth::U8).unwrap();
        let b = PixelBuffer::new(2, 2, BitDepth::U16).unwrap();
        let c = PixelBuffer::new(3, 2, BitDepth::U8).unwrap();
        assert!(a.ensure_same_layout(&a.empty_like()).is_ok());
        assert!(a.ensure_same_layout(&b).is_err());
        assert!(a.ensure_same_layout(&c).is_err());
    }
}
