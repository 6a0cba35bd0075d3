//! Sample bit depth.
//!
//! Buffers hold either 8-bit or 16-bit unsigned samples. The depth decides
//! the numeric range every tone operation works in: `0..=255` or
//! `0..=65535`.
//!
//! ```rust
//! use filmneg_core::BitDepth;
//!
//! let depth = BitDepth::from_sixteen_bit(true);
//! assert_eq!(depth.max_value(), 65535);
//! assert_eq!(depth.segments(), 65536);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bit depth of a pixel buffer or color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BitDepth {
    /// 8-bit unsigned integer samples [0, 255].
    #[default]
    U8,
    /// 16-bit unsigned integer samples [0, 65535].
    U16,
}

impl BitDepth {
    /// Maps the classic "sixteen bit" flag onto a depth.
    #[inline]
    pub const fn from_sixteen_bit(sixteen_bit: bool) -> Self {
        if sixteen_bit { Self::U16 } else { Self::U8 }
    }

    /// Whether this is the 16-bit depth.
    #[inline]
    pub const fn is_sixteen_bit(&self) -> bool {
        matches!(self, Self::U16)
    }

    /// Number of bits per sample.
    #[inline]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
        }
    }

    /// Maximum representable sample value.
    #[inline]
    pub const fn max_value(&self) -> u32 {
        match self {
            Self::U8 => 255,
            Self::U16 => 65535,
        }
    }

    /// Maximum sample value as `f64`, for tone math.
    #[inline]
    pub fn max_f64(&self) -> f64 {
        self.max_value() as f64
    }

    /// Number of distinct sample values (LUT / histogram size).
    #[inline]
    pub const fn segments(&self) -> usize {
        self.max_value() as usize + 1
    }

    /// Bytes needed per sample.
    #[inline]
    pub const fn bytes_per_sample(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
        }
    }

    /// Bytes needed per RGBA pixel.
    #[inline]
    pub const fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_sample() * crate::buffer::CHANNELS
    }

    /// Clamps a value into this depth's sample range.
    #[inline]
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(0, self.max_value() as i64)
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(BitDepth::U8.max_value(), 255);
        assert_eq!(BitDepth::U16.max_value(), 65535);
        assert_eq!(BitDepth::U8.segments(), 256);
        assert_eq!(BitDepth::U16.bytes_per_pixel(), 8);
        assert_eq!(BitDepth::U8.bytes_per_pixel(), 4);
    }

    #[test]
    fn test_sixteen_bit_flag() {
        assert_eq!(BitDepth::from_sixteen_bit(false), BitDepth::U8);
        assert!(BitDepth::from_sixteen_bit(true).is_sixteen_bit());
    }

    #[test]
    fn test_clamp() {
        assert_eq!(BitDepth::U8.clamp(-4), 0);
        assert_eq!(BitDepth::U8.clamp(300), 255);
        assert_eq!(BitDepth::U16.clamp(300), 300);
    }
}
