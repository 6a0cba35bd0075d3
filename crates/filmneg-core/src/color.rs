//! Single RGBA sample quadruple.
//!
//! [`Color`] carries integer samples plus the bit depth they belong to. It is
//! used for measured white points and for per-pixel reads out of a
//! [`PixelBuffer`](crate::PixelBuffer).
//!
//! Samples are stored as `i32` so intermediate sums (e.g. averaging a 2x2
//! block with [`Color::blend_add`]) never overflow the sample type.

use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::format::BitDepth;

/// An RGBA color value tagged with its bit depth.
///
/// # Example
///
/// ```rust
/// use filmneg_core::{Channel, Color};
///
/// let white = Color::white(false);
/// assert_eq!(white.red(), 255);
/// assert_eq!(white.component(Channel::Alpha), Some(255));
/// assert_eq!(white.component(Channel::Luminosity), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    red: i32,
    green: i32,
    blue: i32,
    alpha: i32,
    sixteen_bit: bool,
}

impl Color {
    /// Creates a color from raw samples.
    #[inline]
    pub const fn new(red: i32, green: i32, blue: i32, alpha: i32, sixteen_bit: bool) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
            sixteen_bit,
        }
    }

    /// Opaque white at the given depth.
    #[inline]
    pub const fn white(sixteen_bit: bool) -> Self {
        let max = BitDepth::from_sixteen_bit(sixteen_bit).max_value() as i32;
        Self::new(max, max, max, max, sixteen_bit)
    }

    /// Opaque black at the given depth.
    #[inline]
    pub const fn black(sixteen_bit: bool) -> Self {
        let max = BitDepth::from_sixteen_bit(sixteen_bit).max_value() as i32;
        Self::new(0, 0, 0, max, sixteen_bit)
    }

    /// Red sample.
    #[inline]
    pub const fn red(&self) -> i32 {
        self.red
    }

    /// Green sample.
    #[inline]
    pub const fn green(&self) -> i32 {
        self.green
    }

    /// Blue sample.
    #[inline]
    pub const fn blue(&self) -> i32 {
        self.blue
    }

    /// Alpha sample.
    #[inline]
    pub const fn alpha(&self) -> i32 {
        self.alpha
    }

    /// Whether samples are in the 16-bit range.
    #[inline]
    pub const fn sixteen_bit(&self) -> bool {
        self.sixteen_bit
    }

    /// Bit depth of the samples.
    #[inline]
    pub const fn bit_depth(&self) -> BitDepth {
        BitDepth::from_sixteen_bit(self.sixteen_bit)
    }

    /// Maximum sample value for this color's depth.
    #[inline]
    pub const fn max_value(&self) -> i32 {
        self.bit_depth().max_value() as i32
    }

    /// Sets the red sample.
    #[inline]
    pub fn set_red(&mut self, value: i32) {
        self.red = value;
    }

    /// Sets the green sample.
    #[inline]
    pub fn set_green(&mut self, value: i32) {
        self.green = value;
    }

    /// Sets the blue sample.
    #[inline]
    pub fn set_blue(&mut self, value: i32) {
        self.blue = value;
    }

    /// Sets the alpha sample.
    #[inline]
    pub fn set_alpha(&mut self, value: i32) {
        self.alpha = value;
    }

    /// Sets the depth flag without rescaling samples.
    #[inline]
    pub fn set_sixteen_bit(&mut self, sixteen_bit: bool) {
        self.sixteen_bit = sixteen_bit;
    }

    /// Sample of a physical channel; `None` for luminosity.
    #[inline]
    pub const fn component(&self, channel: Channel) -> Option<i32> {
        match channel {
            Channel::Luminosity => None,
            Channel::Red => Some(self.red),
            Channel::Green => Some(self.green),
            Channel::Blue => Some(self.blue),
            Channel::Alpha => Some(self.alpha),
        }
    }

    /// Samples in R, G, B, A order.
    #[inline]
    pub const fn to_array(&self) -> [i32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Adds another color's samples, unclamped.
    pub fn blend_add(&mut self, other: &Color) {
        self.red += other.red;
        self.green += other.green;
        self.blue += other.blue;
        self.alpha += other.alpha;
    }

    /// Scales every sample, truncating toward zero.
    pub fn multiply(&mut self, factor: f64) {
        self.red = (self.red as f64 * factor) as i32;
        self.green = (self.green as f64 * factor) as i32;
        self.blue = (self.blue as f64 * factor) as i32;
        self.alpha = (self.alpha as f64 * factor) as i32;
    }

    /// Clamps every sample into the valid range.
    pub fn clamp(&mut self) {
        let max = self.max_value();
        self.red = self.red.clamp(0, max);
        self.green = self.green.clamp(0, max);
        self.blue = self.blue.clamp(0, max);
        self.alpha = self.alpha.clamp(0, max);
    }

    /// Mean of several colors of the same depth.
    ///
    /// Returns `None` for an empty slice.
    pub fn average(colors: &[Color]) -> Option<Color> {
        let (first, rest) = colors.split_first()?;
        let mut acc = *first;
        for c in rest {
            acc.blend_add(c);
        }
        acc.multiply(1.0 / colors.len() as f64);
        Some(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_black() {
        assert_eq!(Color::white(true).to_array(), [65535; 4]);
        assert_eq!(Color::black(false).to_array(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_average_of_block() {
        let block = [
            Color::new(200, 100, 50, 255, false),
            Color::new(202, 102, 52, 255, false),
            Color::new(204, 104, 54, 255, false),
            Color::new(206, 106, 56, 255, false),
        ];
        let avg = Color::average(&block).unwrap();
        assert_eq!(avg.to_array(), [203, 103, 53, 255]);
        assert!(Color::average(&[]).is_none());
    }

    #[test]
    fn test_blend_add_does_not_clamp() {
        let mut c = Color::white(false);
        c.blend_add(&Color::white(false));
        assert_eq!(c.red(), 510);
        c.clamp();
        assert_eq!(c.red(), 255);
    }

    #[test]
    fn test_multiply_truncates() {
        let mut c = Color::new(3, 5, 7, 9, false);
        c.multiply(0.5);
        assert_eq!(c.to_array(), [1, 2, 3, 4]);
    }
}
