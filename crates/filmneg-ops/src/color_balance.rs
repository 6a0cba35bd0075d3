//! Per-channel multiplier and shared gamma.
//!
//! Each color sample is scaled by its channel multiplier, clamped, then
//! raised to `1 / gamma` in normalized space. Alpha is only scaled.

use filmneg_core::{BitDepth, FilterAction, PixelBuffer, CHANNELS};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::executor::ImageFilter;
use crate::parallel::map_samples;
use crate::progress::{FilterContext, FilterOutcome};
use crate::{OpsError, OpsResult};

/// Smallest gamma used when building tables.
pub const MIN_GAMMA: f64 = 0.01;

/// Color balance parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBalance {
    /// Red multiplier.
    pub red: f64,
    /// Green multiplier.
    pub green: f64,
    /// Blue multiplier.
    pub blue: f64,
    /// Alpha multiplier.
    pub alpha: f64,
    /// Gamma applied to R, G and B after scaling.
    pub gamma: f64,
}

impl Default for ColorBalance {
    fn default() -> Self {
        Self {
            red: 1.0,
            green: 1.0,
            blue: 1.0,
            alpha: 1.0,
            gamma: 1.0,
        }
    }
}

impl ColorBalance {
    /// Multipliers of 1.0 with the given gamma.
    pub fn with_gamma(gamma: f64) -> Self {
        Self {
            gamma,
            ..Self::default()
        }
    }

    /// Whether this leaves every sample unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    fn multiplier(&self, offset: usize) -> f64 {
        match offset {
            0 => self.red,
            1 => self.green,
            2 => self.blue,
            _ => self.alpha,
        }
    }

    /// Maps one sample of the pixel slot `offset`.
    pub fn map_sample(&self, offset: usize, value: u32, depth: BitDepth) -> u32 {
        let max = depth.max_f64();
        let scaled = depth.clamp((value as f64 * self.multiplier(offset)).round() as i64);
        if offset >= 3 {
            return scaled as u32;
        }
        let gamma = if self.gamma < MIN_GAMMA { MIN_GAMMA } else { self.gamma };
        let v = ((scaled as f64 / max).powf(1.0 / gamma) * max).round() as i64;
        depth.clamp(v) as u32
    }

    /// Bakes one table per sample offset.
    pub fn lut(&self, depth: BitDepth) -> [Vec<u16>; CHANNELS] {
        trace!(bits = depth.bits(), gamma = self.gamma, "color_balance::lut");
        let build = |offset: usize| -> Vec<u16> {
            (0..depth.segments() as u32)
                .map(|v| self.map_sample(offset, v, depth) as u16)
                .collect()
        };
        [build(0), build(1), build(2), build(3)]
    }
}

/// Applies a [`ColorBalance`] to a whole buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBalanceFilter {
    settings: ColorBalance,
}

impl ColorBalanceFilter {
    /// Identifier stored in filter actions.
    pub const IDENTIFIER: &'static str = "filmneg:ColorBalanceFilter";
    /// Current action format version.
    pub const VERSION: u32 = 1;
    /// Human readable name.
    pub const DISPLAY_NAME: &'static str = "Color Balance";

    /// Creates a filter for the given parameters.
    pub fn new(settings: ColorBalance) -> Self {
        Self { settings }
    }

    /// The parameters in use.
    pub fn settings(&self) -> &ColorBalance {
        &self.settings
    }

    /// Rebuilds a filter from a stored action.
    pub fn from_action(action: &FilterAction) -> OpsResult<Self> {
        if action.identifier != Self::IDENTIFIER {
            return Err(OpsError::action_mismatch(Self::IDENTIFIER, &action.identifier));
        }
        Ok(Self::new(ColorBalance {
            red: action.double("red"),
            green: action.double("green"),
            blue: action.double("blue"),
            alpha: action.double("alpha"),
            gamma: action.double("gamma"),
        }))
    }
}

impl ImageFilter for ColorBalanceFilter {
    fn name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    fn filter_image(&self, src: &PixelBuffer, ctx: &FilterContext) -> OpsResult<FilterOutcome> {
        trace!(width = src.width(), height = src.height(), "color_balance::filter_image");
        debug!(settings = ?self.settings, "Applying color balance");
        let tables = self.settings.lut(src.bit_depth());
        map_samples(src, ctx, |c, v| tables[c][v as usize] as u32)
    }

    fn filter_action(&self) -> FilterAction {
        let s = &self.settings;
        let mut action = FilterAction::new(Self::IDENTIFIER, Self::VERSION)
            .with_display_name(Self::DISPLAY_NAME);
        action.add_parameter("red", s.red);
        action.add_parameter("green", s.green);
        action.add_parameter("blue", s.blue);
        action.add_parameter("alpha", s.alpha);
        action.add_parameter("gamma", s.gamma);
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmneg_core::Color;

    #[test]
    fn test_default_is_identity() {
        let cb = ColorBalance::default();
        assert!(cb.is_identity());
        for depth in [BitDepth::U8, BitDepth::U16] {
            let tables = cb.lut(depth);
            for t in &tables {
                assert!(t.iter().enumerate().all(|(i, &v)| i as u16 == v));
            }
        }
    }

    #[test]
    fn test_multiplier_clamps() {
        let cb = ColorBalance {
            red: 2.0,
            ..ColorBalance::default()
        };
        assert_eq!(cb.map_sample(0, 100, BitDepth::U8), 200);
        assert_eq!(cb.map_sample(0, 200, BitDepth::U8), 255);
        assert_eq!(cb.map_sample(1, 200, BitDepth::U8), 200);
    }

    #[test]
    fn test_gamma_on_color_only() {
        let cb = ColorBalance::with_gamma(2.0);
        // sqrt(64/255) * 255 = 127.75
        assert_eq!(cb.map_sample(0, 64, BitDepth::U8), 128);
        assert_eq!(cb.map_sample(3, 64, BitDepth::U8), 64);
    }

    #[test]
    fn test_tiny_gamma_clamped() {
        let cb = ColorBalance::with_gamma(0.0);
        assert_eq!(cb.map_sample(0, 255, BitDepth::U8), 255);
        assert_eq!(cb.map_sample(0, 200, BitDepth::U8), 0);
    }

    #[test]
    fn test_filter_and_action() {
        let filter = ColorBalanceFilter::new(ColorBalance::with_gamma(1.8));
        let src = PixelBuffer::filled(4, 4, Color::new(0, 255, 128, 255, false)).unwrap();
        let out = filter
            .filter_image(&src, &FilterContext::detached())
            .unwrap()
            .into_buffer()
            .unwrap();
        let px = out.pixel(0, 0).unwrap();
        assert_eq!(px.red(), 0);
        assert_eq!(px.green(), 255);
        assert!(px.blue() > 128);
        assert_eq!(px.alpha(), 255);

        let back = ColorBalanceFilter::from_action(&filter.filter_action()).unwrap();
        assert_eq!(back, filter);
    }
}
