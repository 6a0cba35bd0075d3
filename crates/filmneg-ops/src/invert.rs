//! Color inversion: `max - v` on R, G and B; alpha is copied.

use filmneg_core::{FilterAction, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::executor::ImageFilter;
use crate::parallel::map_samples;
use crate::progress::{FilterContext, FilterOutcome};
use crate::{OpsError, OpsResult};

/// Inverts the color samples of a buffer. Has no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvertFilter;

impl InvertFilter {
    /// Identifier stored in filter actions.
    pub const IDENTIFIER: &'static str = "filmneg:InvertFilter";
    /// Current action format version.
    pub const VERSION: u32 = 1;
    /// Human readable name.
    pub const DISPLAY_NAME: &'static str = "Invert Colors";

    /// Creates the filter.
    pub fn new() -> Self {
        Self
    }

    /// Rebuilds the filter from a stored action.
    pub fn from_action(action: &FilterAction) -> OpsResult<Self> {
        if action.identifier != Self::IDENTIFIER {
            return Err(OpsError::action_mismatch(Self::IDENTIFIER, &action.identifier));
        }
        Ok(Self)
    }
}

impl ImageFilter for InvertFilter {
    fn name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    fn filter_image(&self, src: &PixelBuffer, ctx: &FilterContext) -> OpsResult<FilterOutcome> {
        trace!(width = src.width(), height = src.height(), "invert::filter_image");
        let max = src.max_value();
        map_samples(src, ctx, |c, v| if c < 3 { max - v } else { v })
    }

    fn filter_action(&self) -> FilterAction {
        FilterAction::new(Self::IDENTIFIER, Self::VERSION).with_display_name(Self::DISPLAY_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmneg_core::{BitDepth, Color};

    fn invert(src: &PixelBuffer) -> PixelBuffer {
        InvertFilter
            .filter_image(src, &FilterContext::detached())
            .unwrap()
            .into_buffer()
            .unwrap()
    }

    #[test]
    fn test_invert_8bit() {
        let src = PixelBuffer::filled(3, 3, Color::new(0, 100, 255, 77, false)).unwrap();
        let out = invert(&src);
        assert_eq!(out.pixel(1, 1).unwrap().to_array(), [255, 155, 0, 77]);
    }

    #[test]
    fn test_invert_16bit() {
        let src = PixelBuffer::filled(2, 2, Color::new(0, 1000, 65535, 123, true)).unwrap();
        let out = invert(&src);
        assert_eq!(out.pixel(0, 0).unwrap().to_array(), [65535, 64535, 0, 123]);
    }

    #[test]
    fn test_involution() {
        for depth in [BitDepth::U8, BitDepth::U16] {
            let mut src = PixelBuffer::new(17, 11, depth).unwrap();
            let max = depth.max_value() as i32;
            for y in 0..11 {
                for x in 0..17 {
                    let v = ((x * 31 + y * 57) as i32 * 97) % (max + 1);
                    let c = Color::new(v, max - v, v / 2, (v * 3) % (max + 1), depth.is_sixteen_bit());
                    src.set_pixel(x, y, c).unwrap();
                }
            }
            assert_eq!(invert(&invert(&src)), src);
        }
    }

    #[test]
    fn test_action_has_no_params() {
        let action = InvertFilter.filter_action();
        assert!(action.matches(InvertFilter::IDENTIFIER, 1));
        assert!(action.is_empty());
        assert!(InvertFilter::from_action(&action).is_ok());
    }
}
