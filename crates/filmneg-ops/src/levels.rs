//! Levels: per-channel input/output clipping with gamma.
//!
//! A [`LevelsContainer`] holds five parallel parameter sets indexed by
//! [`Channel`]: luminosity, red, green, blue and alpha. Each set maps an input
//! sample through
//!
//! ```text
//! n   = clamp((s - lowInput) / (highInput - lowInput), 0, 1)
//! n   = n ^ (1 / gamma)
//! out = lowOutput + n * (highOutput - lowOutput)
//! ```
//!
//! A color sample goes through its own channel's curve first and then through
//! the luminosity curve. Alpha only uses its own curve.
//!
//! The curves are baked into one lookup table per sample offset before a
//! buffer is processed; see [`LevelsLut`].

use filmneg_core::{BitDepth, Channel, FilterAction, PixelBuffer, CHANNELS};
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::executor::ImageFilter;
use crate::parallel::map_samples;
use crate::progress::{FilterContext, FilterOutcome};
use crate::{OpsError, OpsResult};

/// Levels parameters for the five logical channels.
///
/// Bounds are in sample units of the buffer they are applied to (0..=255 or
/// 0..=65535). No range checks are made; degenerate values produce
/// degenerate curves rather than errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelsContainer {
    /// Low input bound per channel.
    pub low_input: [i32; Channel::COUNT],
    /// High input bound per channel.
    pub high_input: [i32; Channel::COUNT],
    /// Low output bound per channel.
    pub low_output: [i32; Channel::COUNT],
    /// High output bound per channel.
    pub high_output: [i32; Channel::COUNT],
    /// Gamma per channel.
    pub gamma: [f64; Channel::COUNT],
}

impl LevelsContainer {
    /// Parameters that leave every sample unchanged.
    pub fn identity(depth: BitDepth) -> Self {
        let max = depth.max_value() as i32;
        Self {
            low_input: [0; Channel::COUNT],
            high_input: [max; Channel::COUNT],
            low_output: [0; Channel::COUNT],
            high_output: [max; Channel::COUNT],
            gamma: [1.0; Channel::COUNT],
        }
    }

    /// Whether these are the identity parameters for `depth`.
    pub fn is_identity(&self, depth: BitDepth) -> bool {
        *self == Self::identity(depth)
    }

    /// Sets all five parameters of one channel.
    pub fn set_channel(
        &mut self,
        channel: Channel,
        low_input: i32,
        high_input: i32,
        low_output: i32,
        high_output: i32,
        gamma: f64,
    ) {
        let i = channel.index();
        self.low_input[i] = low_input;
        self.high_input[i] = high_input;
        self.low_output[i] = low_output;
        self.high_output[i] = high_output;
        self.gamma[i] = gamma;
    }

    /// Maps a normalized sample (0..1) through one channel's curve.
    ///
    /// The result is normalized again. NaN and infinities produced by
    /// degenerate parameters are passed through.
    pub fn curve(&self, channel: Channel, value: f64, max: f64) -> f64 {
        let j = channel.index();
        let low_in = self.low_input[j] as f64;
        let high_in = self.high_input[j] as f64;

        let mut inten = if self.high_input[j] != self.low_input[j] {
            (max * value - low_in) / (high_in - low_in)
        } else {
            max * value - low_in
        };
        inten = inten.clamp(0.0, 1.0);

        if self.gamma[j] != 0.0 {
            inten = inten.powf(1.0 / self.gamma[j]);
        }

        let low_out = self.low_output[j] as f64;
        let high_out = self.high_output[j] as f64;
        let out = if self.high_output[j] >= self.low_output[j] {
            low_out + inten * (high_out - low_out)
        } else {
            low_out - inten * (low_out - high_out)
        };
        out / max
    }

    /// Maps a sample value through the channel owning `offset` of a pixel.
    ///
    /// Color samples also pass through the luminosity curve.
    pub fn map_sample(&self, offset: usize, value: u32, depth: BitDepth) -> u32 {
        let Some(channel) = Channel::from_sample_offset(offset) else {
            return value;
        };
        let max = depth.max_f64();
        let mut v = self.curve(channel, value as f64 / max, max);
        if channel != Channel::Alpha {
            v = self.curve(Channel::Luminosity, v, max);
        }
        // NaN saturates to 0 here.
        let raw = (v * max + 0.5) as i64;
        depth.clamp(raw) as u32
    }

    /// Bakes the curves for `depth` into lookup tables.
    pub fn lut(&self, depth: BitDepth) -> LevelsLut {
        LevelsLut::new(self, depth)
    }
}

/// One lookup table per RGBA sample offset.
#[derive(Debug, Clone)]
pub struct LevelsLut {
    depth: BitDepth,
    tables: [Vec<u16>; CHANNELS],
}

impl LevelsLut {
    /// Builds the tables for every sample value of `depth`.
    pub fn new(levels: &LevelsContainer, depth: BitDepth) -> Self {
        trace!(bits = depth.bits(), "levels::lut");
        let build = |offset: usize| -> Vec<u16> {
            (0..depth.segments() as u32)
                .into_par_iter()
                .map(|v| levels.map_sample(offset, v, depth) as u16)
                .collect()
        };
        Self {
            depth,
            tables: [build(0), build(1), build(2), build(3)],
        }
    }

    /// Depth the tables were built for.
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Looks a sample up.
    #[inline]
    pub fn get(&self, offset: usize, value: u32) -> u32 {
        self.tables[offset][value as usize] as u32
    }

    /// Table for one sample offset.
    pub fn table(&self, offset: usize) -> &[u16] {
        &self.tables[offset]
    }
}

/// Applies a [`LevelsContainer`] to a whole buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelsFilter {
    levels: LevelsContainer,
}

impl LevelsFilter {
    /// Identifier stored in filter actions.
    pub const IDENTIFIER: &'static str = "filmneg:LevelsFilter";
    /// Current action format version.
    pub const VERSION: u32 = 1;
    /// Human readable name.
    pub const DISPLAY_NAME: &'static str = "Levels Adjust";

    /// Creates a filter for the given parameters.
    pub fn new(levels: LevelsContainer) -> Self {
        Self { levels }
    }

    /// The parameters in use.
    pub fn levels(&self) -> &LevelsContainer {
        &self.levels
    }

    /// Rebuilds a filter from a stored action.
    ///
    /// Missing keys read as zero.
    pub fn from_action(action: &FilterAction) -> OpsResult<Self> {
        if action.identifier != Self::IDENTIFIER {
            return Err(OpsError::action_mismatch(Self::IDENTIFIER, &action.identifier));
        }
        let mut levels = LevelsContainer::identity(BitDepth::U8);
        for i in 0..Channel::COUNT {
            levels.low_input[i] = action.int(&format!("lInput[{i}]")) as i32;
            levels.high_input[i] = action.int(&format!("hInput[{i}]")) as i32;
            levels.low_output[i] = action.int(&format!("lOutput[{i}]")) as i32;
            levels.high_output[i] = action.int(&format!("hOutput[{i}]")) as i32;
            levels.gamma[i] = action.double(&format!("gamma[{i}]"));
        }
        Ok(Self { levels })
    }
}

impl ImageFilter for LevelsFilter {
    fn name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    fn filter_image(&self, src: &PixelBuffer, ctx: &FilterContext) -> OpsResult<FilterOutcome> {
        trace!(width = src.width(), height = src.height(), "levels::filter_image");
        debug!(levels = ?self.levels, "Applying levels");
        let lut = self.levels.lut(src.bit_depth());
        map_samples(src, ctx, |c, v| lut.get(c, v))
    }

    fn filter_action(&self) -> FilterAction {
        let mut action = FilterAction::new(Self::IDENTIFIER, Self::VERSION)
            .with_display_name(Self::DISPLAY_NAME);
        let l = &self.levels;
        for i in 0..Channel::COUNT {
            action.add_parameter(format!("lInput[{i}]"), l.low_input[i]);
            action.add_parameter(format!("hInput[{i}]"), l.high_input[i]);
            action.add_parameter(format!("lOutput[{i}]"), l.low_output[i]);
            action.add_parameter(format!("hOutput[{i}]"), l.high_output[i]);
            action.add_parameter(format!("gamma[{i}]"), l.gamma[i]);
        }
        action
    }
}
