//! Negative-to-positive conversion.
//!
//! [`FilmFilter`] runs three filters back to back on one worker:
//!
//! | stage | filter | progress |
//! |-------|--------|----------|
//! | 1 | levels from [`FilmContainer::to_levels`] | 0..40 |
//! | 2 | color balance, multipliers 1.0, container gamma | 40..80 |
//! | 3 | invert | 80..100 |
//!
//! Each stage reads the previous stage's buffer and allocates its own.
//! Cancellation is checked between stages; a cancelled run returns
//! [`FilterOutcome::Cancelled`] and exposes no buffer.
//!
//! The container's bit depth must match the source buffer. Levels are
//! derived in the container's sample range, so a mismatch is rejected.

use filmneg_core::{BitDepth, Color, FilterAction, PixelBuffer};
use filmneg_ops::{
    ColorBalance, ColorBalanceFilter, FilterContext, FilterOutcome, ImageFilter, InvertFilter, LevelsFilter,
    OpsError, OpsResult,
};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::container::FilmContainer;
use crate::profile::FilmProfileKind;

/// Parameter keys of a film filter action.
pub mod keys {
    /// Film stock id.
    pub const CN_TYPE: &str = "CNType";
    /// Film stock display name, informational only.
    pub const PROFILE_NAME: &str = "ProfileName";
    /// Exposure multiplier.
    pub const EXPOSURE: &str = "Exposure";
    /// Output gamma.
    pub const GAMMA: &str = "Gamma";
    /// Per-channel gamma balancing flag.
    pub const APPLY_COLOR_BALANCE: &str = "ApplyColorBalance";
    /// White point red sample.
    pub const WHITE_POINT_RED: &str = "WhitePointRed";
    /// White point green sample.
    pub const WHITE_POINT_GREEN: &str = "WhitePointGreen";
    /// White point blue sample.
    pub const WHITE_POINT_BLUE: &str = "WhitePointBlue";
    /// White point alpha sample.
    pub const WHITE_POINT_ALPHA: &str = "WhitePointAlpha";
    /// White point depth flag.
    pub const WHITE_POINT_SIXTEEN_BIT: &str = "WhitePointSixteenBit";
}

/// Converts a scanned color negative into a positive.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmFilter {
    film: FilmContainer,
}

impl FilmFilter {
    /// Identifier stored in filter actions.
    pub const IDENTIFIER: &'static str = "filmneg:FilmFilter";
    /// Current action format version.
    pub const VERSION: u32 = 1;
    /// Human readable name.
    pub const DISPLAY_NAME: &'static str = "Color Negative Inversion";

    /// Creates a filter for the given parameters.
    pub fn new(film: FilmContainer) -> Self {
        Self { film }
    }

    /// The parameters in use.
    pub fn container(&self) -> &FilmContainer {
        &self.film
    }

    /// Rebuilds the parameters stored in an action.
    ///
    /// The stock id is authoritative; the profile name is ignored. Missing
    /// keys read as zero or `false`.
    pub fn read_parameters(action: &FilterAction) -> FilmContainer {
        let sixteen_bit = action.bool(keys::WHITE_POINT_SIXTEEN_BIT);
        let mut film = FilmContainer::new(FilmProfileKind::Neutral, action.double(keys::GAMMA), sixteen_bit);
        film.set_cn_type_id(action.int(keys::CN_TYPE));
        film.set_exposure(action.double(keys::EXPOSURE));
        film.set_apply_balance(action.bool(keys::APPLY_COLOR_BALANCE));
        film.set_white_point(Color::new(
            action.double(keys::WHITE_POINT_RED) as i32,
            action.double(keys::WHITE_POINT_GREEN) as i32,
            action.double(keys::WHITE_POINT_BLUE) as i32,
            action.double(keys::WHITE_POINT_ALPHA) as i32,
            sixteen_bit,
        ));
        film
    }

    /// Rebuilds a filter from a stored action.
    pub fn from_action(action: &FilterAction) -> OpsResult<Self> {
        if action.identifier != Self::IDENTIFIER {
            return Err(OpsError::action_mismatch(Self::IDENTIFIER, &action.identifier));
        }
        Ok(Self::new(Self::read_parameters(action)))
    }
}

impl ImageFilter for FilmFilter {
    fn name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    fn filter_image(&self, src: &PixelBuffer, ctx: &FilterContext) -> OpsResult<FilterOutcome> {
        trace!(width = src.width(), height = src.height(), "film::filter_image");

        let depth = BitDepth::from_sixteen_bit(self.film.sixteen_bit());
        if depth != src.bit_depth() {
            return Err(filmneg_core::Error::bit_depth_mismatch(depth, src.bit_depth()).into());
        }

        let levels = LevelsFilter::new(self.film.to_levels());
        let FilterOutcome::Completed(leveled) = levels.filter_image(src, &ctx.sub_range(0, 40))? else {
            return Ok(FilterOutcome::Cancelled);
        };
        if ctx.is_cancelled() {
            return Ok(FilterOutcome::Cancelled);
        }

        let balance = ColorBalanceFilter::new(ColorBalance::with_gamma(self.film.gamma()));
        let FilterOutcome::Completed(balanced) = balance.filter_image(&leveled, &ctx.sub_range(40, 80))? else {
            return Ok(FilterOutcome::Cancelled);
        };
        drop(leveled);
        if ctx.is_cancelled() {
            return Ok(FilterOutcome::Cancelled);
        }

        let outcome = InvertFilter.filter_image(&balanced, &ctx.sub_range(80, 100))?;
        if let FilterOutcome::Completed(_) = outcome {
            ctx.post_progress(100);
        }
        Ok(outcome)
    }

    fn filter_action(&self) -> FilterAction {
        let film = &self.film;
        let wp = film.white_point();
        let mut action = FilterAction::new(Self::IDENTIFIER, Self::VERSION)
            .with_display_name(Self::DISPLAY_NAME);
        action.add_parameter(keys::CN_TYPE, film.cn_type().id());
        action.add_parameter(keys::PROFILE_NAME, film.cn_type().name());
        action.add_parameter(keys::EXPOSURE, film.exposure());
        action.add_parameter(keys::GAMMA, film.gamma());
        action.add_parameter(keys::APPLY_COLOR_BALANCE, film.apply_balance());
        action.add_parameter(keys::WHITE_POINT_RED, wp.red() as f64);
        action.add_parameter(keys::WHITE_POINT_GREEN, wp.green() as f64);
        action.add_parameter(keys::WHITE_POINT_BLUE, wp.blue() as f64);
        action.add_parameter(keys::WHITE_POINT_ALPHA, wp.alpha() as f64);
        action.add_parameter(keys::WHITE_POINT_SIXTEEN_BIT, wp.sixteen_bit());
        action
    }
}
