//! Film conversion parameters and the tone curves derived from them.
//!
//! [`FilmContainer`] holds what the user picks: film stock, exposure,
//! output gamma, the measured white point of the film base and whether to
//! balance the color layers against red. From those it derives the
//! [`LevelsContainer`] of the first conversion stage.
//!
//! # Derivation
//!
//! For each logical channel `c` with `max` the sample maximum:
//!
//! ```text
//! black(c)     = 10^-dmax(c)                 (0 for luminosity and alpha)
//! lowInput(c)  = black(c) * max * exposure
//! highInput(c) = white(c) * wp(c)            (white = max for L and A)
//! gamma(G|B)   = log10(bpc / wpc) / log10(bpr / wpr)
//! ```
//!
//! where `bp* = black * exposure` and `wp* = white / max` of the channel
//! (`*c`) and of red (`*r`).
//!
//! No parameter is validated. Zero exposure or a zero white point give
//! NaN or infinite gammas that flow into the curves unchanged.

use filmneg_core::{BitDepth, Channel, Color};
use filmneg_ops::{ColorBalance, LevelsContainer};
#[allow(unused_imports)]
use tracing::{debug, trace, warn};

use crate::profile::{FilmProfile, FilmProfileKind};

/// User-facing film conversion parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmContainer {
    cn_type: FilmProfileKind,
    profile: FilmProfile,
    gamma: f64,
    exposure: f64,
    sixteen_bit: bool,
    white_point: Color,
    apply_balance: bool,
}

impl Default for FilmContainer {
    fn default() -> Self {
        Self::new(FilmProfileKind::Neutral, 1.0, false)
    }
}

impl FilmContainer {
    /// Creates a container for `cn_type` with exposure 1.0, a white
    /// point of pure white and color balancing on.
    pub fn new(cn_type: FilmProfileKind, gamma: f64, sixteen_bit: bool) -> Self {
        Self {
            cn_type,
            profile: cn_type.profile(),
            gamma,
            exposure: 1.0,
            sixteen_bit,
            white_point: Color::white(sixteen_bit),
            apply_balance: true,
        }
    }

    /// Selects a built-in stock.
    pub fn set_cn_type(&mut self, cn_type: FilmProfileKind) {
        self.cn_type = cn_type;
        self.profile = cn_type.profile();
    }

    /// Selects a stock by persisted id, falling back to Neutral.
    pub fn set_cn_type_id(&mut self, id: i64) {
        let kind = FilmProfileKind::from_id(id).unwrap_or_else(|| {
            warn!(id, "Unknown film profile, using Neutral");
            FilmProfileKind::Neutral
        });
        self.set_cn_type(kind);
    }

    /// Selected stock.
    pub fn cn_type(&self) -> FilmProfileKind {
        self.cn_type
    }

    /// Calibration of the selected stock.
    pub fn profile(&self) -> &FilmProfile {
        &self.profile
    }

    /// Sets the output gamma.
    pub fn set_gamma(&mut self, gamma: f64) {
        self.gamma = gamma;
    }

    /// Output gamma.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Sets the exposure multiplier.
    pub fn set_exposure(&mut self, exposure: f64) {
        self.exposure = exposure;
    }

    /// Exposure multiplier.
    pub fn exposure(&self) -> f64 {
        self.exposure
    }

    /// Sets the depth the levels are derived for.
    pub fn set_sixteen_bit(&mut self, sixteen_bit: bool) {
        self.sixteen_bit = sixteen_bit;
    }

    /// Whether levels are derived for 16-bit buffers.
    pub fn sixteen_bit(&self) -> bool {
        self.sixteen_bit
    }

    /// Sets the measured film base color.
    pub fn set_white_point(&mut self, white_point: Color) {
        self.white_point = white_point;
    }

    /// Measured film base color.
    pub fn white_point(&self) -> Color {
        self.white_point
    }

    /// Enables per-channel gamma balancing against red.
    pub fn set_apply_balance(&mut self, apply: bool) {
        self.apply_balance = apply;
    }

    /// Whether per-channel gamma balancing is on.
    pub fn apply_balance(&self) -> bool {
        self.apply_balance
    }

    fn max_value(&self) -> f64 {
        BitDepth::from_sixteen_bit(self.sixteen_bit).max_f64()
    }

    /// Transmittance at the stock's max density; 0 for L and A.
    pub fn black_point_for_channel(&self, channel: Channel) -> f64 {
        if channel.is_color() {
            10f64.powf(-self.profile.dmax(channel))
        } else {
            0.0
        }
    }

    /// White point sample of a color channel; the maximum for L and A.
    pub fn white_point_for_channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Red | Channel::Green | Channel::Blue => {
                self.white_point.component(channel).unwrap_or_default() as f64
            }
            Channel::Luminosity | Channel::Alpha => self.max_value(),
        }
    }

    /// Balancing gamma; 1.0 except for green and blue.
    pub fn gamma_for_channel(&self, channel: Channel) -> f64 {
        if !matches!(channel, Channel::Green | Channel::Blue) {
            return 1.0;
        }
        let max = self.max_value();
        let bpc = self.black_point_for_channel(channel) * self.exposure;
        let wpc = self.white_point_for_channel(channel) / max;
        let bpr = self.black_point_for_channel(Channel::Red) * self.exposure;
        let wpr = self.white_point_for_channel(Channel::Red) / max;
        (bpc / wpc).log10() / (bpr / wpr).log10()
    }

    /// Levels of the first conversion stage.
    pub fn to_levels(&self) -> LevelsContainer {
        trace!(cn_type = %self.cn_type, sixteen_bit = self.sixteen_bit, "film::to_levels");
        let max = self.max_value();
        let mut levels = LevelsContainer::identity(BitDepth::from_sixteen_bit(self.sixteen_bit));
        for channel in Channel::ALL {
            let low_input = self.black_point_for_channel(channel) * max * self.exposure;
            let high_input = self.white_point_for_channel(channel) * self.profile.wp(channel);
            let gamma = if self.apply_balance {
                self.gamma_for_channel(channel)
            } else {
                1.0
            };
            levels.set_channel(channel, low_input as i32, high_input as i32, 0, max as i32, gamma);
        }
        debug!(cn_type = %self.cn_type, ?levels, "Derived film levels");
        levels
    }

    /// Color balance of the stock with gamma 1.0.
    pub fn to_color_balance(&self) -> ColorBalance {
        ColorBalance {
            red: self.profile.balance(Channel::Red),
            green: self.profile.balance(Channel::Green),
            blue: self.profile.balance(Channel::Blue),
            alpha: 1.0,
            gamma: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let film = FilmContainer::default();
        assert_eq!(film.cn_type(), FilmProfileKind::Neutral);
        assert_eq!(film.gamma(), 1.0);
        assert_eq!(film.exposure(), 1.0);
        assert!(!film.sixteen_bit());
        assert!(film.apply_balance());
        assert_eq!(film.white_point(), Color::white(false));
    }

    #[test]
    fn test_every_profile_round_trips() {
        let mut film = FilmContainer::default();
        for kind in FilmProfileKind::ALL {
            film.set_cn_type_id(kind.id() as i64);
            assert_eq!(film.cn_type(), kind);
            assert_eq!(*film.profile(), kind.profile());
        }
    }

    #[test]
    fn test_unknown_profile_falls_back_to_neutral() {
        let mut film = FilmContainer::new(FilmProfileKind::KodakGold200, 1.0, false);
        film.set_cn_type_id(999);
        assert_eq!(film.cn_type(), FilmProfileKind::Neutral);
        assert_eq!(*film.profile(), FilmProfile::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_black_points() {
        let film = FilmContainer::new(FilmProfileKind::KodakGold100, 1.0, false);
        assert_relative_eq!(film.black_point_for_channel(Channel::Red), 10f64.powf(-1.53));
        assert_eq!(film.black_point_for_channel(Channel::Luminosity), 0.0);
        assert_eq!(film.black_point_for_channel(Channel::Alpha), 0.0);
    }

    #[test]
    fn test_neutral_levels() {
        let film = FilmContainer::default();
        let l = film.to_levels();
        // 0.1 * 255 = 25.5
        for c in Channel::COLORS {
            assert_eq!(l.low_input[c.index()], 25);
            assert_eq!(l.high_input[c.index()], 255);
            assert_eq!(l.gamma[c.index()], 1.0);
        }
        for c in [Channel::Luminosity, Channel::Alpha] {
            assert_eq!(l.low_input[c.index()], 0);
            assert_eq!(l.high_input[c.index()], 255);
        }
        assert!(l.low_output.iter().all(|&v| v == 0));
        assert!(l.high_output.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_sixteen_bit_levels() {
        let mut film = FilmContainer::new(FilmProfileKind::KodakGold200, 1.0, true);
        film.set_white_point(Color::new(60000, 40000, 30000, 65535, true));
        film.set_exposure(2.0);
        let l = film.to_levels();
        let expected_low = (10f64.powf(-1.53) * 65535.0 * 2.0) as i32;
        assert_eq!(l.low_input[Channel::Red.index()], expected_low);
        assert_eq!(l.high_input[Channel::Green.index()], 40000);
        assert_eq!(l.high_input[Channel::Luminosity.index()], 65535);
        assert_eq!(l.high_output[Channel::Blue.index()], 65535);
    }

    #[test]
    fn test_red_gamma_always_one() {
        let mut film = FilmContainer::new(FilmProfileKind::FujicolorNPL160, 2.2, false);
        film.set_white_point(Color::new(210, 140, 90, 255, false));
        assert_eq!(film.gamma_for_channel(Channel::Red), 1.0);
        assert_eq!(film.gamma_for_channel(Channel::Alpha), 1.0);
        assert_eq!(film.gamma_for_channel(Channel::Luminosity), 1.0);
    }

    #[test]
    fn test_neutral_stock_balances_to_one() {
        let film = FilmContainer::new(FilmProfileKind::Neutral, 1.0, true);
        assert_eq!(film.gamma_for_channel(Channel::Green), 1.0);
        assert_eq!(film.gamma_for_channel(Channel::Blue), 1.0);
    }

    #[test]
    fn test_balance_gamma_formula() {
        let mut film = FilmContainer::new(FilmProfileKind::KodakGold100, 1.0, false);
        film.set_white_point(Color::new(200, 150, 100, 255, false));
        let bpr = 10f64.powf(-1.53);
        let bpg = 10f64.powf(-2.00);
        let expected = (bpg / (150.0 / 255.0)).log10() / (bpr / (200.0 / 255.0)).log10();
        assert_relative_eq!(film.gamma_for_channel(Channel::Green), expected, epsilon = 1e-12);
        assert!(film.gamma_for_channel(Channel::Green) > 1.0);

        film.set_apply_balance(false);
        assert_eq!(film.to_levels().gamma[Channel::Green.index()], 1.0);
    }

    #[test]
    fn test_zero_exposure_is_not_rejected() {
        let mut film = FilmContainer::new(FilmProfileKind::KodakGold100, 1.0, false);
        film.set_exposure(0.0);
        assert!(film.gamma_for_channel(Channel::Green).is_nan());
        let _ = film.to_levels();
    }

    #[test]
    fn test_color_balance() {
        let cb = FilmContainer::default().to_color_balance();
        assert!(cb.is_identity());
    }
}
