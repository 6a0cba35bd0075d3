//! Persisted film tool settings and filter action files.
//!
//! Settings are YAML. White point samples are always stored on the 16-bit
//! scale so one file serves 8-bit and 16-bit images alike:
//!
//! ```yaml
//! film_profile: 2
//! film_profile_name: Kodak Gold 200
//! gamma: 1.8
//! exposure: 1.0
//! white_point: [65535, 65535, 65535]
//! apply_color_balance: true
//! ```
//!
//! Missing fields take their defaults, which are also the reset state of
//! the tool.

use std::path::Path;

use filmneg_core::{BitDepth, Color, FilterAction};
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::container::FilmContainer;
use crate::profile::FilmProfileKind;
use crate::FilmResult;

/// Saved state of the film conversion tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmSettings {
    /// Film stock id.
    pub film_profile: i64,
    /// Film stock display name, informational only.
    pub film_profile_name: String,
    /// Output gamma.
    pub gamma: f64,
    /// Exposure multiplier.
    pub exposure: f64,
    /// White point R, G, B on the 16-bit scale.
    pub white_point: [i32; 3],
    /// Per-channel gamma balancing.
    pub apply_color_balance: bool,
}

impl Default for FilmSettings {
    fn default() -> Self {
        Self {
            film_profile: FilmProfileKind::Neutral.id() as i64,
            film_profile_name: FilmProfileKind::Neutral.name().to_string(),
            gamma: 1.8,
            exposure: 1.0,
            white_point: [65535; 3],
            apply_color_balance: true,
        }
    }
}

impl FilmSettings {
    /// Captures a container's state.
    pub fn from_container(film: &FilmContainer) -> Self {
        let wp = film.white_point();
        let scale = if wp.sixteen_bit() { 1 } else { 256 };
        Self {
            film_profile: film.cn_type().id() as i64,
            film_profile_name: film.cn_type().name().to_string(),
            gamma: film.gamma(),
            exposure: film.exposure(),
            white_point: [wp.red() * scale, wp.green() * scale, wp.blue() * scale],
            apply_color_balance: film.apply_balance(),
        }
    }

    /// Builds a container for an image of the given depth.
    ///
    /// An unknown stock id falls back to Neutral.
    pub fn to_container(&self, depth: BitDepth) -> FilmContainer {
        let sixteen_bit = depth.is_sixteen_bit();
        let scale = if sixteen_bit { 1 } else { 256 };
        let [r, g, b] = self.white_point.map(|v| v / scale);

        let mut film = FilmContainer::new(FilmProfileKind::Neutral, self.gamma, sixteen_bit);
        film.set_cn_type_id(self.film_profile);
        film.set_exposure(self.exposure);
        film.set_white_point(Color::new(r, g, b, depth.max_value() as i32, sixteen_bit));
        film.set_apply_balance(self.apply_color_balance);
        film
    }

    /// Reads settings from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> FilmResult<Self> {
        let path = path.as_ref();
        trace!(path = %path.display(), "settings::load");
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Writes settings to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> FilmResult<()> {
        let path = path.as_ref();
        trace!(path = %path.display(), "settings::save");
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }
}

/// Reads a filter action from a YAML file.
pub fn load_action(path: impl AsRef<Path>) -> FilmResult<FilterAction> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Writes a filter action to a YAML file.
pub fn save_action(action: &FilterAction, path: impl AsRef<Path>) -> FilmResult<()> {
    std::fs::write(path.as_ref(), serde_yaml::to_string(action)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = FilmSettings::default();
        assert_eq!(s.film_profile, 0);
        assert_eq!(s.film_profile_name, "Neutral");
        assert_eq!(s.gamma, 1.8);
        assert_eq!(s.exposure, 1.0);
        assert_eq!(s.white_point, [65535; 3]);
        assert!(s.apply_color_balance);
    }

    #[test]
    fn test_eight_bit_scaling() {
        let film = FilmSettings::default().to_container(BitDepth::U8);
        assert_eq!(film.white_point(), Color::new(255, 255, 255, 255, false));
        assert_eq!(film.gamma(), 1.8);

        let mut film = FilmContainer::new(FilmProfileKind::KodakGold100, 2.0, false);
        film.set_white_point(Color::new(200, 150, 100, 255, false));
        let s = FilmSettings::from_container(&film);
        assert_eq!(s.white_point, [51200, 38400, 25600]);
        assert_eq!(s.to_container(BitDepth::U8).white_point().to_array(), [200, 150, 100, 255]);
    }

    #[test]
    fn test_sixteen_bit_unscaled() {
        let s = FilmSettings {
            white_point: [60000, 50000, 40000],
            ..FilmSettings::default()
        };
        let film = s.to_container(BitDepth::U16);
        assert_eq!(film.white_point().to_array(), [60000, 50000, 40000, 65535]);
        assert!(film.sixteen_bit());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let s: FilmSettings = serde_yaml::from_str("film_profile: 4\nexposure: 0.5\n").unwrap();
        assert_eq!(s.film_profile, 4);
        assert_eq!(s.exposure, 0.5);
        assert_eq!(s.gamma, 1.8);
        assert_eq!(s.white_point, [65535; 3]);
    }

    #[test]
    fn test_unknown_profile_id() {
        let s = FilmSettings {
            film_profile: 77,
            ..FilmSettings::default()
        };
        assert_eq!(s.to_container(BitDepth::U8).cn_type(), FilmProfileKind::Neutral);
    }
}
