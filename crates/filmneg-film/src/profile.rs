//! Color negative film stock calibrations.
//!
//! Each stock is described by its maximum density per color layer. The
//! black point of a channel is the transmittance at that density,
//! `10^-dmax`. Stocks may also carry color balance multipliers and white
//! point scales; every built-in stock leaves both at 1.0.
//!
//! The table is indexed by the numeric id of [`FilmProfileKind`], which is
//! what settings files and filter actions store. Ids never change.

use std::fmt;

use filmneg_core::Channel;

/// Calibration data of one film stock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmProfile {
    dmax: [f64; 3],
    balance: [f64; 3],
    wp: [f64; 3],
}

impl FilmProfile {
    /// Profile with the given max densities and neutral balance.
    pub const fn new(red_dmax: f64, green_dmax: f64, blue_dmax: f64) -> Self {
        Self {
            dmax: [red_dmax, green_dmax, blue_dmax],
            balance: [1.0; 3],
            wp: [1.0; 3],
        }
    }

    /// Sets color balance multipliers.
    pub const fn with_balance(mut self, red: f64, green: f64, blue: f64) -> Self {
        self.balance = [red, green, blue];
        self
    }

    /// Sets white point scales.
    pub const fn with_white_point(mut self, red: f64, green: f64, blue: f64) -> Self {
        self.wp = [red, green, blue];
        self
    }

    fn color_index(channel: Channel) -> Option<usize> {
        match channel {
            Channel::Red => Some(0),
            Channel::Green => Some(1),
            Channel::Blue => Some(2),
            Channel::Luminosity | Channel::Alpha => None,
        }
    }

    /// Max density of a color channel; 0.0 for luminosity and alpha.
    pub fn dmax(&self, channel: Channel) -> f64 {
        Self::color_index(channel).map_or(0.0, |i| self.dmax[i])
    }

    /// Color balance multiplier; 1.0 for luminosity and alpha.
    pub fn balance(&self, channel: Channel) -> f64 {
        Self::color_index(channel).map_or(1.0, |i| self.balance[i])
    }

    /// White point scale; 1.0 for luminosity and alpha.
    pub fn wp(&self, channel: Channel) -> f64 {
        Self::color_index(channel).map_or(1.0, |i| self.wp[i])
    }
}

impl Default for FilmProfile {
    fn default() -> Self {
        FilmProfileKind::Neutral.profile()
    }
}

/// Built-in film stocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum FilmProfileKind {
    #[default]
    Neutral = 0,
    KodakGold100,
    KodakGold200,
    KodakEktar100,
    KodakProfessionalPortra160NC,
    KodakProfessionalPortra160VC,
    KodakProfessionalPortra400NC,
    KodakProfessionalPortra400VC,
    KodakProfessionalPortra800Box,
    KodakProfessionalPortra800P1,
    KodakProfessionalPortra800P2,
    KodakProfessionalNewPortra160,
    KodakProfessionalNewPortra400,
    KodakFarbwelt100,
    KodakFarbwelt200,
    KodakFarbwelt400,
    KodakRoyalGold400,
    AgfaphotoVistaPlus200,
    AgfaphotoVistaPlus400,
    FujicolorPro160S,
    FujicolorPro160C,
    FujicolorNPL160,
    FujicolorPro400H,
    FujicolorPro800Z,
    FujicolorSuperiaReala,
    FujicolorSuperia100,
    FujicolorSuperia200,
    FujicolorSuperiaXtra400,
    FujicolorSuperiaXtra800,
    FujicolorTrueDefinition400,
    FujicolorSuperia1600,
}

struct Entry {
    key: &'static str,
    name: &'static str,
    profile: FilmProfile,
}

const fn entry(key: &'static str, name: &'static str, r: f64, g: f64, b: f64) -> Entry {
    Entry {
        key,
        name,
        profile: FilmProfile::new(r, g, b),
    }
}

// Indexed by FilmProfileKind id.
const TABLE: [Entry; FilmProfileKind::COUNT] = [
    entry("neutral", "Neutral", 1.0, 1.0, 1.0),
    entry("kodak-gold-100", "Kodak Gold 100", 1.53, 2.00, 2.40),
    entry("kodak-gold-200", "Kodak Gold 200", 1.53, 2.00, 2.40),
    entry("kodak-ektar-100", "Kodak Ektar 100", 1.40, 1.85, 2.34),
    entry("kodak-portra-160nc", "Kodak Professional Portra 160NC", 1.49, 1.96, 2.46),
    entry("kodak-portra-160vc", "Kodak Professional Portra 160VC", 1.56, 2.03, 2.55),
    entry("kodak-portra-400nc", "Kodak Professional Portra 400NC", 1.69, 2.15, 2.69),
    entry("kodak-portra-400vc", "Kodak Professional Portra 400VC", 1.78, 2.21, 2.77),
    entry("kodak-portra-800-box", "Kodak Professional Portra 800 (Box Speed)", 1.89, 2.29, 2.89),
    entry("kodak-portra-800-push1", "Kodak Professional Portra 800 (Push 1 stop)", 1.53, 2.01, 2.46),
    entry("kodak-portra-800-push2", "Kodak Professional Portra 800 (Push 2 stop)", 1.74, 2.22, 2.64),
    entry("kodak-new-portra-160", "Kodak Professional New Portra 160", 1.41, 1.88, 2.32),
    entry("kodak-new-portra-400", "Kodak Professional New Portra 400", 1.69, 2.15, 2.68),
    entry("kodak-farbwelt-100", "Kodak Farbwelt 100", 1.86, 2.33, 2.77),
    entry("kodak-farbwelt-200", "Kodak Farbwelt 200", 1.82, 2.29, 2.72),
    entry("kodak-farbwelt-400", "Kodak Farbwelt 400", 1.86, 2.35, 2.88),
    entry("kodak-royal-gold-400", "Kodak Royal Gold 400", 1.79, 2.24, 2.76),
    entry("agfaphoto-vista-plus-200", "Agfaphoto Vista Plus 200", 1.70, 2.13, 2.50),
    entry("agfaphoto-vista-plus-400", "Agfaphoto Vista Plus 400", 1.86, 2.35, 2.67),
    entry("fujicolor-pro-160s", "Fujicolor Pro 160S", 1.73, 2.27, 2.53),
    entry("fujicolor-pro-160c", "Fujicolor Pro 160C", 1.96, 2.46, 2.69),
    entry("fujicolor-npl-160", "Fujicolor NPL 160", 2.19, 2.80, 3.02),
    entry("fujicolor-pro-400h", "Fujicolor Pro 400H", 1.95, 2.37, 2.65),
    entry("fujicolor-pro-800z", "Fujicolor Pro 800Z", 2.07, 2.36, 2.73),
    entry("fujicolor-superia-reala", "Fujicolor Superia Reala", 1.81, 2.35, 2.57),
    entry("fujicolor-superia-100", "Fujicolor Superia 100", 1.94, 2.41, 2.78),
    entry("fujicolor-superia-200", "Fujicolor Superia 200", 1.91, 2.38, 2.66),
    entry("fujicolor-superia-xtra-400", "Fujicolor Superia X-Tra 400", 2.10, 2.56, 2.83),
    entry("fujicolor-superia-xtra-800", "Fujicolor Superia X-Tra 800", 2.07, 2.62, 2.85),
    entry("fujicolor-true-definition-400", "Fujicolor Superia True Definition 400", 1.93, 2.34, 2.58),
    entry("fujicolor-superia-1600", "Fujicolor Superia 1600", 2.28, 2.68, 2.98),
];

impl FilmProfileKind {
    /// Number of built-in stocks.
    pub const COUNT: usize = 31;

    /// Every stock in id order.
    pub const ALL: [FilmProfileKind; Self::COUNT] = [
        Self::Neutral,
        Self::KodakGold100,
        Self::KodakGold200,
        Self::KodakEktar100,
        Self::KodakProfessionalPortra160NC,
        Self::KodakProfessionalPortra160VC,
        Self::KodakProfessionalPortra400NC,
        Self::KodakProfessionalPortra400VC,
        Self::KodakProfessionalPortra800Box,
        Self::KodakProfessionalPortra800P1,
        Self::KodakProfessionalPortra800P2,
        Self::KodakProfessionalNewPortra160,
        Self::KodakProfessionalNewPortra400,
        Self::KodakFarbwelt100,
        Self::KodakFarbwelt200,
        Self::KodakFarbwelt400,
        Self::KodakRoyalGold400,
        Self::AgfaphotoVistaPlus200,
        Self::AgfaphotoVistaPlus400,
        Self::FujicolorPro160S,
        Self::FujicolorPro160C,
        Self::FujicolorNPL160,
        Self::FujicolorPro400H,
        Self::FujicolorPro800Z,
        Self::FujicolorSuperiaReala,
        Self::FujicolorSuperia100,
        Self::FujicolorSuperia200,
        Self::FujicolorSuperiaXtra400,
        Self::FujicolorSuperiaXtra800,
        Self::FujicolorTrueDefinition400,
        Self::FujicolorSuperia1600,
    ];

    /// Persisted numeric id.
    #[inline]
    pub const fn id(self) -> i32 {
        self as i32
    }

    /// Looks a stock up by id.
    pub fn from_id(id: i64) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Looks a stock up by its command-line key, e.g. `"kodak-gold-200"`.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|k| k.key() == key)
    }

    /// Command-line key.
    pub fn key(self) -> &'static str {
        TABLE[self as usize].key
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        TABLE[self as usize].name
    }

    /// Calibration data.
    pub fn profile(self) -> FilmProfile {
        TABLE[self as usize].profile
    }
}

impl fmt::Display for FilmProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_table_order() {
        for (i, kind) in FilmProfileKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, i);
            assert_eq!(FilmProfileKind::from_id(i as i64), Some(*kind));
        }
        assert_eq!(FilmProfileKind::from_id(31), None);
        assert_eq!(FilmProfileKind::from_id(-1), None);
    }

    #[test]
    fn test_dmax_table() {
        let expected: [[f64; 3]; FilmProfileKind::COUNT] = [
            [1.0, 1.0, 1.0],
            [1.53, 2.00, 2.40],
            [1.53, 2.00, 2.40],
            [1.40, 1.85, 2.34],
            [1.49, 1.96, 2.46],
            [1.56, 2.03, 2.55],
            [1.69, 2.15, 2.69],
            [1.78, 2.21, 2.77],
            [1.89, 2.29, 2.89],
            [1.53, 2.01, 2.46],
            [1.74, 2.22, 2.64],
            [1.41, 1.88, 2.32],
            [1.69, 2.15, 2.68],
            [1.86, 2.33, 2.77],
            [1.82, 2.29, 2.72],
            [1.86, 2.35, 2.88],
            [1.79, 2.24, 2.76],
            [1.70, 2.13, 2.50],
            [1.86, 2.35, 2.67],
            [1.73, 2.27, 2.53],
            [1.96, 2.46, 2.69],
            [2.19, 2.80, 3.02],
            [1.95, 2.37, 2.65],
            [2.07, 2.36, 2.73],
            [1.81, 2.35, 2.57],
            [1.94, 2.41, 2.78],
            [1.91, 2.38, 2.66],
            [2.10, 2.56, 2.83],
            [2.07, 2.62, 2.85],
            [1.93, 2.34, 2.58],
            [2.28, 2.68, 2.98],
        ];
        for (kind, dmax) in FilmProfileKind::ALL.iter().zip(expected) {
            let p = kind.profile();
            assert_eq!(p.dmax(Channel::Red), dmax[0], "{kind}");
            assert_eq!(p.dmax(Channel::Green), dmax[1], "{kind}");
            assert_eq!(p.dmax(Channel::Blue), dmax[2], "{kind}");
            assert_eq!(p.balance(Channel::Green), 1.0);
            assert_eq!(p.wp(Channel::Blue), 1.0);
        }
    }

    #[test]
    fn test_keys_unique_and_resolvable() {
        for kind in FilmProfileKind::ALL {
            assert_eq!(FilmProfileKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(FilmProfileKind::from_key("Kodak-Gold-200"), Some(FilmProfileKind::KodakGold200));
        assert_eq!(FilmProfileKind::from_key("velvia"), None);
    }

    #[test]
    fn test_non_color_channels() {
        let p = FilmProfileKind::FujicolorPro400H.profile();
        assert_eq!(p.dmax(Channel::Alpha), 0.0);
        assert_eq!(p.wp(Channel::Luminosity), 1.0);
        assert_eq!(FilmProfile::default(), FilmProfile::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_builders() {
        let p = FilmProfile::new(1.0, 2.0, 3.0)
            .with_balance(1.1, 1.0, 0.9)
            .with_white_point(0.5, 1.0, 1.0);
        assert_eq!(p.balance(Channel::Red), 1.1);
        assert_eq!(p.wp(Channel::Red), 0.5);
    }
}
