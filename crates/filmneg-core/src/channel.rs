//! Channel tags.
//!
//! [`Channel`] indexes the five per-channel parameter arrays used by the
//! tone operations. The numeric values are part of the persisted format
//! (levels actions store `lInput[1]` for red and so on) and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical channel of an RGBA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(usize)]
pub enum Channel {
    /// Overall intensity curve, applied on top of R, G and B.
    Luminosity = 0,
    /// Red samples.
    Red = 1,
    /// Green samples.
    Green = 2,
    /// Blue samples.
    Blue = 3,
    /// Alpha samples.
    Alpha = 4,
}

impl Channel {
    /// Number of logical channels.
    pub const COUNT: usize = 5;

    /// All channels in index order.
    pub const ALL: [Channel; 5] = [
        Channel::Luminosity,
        Channel::Red,
        Channel::Green,
        Channel::Blue,
        Channel::Alpha,
    ];

    /// The three color channels.
    pub const COLORS: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Index into 5-element per-channel arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks a channel up by its index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Offset of this channel's sample inside an RGBA pixel.
    ///
    /// Luminosity has no sample of its own.
    #[inline]
    pub const fn sample_offset(self) -> Option<usize> {
        match self {
            Channel::Luminosity => None,
            Channel::Red => Some(0),
            Channel::Green => Some(1),
            Channel::Blue => Some(2),
            Channel::Alpha => Some(3),
        }
    }

    /// Channel that owns the sample at `offset` of an RGBA pixel.
    #[inline]
    pub const fn from_sample_offset(offset: usize) -> Option<Self> {
        match offset {
            0 => Some(Channel::Red),
            1 => Some(Channel::Green),
            2 => Some(Channel::Blue),
            3 => Some(Channel::Alpha),
            _ => None,
        }
    }

    /// Whether this is R, G or B.
    #[inline]
    pub const fn is_color(self) -> bool {
        matches!(self, Channel::Red | Channel::Green | Channel::Blue)
    }

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Channel::Luminosity => "luminosity",
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Alpha => "alpha",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A channel, or all color channels at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelSelection {
    /// One logical channel.
    Single(Channel),
    /// Red, green and blue, treated identically.
    AllColorChannels,
}

impl ChannelSelection {
    /// Channels covered by this selection.
    pub fn channels(self) -> &'static [Channel] {
        match self {
            ChannelSelection::AllColorChannels => &Channel::COLORS,
            ChannelSelection::Single(Channel::Luminosity) => &[Channel::Luminosity],
            ChannelSelection::Single(Channel::Red) => &[Channel::Red],
            ChannelSelection::Single(Channel::Green) => &[Channel::Green],
            ChannelSelection::Single(Channel::Blue) => &[Channel::Blue],
            ChannelSelection::Single(Channel::Alpha) => &[Channel::Alpha],
        }
    }
}

impl From<Channel> for ChannelSelection {
    fn from(channel: Channel) -> Self {
        ChannelSelection::Single(channel)
    }
}
