//! # filmneg-core
//!
//! Core types for color-negative film processing.
//!
//! This crate provides the foundational types used throughout the filmneg
//! workspace:
//!
//! - [`BitDepth`] - 8-bit / 16-bit sample depth and its value range
//! - [`Channel`], [`ChannelSelection`] - Per-channel indexing (L, R, G, B, A)
//! - [`Color`] - A single RGBA sample quadruple tagged with its bit depth
//! - [`PixelBuffer`] - Interleaved RGBA pixel storage
//! - [`FilterAction`] - Serializable description of a filter invocation
//!
//! ## Crate Structure
//!
//! ```text
//! filmneg-core (this crate)
//!    ^
//!    |
//!    +-- filmneg-ops (levels, color balance, invert, executor)
//!    +-- filmneg-film (film profiles, negative-to-positive filter)
//!    +-- filmneg-cli
//! ```
//!
//! ## Sample Layout
//!
//! Every buffer stores four samples per pixel in R, G, B, A order, either as
//! `u8` (range 0..=255) or `u16` (range 0..=65535). There is no implicit
//! conversion between the two depths inside a filter run.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod action;
pub mod buffer;
pub mod channel;
pub mod color;
pub mod error;
pub mod format;

// Re-exports for convenience
pub use action::{ActionParameter, ActionValue, FilterAction};
pub use buffer::{PixelBuffer, PixelData, CHANNELS};
pub use channel::{Channel, ChannelSelection};
pub use color::Color;
pub use error::{Error, Result};
pub use format::BitDepth;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use filmneg_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::action::{ActionValue, FilterAction};
    pub use crate::buffer::{PixelBuffer, PixelData};
    pub use crate::channel::{Channel, ChannelSelection};
    pub use crate::color::Color;
    pub use crate::error::{Error, Result};
    pub use crate::format::BitDepth;
}
