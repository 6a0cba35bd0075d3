//! # filmneg-ops
//!
//! Tone operations for film negative processing.
//!
//! Every operation is an [`ImageFilter`]: it reads a source
//! [`PixelBuffer`](filmneg_core::PixelBuffer), writes a new one, reports
//! progress and honors cancellation through a [`FilterContext`].
//!
//! # Modules
//!
//! - [`levels`] - Per-channel input/output clipping and gamma
//! - [`color_balance`] - Channel multipliers plus a shared gamma
//! - [`invert`] - `max - v` on color samples
//! - [`histogram`] - Per-channel sample counts
//! - [`progress`] - Cancellation tokens, progress sinks, sub-ranges
//! - [`executor`] - Synchronous and worker-thread execution
//! - [`parallel`] - Banded rayon driver shared by the filters
//!
//! # Example
//!
//! ```rust
//! use filmneg_core::{BitDepth, Color, PixelBuffer};
//! use filmneg_ops::prelude::*;
//!
//! let src = PixelBuffer::filled(16, 16, Color::new(128, 128, 128, 255, false)).unwrap();
//! let levels = LevelsFilter::new(LevelsContainer::identity(BitDepth::U8));
//!
//! let ctx = FilterContext::detached();
//! let out = run_filter(&levels, &src, &ctx).unwrap().into_buffer().unwrap();
//! assert_eq!(out, src);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod color_balance;
pub mod executor;
pub mod histogram;
pub mod invert;
pub mod levels;
pub mod parallel;
pub mod progress;

pub use color_balance::{ColorBalance, ColorBalanceFilter};
pub use error::{OpsError, OpsResult};
pub use executor::{run_filter, run_threaded, FilterHandle, ImageFilter};
pub use histogram::Histogram;
pub use invert::InvertFilter;
pub use levels::{LevelsContainer, LevelsFilter, LevelsLut};
pub use progress::{CancelToken, FilterContext, FilterOutcome, NullProgress, ProgressSink};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::color_balance::{ColorBalance, ColorBalanceFilter};
    pub use crate::executor::{run_filter, run_threaded, FilterHandle, ImageFilter};
    pub use crate::invert::InvertFilter;
    pub use crate::levels::{LevelsContainer, LevelsFilter};
    pub use crate::progress::{CancelToken, FilterContext, FilterOutcome, ProgressSink};
    pub use crate::{OpsError, OpsResult};
}
