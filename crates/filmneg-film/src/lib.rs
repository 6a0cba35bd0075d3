//! # filmneg-film
//!
//! Color negative film conversion.
//!
//! A scanned negative is turned into a positive in three stages: levels
//! derived from the film stock and the measured base color, a display gamma,
//! and a final inversion. [`FilmContainer`] holds the user parameters,
//! [`FilmFilter`] runs the stages.
//!
//! # Modules
//!
//! - [`profile`] - Built-in film stock calibrations
//! - [`container`] - Parameters and derived tone curves
//! - [`filter`] - The three-stage conversion filter
//! - [`white_point`] - Picking or estimating the film base color
//! - [`settings`] - YAML settings and action files
//! - [`replay`] - Rebuilding filters from stored actions
//!
//! # Example
//!
//! ```rust
//! use filmneg_core::{Color, PixelBuffer};
//! use filmneg_film::{FilmContainer, FilmFilter, FilmProfileKind};
//! use filmneg_ops::{run_filter, FilterContext};
//!
//! let negative = PixelBuffer::filled(32, 32, Color::new(200, 120, 80, 255, false)).unwrap();
//!
//! let mut film = FilmContainer::new(FilmProfileKind::KodakGold200, 1.8, false);
//! film.set_white_point(filmneg_film::auto_white_point(&negative));
//!
//! let outcome = run_filter(&FilmFilter::new(film), &negative, &FilterContext::detached()).unwrap();
//! assert!(outcome.into_buffer().is_some());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod container;
pub mod filter;
pub mod profile;
pub mod replay;
pub mod settings;
pub mod white_point;

pub use container::FilmContainer;
pub use error::{FilmError, FilmResult};
pub use filter::FilmFilter;
pub use profile::{FilmProfile, FilmProfileKind};
pub use replay::filter_from_action;
pub use settings::{load_action, save_action, FilmSettings};
pub use white_point::{auto_white_point, pick_white_point};
