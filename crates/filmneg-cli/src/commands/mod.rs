//! CLI command implementations

pub mod film;
pub mod invert;
pub mod levels_info;
pub mod profiles;
pub mod replay;
pub mod white_point;

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use filmneg_core::{BitDepth, Color, FilterAction, PixelBuffer};
use filmneg_film::{FilmContainer, FilmProfileKind, FilmSettings};
use filmneg_ops::executor::run_threaded;
use filmneg_ops::{FilterOutcome, ImageFilter};

use crate::FilmParams;

/// Resolves a film stock from a key or a numeric id.
pub fn parse_profile(value: &str) -> Result<FilmProfileKind> {
    if let Ok(id) = value.trim().parse::<i64>() {
        return FilmProfileKind::from_id(id).with_context(|| format!("no film profile with id {id}"));
    }
    FilmProfileKind::from_key(value)
        .with_context(|| format!("unknown film profile '{value}' (see `filmneg profiles`)"))
}

/// Builds a container from an optional settings file plus overrides.
pub fn build_container(params: &FilmParams, depth: BitDepth) -> Result<FilmContainer> {
    let settings = match &params.settings {
        Some(path) => FilmSettings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => FilmSettings::default(),
    };
    let mut film = settings.to_container(depth);

    if let Some(profile) = &params.profile {
        film.set_cn_type(parse_profile(profile)?);
    }
    if let Some(gamma) = params.gamma {
        film.set_gamma(gamma);
    }
    if let Some(exposure) = params.exposure {
        film.set_exposure(exposure);
    }
    if let Some(wp) = &params.white_point {
        film.set_white_point(white_point_from(wp, depth)?);
    }
    if params.no_balance {
        film.set_apply_balance(false);
    }
    Ok(film)
}

/// Turns `R,G,B` command-line values into an opaque color.
pub fn white_point_from(values: &[i32], depth: BitDepth) -> Result<Color> {
    let &[r, g, b] = values else {
        bail!("white point needs three values, got {}", values.len());
    };
    let max = depth.max_value() as i32;
    if [r, g, b].iter().any(|v| !(0..=max).contains(v)) {
        bail!("white point {r},{g},{b} outside 0..={max} for {depth} images");
    }
    Ok(Color::new(r, g, b, max, depth.is_sixteen_bit()))
}

/// Runs a filter on a worker thread, showing progress when verbose.
pub fn apply_filter<F>(filter: F, src: PixelBuffer, verbose: u8) -> Result<PixelBuffer>
where
    F: ImageFilter + 'static,
{
    let name = filter.name();
    let show = verbose > 0;
    let handle = run_threaded(filter, src, move |p: u8| {
        tracing::trace!(percent = p, "progress");
        if show {
            eprint!("\r{name}: {p:3}%");
            let _ = std::io::stderr().flush();
        }
    });
    let outcome = handle.join().with_context(|| format!("{name} failed"))?;
    if show {
        eprintln!();
    }
    match outcome {
        FilterOutcome::Completed(buf) => Ok(buf),
        FilterOutcome::Cancelled => bail!("{name} was cancelled"),
    }
}

/// Writes an action file if a path was given.
pub fn maybe_save_action(path: Option<&Path>, action: &FilterAction, verbose: u8) -> Result<()> {
    if let Some(path) = path {
        filmneg_film::save_action(action, path)
            .with_context(|| format!("Failed to save action: {}", path.display()))?;
        if verbose > 0 {
            println!("Saved action to {}", path.display());
        }
    }
    Ok(())
}
