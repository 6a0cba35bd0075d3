//! Film command
//!
//! Converts a scanned negative into a positive.

use crate::FilmArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Context, Result};
use filmneg_film::{auto_white_point, pick_white_point, FilmFilter, FilmSettings};
use filmneg_ops::ImageFilter;

pub fn run(args: FilmArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "film::run");

    let image = crate::io::read_png(&args.input)?;
    let depth = image.bit_depth();
    let mut film = super::build_container(&args.params, depth)?;

    if let Some(xy) = &args.pick {
        let wp = pick_white_point(&image, xy[0], xy[1])
            .with_context(|| format!("Cannot pick white point at {},{}", xy[0], xy[1]))?;
        film.set_white_point(wp);
    } else if args.auto_white_point {
        film.set_white_point(auto_white_point(&image));
    }

    let wp = film.white_point();
    info!(
        profile = %film.cn_type(),
        gamma = film.gamma(),
        exposure = film.exposure(),
        white_point = ?wp.to_array(),
        "Converting negative"
    );
    if verbose > 0 {
        println!(
            "Converting {} ({}x{}, {}) with {}",
            args.input.display(),
            image.width(),
            image.height(),
            depth,
            film.cn_type()
        );
        println!(
            "  gamma {:.2}, exposure {:.2}, white point {},{},{}{}",
            film.gamma(),
            film.exposure(),
            wp.red(),
            wp.green(),
            wp.blue(),
            if film.apply_balance() { ", balanced" } else { "" }
        );
    }

    let filter = FilmFilter::new(film);
    let action = filter.filter_action();
    let output = super::apply_filter(filter, image, verbose)?;
    crate::io::write_png(&args.output, &output)?;

    super::maybe_save_action(args.save_action.as_deref(), &action, verbose)?;
    if let Some(path) = &args.save_settings {
        FilmSettings::from_container(&film)
            .save(path)
            .with_context(|| format!("Failed to save settings: {}", path.display()))?;
    }

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
