//! Auto-white-point command
//!
//! Prints the film base color of a scan, estimated from the histogram or
//! picked at a position.

use crate::AutoWhitePointArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Context, Result};
use filmneg_film::{auto_white_point, pick_white_point};

pub fn run(args: AutoWhitePointArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "white_point::run");

    let image = crate::io::read_png(&args.input)?;
    let wp = match &args.pick {
        Some(xy) => pick_white_point(&image, xy[0], xy[1])
            .with_context(|| format!("Cannot pick white point at {},{}", xy[0], xy[1]))?,
        None => auto_white_point(&image),
    };

    if verbose > 0 {
        println!("{} ({})", args.input.display(), image.bit_depth());
    }
    println!("{},{},{}", wp.red(), wp.green(), wp.blue());

    Ok(())
}
