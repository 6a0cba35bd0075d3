//! Invert command

use crate::InvertArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::Result;
use filmneg_ops::{ImageFilter, InvertFilter};

pub fn run(args: InvertArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "invert::run");

    let image = crate::io::read_png(&args.input)?;
    if verbose > 0 {
        println!("Inverting {}", args.input.display());
    }

    let output = super::apply_filter(InvertFilter, image, verbose)?;
    crate::io::write_png(&args.output, &output)?;
    super::maybe_save_action(args.save_action.as_deref(), &InvertFilter.filter_action(), verbose)?;

    Ok(())
}
