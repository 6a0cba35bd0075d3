//! Replay command
//!
//! Re-applies a filter action saved by `film --save-action` or
//! `invert --save-action`.

use crate::ReplayArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Context, Result};
use filmneg_film::{filter_from_action, load_action};

pub fn run(args: ReplayArgs, verbose: u8) -> Result<()> {
    trace!(action = %args.action.display(), input = %args.input.display(), "replay::run");

    let action = load_action(&args.action)
        .with_context(|| format!("Failed to load action: {}", args.action.display()))?;
    let filter = filter_from_action(&action)?;
    if verbose > 0 {
        println!("Replaying {action}");
    }

    let image = crate::io::read_png(&args.input)?;
    let output = super::apply_filter(filter, image, verbose)?;
    crate::io::write_png(&args.output, &output)?;

    Ok(())
}
