//! Levels-info command
//!
//! Prints the levels a film configuration produces, channel by channel.

use crate::LevelsInfoArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::Result;
use filmneg_core::{BitDepth, Channel};

pub fn run(args: LevelsInfoArgs, verbose: u8) -> Result<()> {
    trace!(sixteen_bit = args.sixteen_bit, "levels_info::run");

    let depth = BitDepth::from_sixteen_bit(args.sixteen_bit);
    let film = super::build_container(&args.params, depth)?;
    let levels = film.to_levels();

    println!("{} ({depth})", film.cn_type());
    if verbose > 0 {
        let wp = film.white_point();
        println!(
            "gamma {:.3}  exposure {:.3}  white point {},{},{}",
            film.gamma(),
            film.exposure(),
            wp.red(),
            wp.green(),
            wp.blue()
        );
    }
    println!("{:<12} {:>8} {:>8} {:>8} {:>8} {:>10}", "channel", "lowIn", "highIn", "lowOut", "highOut", "gamma");
    for channel in Channel::ALL {
        let i = channel.index();
        println!(
            "{:<12} {:>8} {:>8} {:>8} {:>8} {:>10.6}",
            channel.name(),
            levels.low_input[i],
            levels.high_input[i],
            levels.low_output[i],
            levels.high_output[i],
            levels.gamma[i]
        );
    }

    Ok(())
}
