//! Profiles command

use crate::ProfilesArgs;
use anyhow::Result;
use filmneg_core::Channel;
use filmneg_film::FilmProfileKind;

pub fn run(args: ProfilesArgs, _verbose: u8) -> Result<()> {
    for kind in FilmProfileKind::ALL {
        if args.long {
            let p = kind.profile();
            println!(
                "{:>2}  {:<30} {:<45} dmax {:.2} {:.2} {:.2}",
                kind.id(),
                kind.key(),
                kind.name(),
                p.dmax(Channel::Red),
                p.dmax(Channel::Green),
                p.dmax(Channel::Blue)
            );
        } else {
            println!("{:>2}  {:<30} {}", kind.id(), kind.key(), kind.name());
        }
    }
    Ok(())
}
