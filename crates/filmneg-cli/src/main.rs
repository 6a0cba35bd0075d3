//! filmneg - color negative inversion for scanned film
//!
//! Non-interactive front end over the filmneg libraries, working on 8-bit
//! and 16-bit PNG scans.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod io;

#[derive(Parser)]
#[command(name = "filmneg")]
#[command(author, version, about = "Color negative film inversion")]
#[command(long_about = "
Turns scanned color negatives into positives using per-stock film
calibrations, a measured film base color and a display gamma.

Examples:
  filmneg profiles                                  # List film stocks
  filmneg film scan.png -o positive.png -p kodak-gold-200 --auto-white-point
  filmneg film scan.png -o positive.png --pick 12,40 --gamma 2.2
  filmneg film scan.png -o positive.png --save-action film.yaml
  filmneg replay film.yaml other.png -o other_positive.png
  filmneg levels-info -p fujicolor-pro-400h --white-point 230,160,110
  filmneg invert scan.png -o inverted.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v progress and parameters, -vv debug logging)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a negative into a positive
    Film(FilmArgs),

    /// Invert colors (alpha untouched)
    Invert(InvertArgs),

    /// Print the levels derived from film parameters
    #[command(name = "levels-info", visible_alias = "li")]
    LevelsInfo(LevelsInfoArgs),

    /// List built-in film stocks
    Profiles(ProfilesArgs),

    /// Measure the film base color of a scan
    #[command(name = "auto-white-point", visible_alias = "wp")]
    AutoWhitePoint(AutoWhitePointArgs),

    /// Re-apply a saved filter action to an image
    Replay(ReplayArgs),
}

/// Film parameters shared by `film` and `levels-info`.
#[derive(Args, Clone)]
struct FilmParams {
    /// Settings file to start from (YAML)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Film stock key or numeric id (see `filmneg profiles`)
    #[arg(short, long)]
    profile: Option<String>,

    /// Output gamma
    #[arg(short, long)]
    gamma: Option<f64>,

    /// Exposure multiplier
    #[arg(short, long)]
    exposure: Option<f64>,

    /// White point as R,G,B in the image's sample range
    #[arg(short = 'w', long, value_delimiter = ',', num_args = 3)]
    white_point: Option<Vec<i32>>,

    /// Disable per-channel gamma balancing
    #[arg(long)]
    no_balance: bool,
}

#[derive(Args)]
struct FilmArgs {
    /// Input negative (PNG)
    input: PathBuf,

    /// Output positive (PNG)
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    params: FilmParams,

    /// Pick the white point from the 2x2 block at X,Y
    #[arg(long, value_delimiter = ',', num_args = 2, conflicts_with_all = ["white_point", "auto_white_point"])]
    pick: Option<Vec<u32>>,

    /// Estimate the white point from the histogram
    #[arg(long, conflicts_with = "white_point")]
    auto_white_point: bool,

    /// Write the effective settings to this file (YAML)
    #[arg(long)]
    save_settings: Option<PathBuf>,

    /// Write the filter action to this file (YAML)
    #[arg(long)]
    save_action: Option<PathBuf>,
}

#[derive(Args)]
struct InvertArgs {
    /// Input image (PNG)
    input: PathBuf,

    /// Output image (PNG)
    #[arg(short, long)]
    output: PathBuf,

    /// Write the filter action to this file (YAML)
    #[arg(long)]
    save_action: Option<PathBuf>,
}

#[derive(Args)]
struct LevelsInfoArgs {
    #[command(flatten)]
    params: FilmParams,

    /// Derive levels for 16-bit samples
    #[arg(long)]
    sixteen_bit: bool,
}

#[derive(Args)]
struct ProfilesArgs {
    /// Also print max densities
    #[arg(short, long)]
    long: bool,
}

#[derive(Args)]
struct AutoWhitePointArgs {
    /// Input negative (PNG)
    input: PathBuf,

    /// Pick the 2x2 block at X,Y instead of using the histogram
    #[arg(long, value_delimiter = ',', num_args = 2)]
    pick: Option<Vec<u32>>,
}

#[derive(Args)]
struct ReplayArgs {
    /// Filter action file (YAML)
    action: PathBuf,

    /// Input image (PNG)
    input: PathBuf,

    /// Output image (PNG)
    #[arg(short, long)]
    output: PathBuf,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Film(args) => commands::film::run(args, cli.verbose),
        Commands::Invert(args) => commands::invert::run(args, cli.verbose),
        Commands::LevelsInfo(args) => commands::levels_info::run(args, cli.verbose),
        Commands::Profiles(args) => commands::profiles::run(args, cli.verbose),
        Commands::AutoWhitePoint(args) => commands::white_point::run(args, cli.verbose),
        Commands::Replay(args) => commands::replay::run(args, cli.verbose),
    }
}
