//! CLI entry point for pen trace replay with pseudo-haptic shadows

use clap::Parser;
use shadow_haptics::io::cli::{Cli, ReplayProcessor};

fn main() -> shadow_haptics::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    let summary = ReplayProcessor::new(cli).process()?;
    log::info!("Shadow written to {}", summary.shadow_path.display());
    if let Some(path) = &summary.animation_path {
        log::info!("Animation written to {}", path.display());
    }
    Ok(())
}
