mod app;
mod commands;
mod config;
mod effects;
mod notify;
mod render;

use std::path::PathBuf;

use clap::Parser;

use crate::config::LogTarget;

/// Terminal job search client.
#[derive(Debug, Parser)]
#[command(name = "jobseek", version)]
struct Args {
    /// RON config file (defaults to ./jobseek.ron when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `api_base_url` from the config.
    #[arg(long)]
    api_base: Option<String>,
    /// Overrides the log target from the config.
    #[arg(long, value_enum)]
    log: Option<LogTarget>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = config::load(args.config.as_deref())?;
    if let Some(api_base) = args.api_base {
        config.api_base_url = api_base;
    }
    if let Some(target) = args.log {
        config.log.target = target;
    }

    jobseek_logging::initialize(
        config.log.target.into(),
        config.log.level_filter()?,
        &config.log.file,
    );

    app::run(&config)
}
