use anyhow::{Context, Result};
use clap::Parser;
use courtside::cli::{self, args::Cli, render::Theme};
use courtside::config::Config;
use courtside::logging;
use std::io::IsTerminal;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    logging::init_logging(&config.logging, cli.debug)?;

    let theme = if cli.plain || !std::io::stdout().is_terminal() {
        Theme::plain()
    } else {
        Theme::default_theme()
    };

    cli::execute(cli.command, &config, theme)
}
