mod app;
mod cli;
mod commands;
mod effects;
mod logging;
mod render;

use artgrid_logging::grid_error;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::initialize(cli.log, cli.log_level())?;
    if let Err(err) = app::run(&cli) {
        grid_error!("artgrid stopped: {:#}", err);
        return Err(err);
    }
    Ok(())
}
