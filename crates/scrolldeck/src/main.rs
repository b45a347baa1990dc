mod app;
mod cli;
mod commands;
mod config;
mod deck;
mod render;
mod scroll;
mod theme;
mod timeline;
mod viewport;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    cli.run()
}
