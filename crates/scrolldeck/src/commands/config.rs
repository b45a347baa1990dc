use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let snap = config.snap_settings();

    println!("{}", "Configuration".bold());
    println!("  {} {}", "file:".dimmed(), path.display());
    println!();

    let theme = config
        .defaults
        .as_ref()
        .and_then(|d| d.theme.as_deref())
        .unwrap_or("light");
    println!("  {} {theme}", "defaults.theme:".cyan());
    println!("  {} {}", "snap.threshold:".cyan(), snap.threshold);
    println!("  {} {}", "snap.inertia:".cyan(), snap.inertia);
    println!("  {} {}", "snap.delay:".cyan(), snap.delay);
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Saved".green().bold());
    println!("  {} {}", "file:".dimmed(), path.display());
    Ok(())
}
