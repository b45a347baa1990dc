use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrolldeck")]
#[command(author, version, about)]
#[command(long_about = "A scroll-driven slide deck viewer.\n\n\
    Wheel input drives the deck horizontally and settles on the nearest \
    slide.\n\n\
    Examples:\n  \
    scrolldeck                   Launch the built-in demo deck\n  \
    scrolldeck deck.yaml         Present a deck file (fullscreen)\n  \
    scrolldeck deck.yaml --windowed   Launch in a window\n  \
    scrolldeck spec              Print the deck file format")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck file to present (YAML). Omit for the built-in demo deck.
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long)]
    pub slide: Option<usize>,

    /// Disable scroll animation (static fallback mode)
    #[arg(long = "static")]
    pub static_mode: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the deck file format
    Spec {
        /// Print a concise quick-reference card instead of the full spec
        #[arg(long)]
        short: bool,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, snap.threshold)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Spec { short }) => {
                crate::commands::spec::run(short);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("scrolldeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                if let Some(ref file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                }
                crate::app::run(self.file, self.windowed, self.slide, self.static_mode)
            }
        }
    }
}
