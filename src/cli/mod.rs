pub mod completions;
pub mod convert;
pub mod inspect;

use clap::{Parser, Subcommand};

/// retcon - legacy RTS asset converter
#[derive(Parser, Debug)]
#[command(name = "retcon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert legacy asset files into engine artifacts
    Convert(convert::ConvertArgs),

    /// Decode a single asset file and print its structure
    Inspect(inspect::InspectArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
