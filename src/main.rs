use clap::Parser;
use miette::Result;
use retcon::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => retcon::cli::convert::run(args)?,
        Commands::Inspect(args) => retcon::cli::inspect::run(args)?,
        Commands::Completions(args) => retcon::cli::completions::run(args)?,
    }

    Ok(())
}
