use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod index;
mod join;
mod output;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("loci_score_join=debug,info")
    } else {
        EnvFilter::new("loci_score_join=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Join(args) => {
            cli::join::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Index(args) => {
            cli::index::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
