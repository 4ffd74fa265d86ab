use anyhow::Result;
use clap::Parser;
use presence_config::cli::{self, Args};

fn main() -> Result<()> {
    let args = Args::parse();

    // Keep the guard alive so buffered file output is flushed on exit
    let _guard = if args.verbose {
        presence_logging::init_with_defaults("debug")?;
        None
    } else {
        presence_logging::init_subscriber()?
    };

    cli::execute(args)
}
