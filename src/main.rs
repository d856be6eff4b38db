use clap::Parser;
use kitchenplan::cli::{run, CliArgs};
use kitchenplan::init_logging;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let args = CliArgs::parse();
    tracing::debug!("Arguments: {:?}", args);
    run(&args)
}
