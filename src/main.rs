use clap::Parser;
use version_registry::cli::{Cli, run};
use version_registry::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_format);

    run(&cli, &mut std::io::stdout().lock())
}
