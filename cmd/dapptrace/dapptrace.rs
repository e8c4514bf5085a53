use clap::Parser;
use dapptrace::{cli::CLI, initializers::init_tracing};

fn main() -> eyre::Result<()> {
    let CLI { opts, command } = CLI::parse();

    init_tracing(&opts);

    command.run(&opts)
}
