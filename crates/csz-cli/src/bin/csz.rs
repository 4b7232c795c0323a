use anyhow::Result;
use clap::Parser;

use csz_cli::args::CliArgs;
use csz_cli::driver;

fn main() -> Result<()> {
    // Zero cost unless CSZ_LOG or RUST_LOG is set.
    csz_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    driver::run(&args)
}
