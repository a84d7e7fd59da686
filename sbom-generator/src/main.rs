use clap::Parser;

use crate::cli::Cli;

/// cli interface for the application
pub(crate) mod cli;

fn main() -> Result<(), anyhow::Error> {
    let _ = env_logger::try_init();

    let (input, output) = match Cli::parse().paths() {
        Ok(paths) => paths,
        Err(err) => err.exit(),
    };

    license_report::sbom::generate_sbom(&input, &output)
}
