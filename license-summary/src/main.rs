use crate::cli::{Cli, USAGE};

/// cli interface for the application
pub(crate) mod cli;

fn main() -> Result<(), anyhow::Error> {
    let _ = env_logger::try_init();

    let cli = match Cli::try_parse_paths(std::env::args_os()) {
        Ok(cli) => cli,
        Err(_) => {
            println!("{}", USAGE);
            std::process::exit(1);
        }
    };

    license_report::summary::create_summary(&cli.input, &cli.output)
}
