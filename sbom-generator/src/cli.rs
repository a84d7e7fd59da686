use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

/// Generate SPDX SBOM from license metadata
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Path to input licenses JSON file
    #[clap(value_parser, long = "licenses_info")]
    pub(crate) licenses_info: Option<PathBuf>,
    /// Path to output SPDX JSON file
    #[clap(value_parser, long)]
    pub(crate) out: Option<PathBuf>,
    /// Input file (positional argument)
    #[clap(value_parser)]
    pub(crate) licenses_info_file: Option<PathBuf>,
    /// Output file (positional argument)
    #[clap(value_parser)]
    pub(crate) output_file: Option<PathBuf>,
}

impl Cli {
    /// Resolve the input and output paths from either argument style.
    ///
    /// The flags take precedence over the positional arguments.
    pub(crate) fn paths(self) -> Result<(PathBuf, PathBuf), clap::Error> {
        match (
            self.licenses_info,
            self.out,
            self.licenses_info_file,
            self.output_file,
        ) {
            (Some(input), Some(output), _, _) => Ok((input, output)),
            (_, _, Some(input), Some(output)) => Ok((input, output)),
            _ => Err(Cli::command().error(
                ErrorKind::MissingRequiredArgument,
                "Must provide either --licenses_info and --out, or two positional arguments",
            )),
        }
    }
}
