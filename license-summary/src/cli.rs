use clap::Parser;

/// Usage line printed when the arguments are not exactly two paths
pub(crate) const USAGE: &str = "Usage: license-summary <input.json> <output.txt>";

/// Creates a human-readable license summary from a JSON license report
#[derive(Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub(crate) struct Cli {
    /// path to the JSON license report
    #[clap(value_parser, allow_hyphen_values = true)]
    pub(crate) input: std::path::PathBuf,
    /// path to the output text file
    #[clap(value_parser, allow_hyphen_values = true)]
    pub(crate) output: std::path::PathBuf,
}

impl Cli {
    /// Parse exactly two positional paths, there are no flags
    pub(crate) fn try_parse_paths<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let args: Vec<std::ffi::OsString> = args.into_iter().map(Into::into).collect();
        if args.len() != 3 {
            return Err(clap::Error::new(clap::error::ErrorKind::WrongNumberOfValues));
        }
        Self::try_parse_from(args)
    }
}
