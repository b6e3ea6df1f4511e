//! Command-line argument parsing.

use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// Options for a normal viewer run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Config file path from `--config`, if given
    pub config_path: Option<PathBuf>,
    /// Mode and endpoint given on the command line
    pub overrides: ConfigOverrides,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the viewer (default)
    Run(RunOptions),
    /// Arguments could not be parsed
    Invalid(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// Flag values may be given as `--flag value` or `--flag=value`.
///
/// # Examples
///
/// ```
/// use structlog_view::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["structlog-view".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--mode" | "--url" | "--config" => {
                let value = match inline.or_else(|| args.next()) {
                    Some(value) => value,
                    None => return CliCommand::Invalid(format!("{} requires a value", flag)),
                };
                match flag.as_str() {
                    "--mode" => options.overrides.mode = Some(value),
                    "--url" => options.overrides.url = Some(value),
                    _ => options.config_path = Some(PathBuf::from(value)),
                }
            }
            _ => return CliCommand::Invalid(format!("unknown argument: {}", arg)),
        }
    }

    CliCommand::Run(options)
}
