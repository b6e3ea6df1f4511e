//! Command-line interface.
//!
//! The dispatcher is called early in main() to handle informational flags
//! before the terminal is touched:
//!
//! ```ignore
//! use structlog_view::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! let options = match run_cli_command(command) {
//!     Ok(options) => options,
//!     Err(message) => {
//!         eprintln!("Error: {}", message);
//!         std::process::exit(2);
//!     }
//! };
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, RunOptions};
pub use version::{handle_help_command, handle_version_command, USAGE, VERSION};

/// Run a CLI command if applicable.
///
/// `Version` and `Help` print and exit. `Run` yields its options for the
/// viewer, and an invalid command line yields the parse message.
pub fn run_cli_command(command: CliCommand) -> Result<RunOptions, String> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => handle_help_command(),
        CliCommand::Run(options) => Ok(options),
        CliCommand::Invalid(message) => Err(message),
    }
}
