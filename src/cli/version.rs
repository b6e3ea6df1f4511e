//! Version and usage output.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: structlog-view [OPTIONS]

Options:
  --mode <MODE>    Display mode: user, access or cpu
  --url <URL>      Log websocket endpoint (ws:// or wss://)
  --config <PATH>  Config file (default: ~/.structlog/config.json)
  -V, --version    Print version
  -h, --help       Print this help";

/// Handle the --version command.
pub fn handle_version_command() -> ! {
    println!("structlog-view {}", VERSION);
    std::process::exit(0)
}

/// Handle the --help command.
pub fn handle_help_command() -> ! {
    println!("{}", USAGE);
    std::process::exit(0)
}
