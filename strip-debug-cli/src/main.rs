//! strip-debug CLI Application
//!
//! Strips debug symbols from a compiled binary, optionally extracting them to
//! a side file first so debuggers can still find them:
//! - GNU/ELF: `<path>.debug`, linked back through `.gnu_debuglink`
//! - Darwin: `<path>.dSYM`
//!
//! Exit status is 0 on success and when help is requested, 1 otherwise.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;

mod config;
mod strip;

/// strip-debug - Strip debug symbols from a compiled binary
#[derive(Parser, Debug)]
#[command(name = "strip-debug")]
#[command(about = "Strip (and optionally extract) debug symbols from a compiled binary", long_about = None)]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Extract debug symbols to a side file before stripping
    #[arg(long)]
    extract: bool,

    /// Path to the binary to strip
    #[arg(value_name = "PATH")]
    path: PathBuf,
}

fn main() -> Result<()> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => exit_with_usage(e),
    };

    init_logging();

    log::debug!("strip-debug v{}", env!("CARGO_PKG_VERSION"));

    let config = config::load_from_env()?;
    let platform = strip::Platform::current();
    log::debug!("Platform: {:?}, extract: {}", platform, args.extract);

    strip::strip_binary(&args.path, args.extract, platform, &config)
        .with_context(|| format!("Failed to strip debug symbols from {:?}", args.path))?;

    Ok(())
}

/// Parse the command line, requiring `--extract` to precede the path
fn parse_args() -> std::result::Result<Args, clap::Error> {
    let mut command = Args::command();
    let matches = command.try_get_matches_from_mut(std::env::args_os())?;

    if matches.get_flag("extract") {
        if let (Some(flag), Some(path)) = (matches.index_of("extract"), matches.index_of("path")) {
            if flag > path {
                return Err(command.error(
                    ErrorKind::ArgumentConflict,
                    "--extract must come before <PATH>",
                ));
            }
        }
    }

    Args::from_arg_matches(&matches)
}

/// Print clap's message and exit: 0 for help/version, 1 for usage errors
fn exit_with_usage(err: clap::Error) -> ! {
    let code = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    };

    // Help and version go to stdout, everything else to stderr with usage
    if err.print().is_err() {
        std::process::exit(1);
    }
    std::process::exit(code);
}

/// Initialize logging, honouring RUST_LOG
fn init_logging() {
    use env_logger::{Builder, Env};
    use std::io::Write;

    Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
