//! Debug symbol stripping
//!
//! Builds the sequence of native tool invocations for the host platform and
//! runs them one after another. GNU/ELF hosts use `objcopy`; Darwin uses
//! `dsymutil` and `strip`.

use crate::config::AppConfig;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Errors raised while stripping a binary
#[derive(Debug, thiserror::Error)]
pub enum StripError {
    #[error("Binary not found: {0:?}")]
    PathNotFound(PathBuf),

    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Host flavour, which decides the native tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS: `dsymutil` + `strip`
    Darwin,
    /// Everything else: GNU binutils `objcopy`
    Gnu,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Darwin
        } else {
            Platform::Gnu
        }
    }
}

/// A single native tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl ToolCommand {
    fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Run the command to completion, failing on a non-zero exit
    pub fn run(&self) -> Result<(), StripError> {
        log::info!("Running: {} {:?}", self.program, self.args);

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| StripError::Spawn {
                tool: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            log::error!("{} exited with {}", self.program, output.status);
            return Err(StripError::ToolFailed {
                tool: self.program.clone(),
                status: output.status,
                stderr,
            });
        }

        if !stderr.is_empty() {
            log::debug!("{} stderr: {}", self.program, stderr);
        }

        Ok(())
    }
}

/// Path of the side file that receives extracted debug info
pub fn debug_file_path(binary: &Path, suffix: &str) -> PathBuf {
    let mut path = binary.as_os_str().to_os_string();
    path.push(suffix);
    PathBuf::from(path)
}

/// Build the tool invocations needed to strip `binary`
///
/// With `extract`, debug info is first copied out (`<binary><suffix>` on GNU,
/// `<binary>.dSYM` on Darwin). On GNU hosts the stripped binary keeps a
/// `.gnu_debuglink` section pointing at the extracted file.
pub fn plan_commands(
    binary: &Path,
    extract: bool,
    platform: Platform,
    config: &AppConfig,
) -> Vec<ToolCommand> {
    let tools = &config.tools;
    let mut commands = Vec::new();

    match platform {
        Platform::Darwin => {
            if extract {
                commands.push(ToolCommand::new(&tools.dsymutil).arg(binary));
            }
            commands.push(ToolCommand::new(&tools.strip).arg("-S").arg(binary));
        }
        Platform::Gnu => {
            let mut strip = ToolCommand::new(&tools.objcopy)
                .arg("--strip-debug")
                .arg("--strip-unneeded");

            if extract {
                let debug_file = debug_file_path(binary, &config.debug_suffix);

                commands.push(
                    ToolCommand::new(&tools.objcopy)
                        .arg("--only-keep-debug")
                        .arg(binary)
                        .arg(&debug_file),
                );

                let mut link = OsString::from("--add-gnu-debuglink=");
                link.push(&debug_file);
                strip = strip.arg(link);
            }

            commands.push(strip.arg(binary));
        }
    }

    commands
}

/// Strip debug symbols from `binary`, extracting them first if asked
pub fn strip_binary(
    binary: &Path,
    extract: bool,
    platform: Platform,
    config: &AppConfig,
) -> Result<(), StripError> {
    if !binary.is_file() {
        return Err(StripError::PathNotFound(binary.to_path_buf()));
    }

    for command in plan_commands(binary, extract, platform, config) {
        command.run()?;
    }

    log::info!("Stripped debug symbols from {:?}", binary);
    Ok(())
}
