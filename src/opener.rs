//! Launching documents in an external viewer.

use std::{
    path::Path,
    process::{Command, Stdio},
};

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Hands a resolved document to something that can display it.
pub trait Opener {
    /// Launch a viewer for `path` without waiting for it to exit.
    fn open(&self, path: &Path) -> Result<()>;
}

/// Runs `program <path>` as a detached child process.
#[derive(Debug, Clone)]
pub struct CommandOpener {
    program: String,
}

impl CommandOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Opener for CommandOpener {
    fn open(&self, path: &Path) -> Result<()> {
        tracing::info!(
            program = %self.program,
            path = %path.display(),
            "launching viewer"
        );
        Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?;
        Ok(())
    }
}

/// Uses the platform's default handler for the file type (`xdg-open` on
/// Linux, `open` on macOS, the shell on Windows).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> Result<()> {
        tracing::info!(path = %path.display(), "launching default viewer");
        opener::open(path).map_err(|e| Error::Launch {
            program: "default viewer".to_string(),
            source: std::io::Error::other(e),
        })
    }
}

/// The configured viewer, or the platform default when none is set.
pub fn opener_for(config: &Config) -> Box<dyn Opener> {
    match &config.viewer {
        Some(program) => Box::new(CommandOpener::new(program.clone())),
        None => Box::new(SystemOpener),
    }
}
