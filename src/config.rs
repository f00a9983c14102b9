use std::path::{Path, PathBuf};

use crate::discovery;
use crate::error::Error;

/// How the findings are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON on stdout, printed on every run.
    Json,
    /// Human-readable report on stderr, silent when nothing is broken.
    #[default]
    Text,
}

/// Run configuration, assembled from command-line arguments only.
/// There is no config file and no environment lookup.
#[derive(Debug)]
pub struct Config {
    /// Output format for the findings.
    pub format: OutputFormat,
    /// Canonical absolute path of the repository root.
    pub root: PathBuf,
}

impl Config {
    /// Build the configuration. Without an explicit root, the repository
    /// containing the current directory is used.
    ///
    /// # Errors
    ///
    /// Returns `Error::RootNotFound` if the root is missing or not a directory,
    /// or the git errors of `discovery::repository_toplevel` when no root is given
    /// and the current directory is not inside a repository.
    pub fn load(root: Option<&Path>, format: OutputFormat) -> Result<Self, Error> {
        let root = match root {
            Some(explicit) => explicit.to_path_buf(),
            None => discovery::repository_toplevel(&std::env::current_dir()?)?,
        };

        return Ok(Self {
            format,
            root: canonical_root(&root)?,
        });
    }
}

/// Canonicalize `root` so resolved link targets can be compared against it.
///
/// # Errors
///
/// Returns `Error::RootNotFound` if `root` cannot be canonicalized or is not a directory.
fn canonical_root(root: &Path) -> Result<PathBuf, Error> {
    let not_found = || return Error::RootNotFound { path: root.to_path_buf() };
    let canonical = std::fs::canonicalize(root).map_err(|_| return not_found())?;
    if !canonical.is_dir() {
        return Err(not_found());
    }
    return Ok(canonical);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_is_canonicalized() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let config = Config::load(Some(&dir.path().join("sub/..")), OutputFormat::Text).unwrap();
        assert_eq!(config.root, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn missing_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent")), OutputFormat::Text);
        assert!(matches!(result, Err(Error::RootNotFound { .. })));
    }

    #[test]
    fn file_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("README.md");
        std::fs::write(&file, "# hi").unwrap();
        let result = Config::load(Some(&file), OutputFormat::Json);
        assert!(matches!(result, Err(Error::RootNotFound { .. })));
    }
}
