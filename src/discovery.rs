//! Enumeration of version-controlled markdown files through git.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::Error;

/// Pathspec handed to `git ls-files`. Git globs let `*` cross directory separators.
const MARKDOWN_PATHSPEC: &str = "*.md";

/// Run git with `args` in `dir` and return its standard output.
///
/// # Errors
///
/// Returns `Error::GitUnavailable` if git cannot be spawned,
/// or `Error::GitFailed` if it exits non-zero.
fn run_git(dir: &Path, args: &[&str]) -> Result<Vec<u8>, Error> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|source| return Error::GitUnavailable { source })?;

    if !output.status.success() {
        return Err(Error::GitFailed {
            args: args.join(" "),
            dir: dir.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    return Ok(output.stdout);
}

/// Ask git for the top-level directory of the repository containing `dir`.
///
/// # Errors
///
/// Returns the git errors of `run_git`, for example when `dir` is not inside a repository.
pub fn repository_toplevel(dir: &Path) -> Result<PathBuf, Error> {
    let stdout = run_git(dir, &["rev-parse", "--show-toplevel"])?;
    let toplevel = String::from_utf8_lossy(&stdout).trim_end_matches(['\n', '\r']).to_string();
    return Ok(PathBuf::from(toplevel));
}

/// List tracked markdown files as absolute paths under `root`, in git's order.
///
/// # Errors
///
/// Returns `Error::GitUnavailable` or `Error::GitFailed`. Callers must treat both
/// as fatal: an empty listing from a failed query would read as "no broken links".
pub fn tracked_markdown_files(root: &Path) -> Result<Vec<PathBuf>, Error> {
    let stdout = run_git(root, &["ls-files", "-z", "--", MARKDOWN_PATHSPEC])?;
    let files = parse_ls_files_output(root, &stdout);
    tracing::debug!(count = files.len(), root = %root.display(), "discovered markdown files");
    return Ok(files);
}

/// Split NUL-separated `git ls-files -z` output into paths joined onto `root`.
fn parse_ls_files_output(root: &Path, stdout: &[u8]) -> Vec<PathBuf> {
    return stdout
        .split(|byte| return *byte == 0)
        .filter(|entry| return !entry.trim_ascii().is_empty())
        .map(|entry| return root.join(path_from_bytes(entry)))
        .collect();
}

/// Raw path bytes as a path. Unix paths are arbitrary bytes, so nothing is lost.
#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt as _;

    return PathBuf::from(std::ffi::OsStr::from_bytes(bytes));
}

/// Raw path bytes as a path. Git emits UTF-8 elsewhere, so the lossy decode only
/// touches names that could not be opened anyway.
#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    return PathBuf::from(String::from_utf8_lossy(bytes).into_owned());
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn parses_nul_separated_listing() {
        let root = Path::new("/repo");
        let files = parse_ls_files_output(root, b"README.md\0docs/guide.md\0");
        assert_eq!(
            files,
            vec![PathBuf::from("/repo/README.md"), PathBuf::from("/repo/docs/guide.md")]
        );
    }

    #[test]
    fn empty_listing_is_valid() {
        assert!(parse_ls_files_output(Path::new("/repo"), b"").is_empty());
    }

    #[test]
    fn keeps_paths_with_spaces_intact() {
        let files = parse_ls_files_output(Path::new("/repo"), b"my notes.md\0");
        assert_eq!(files, vec![PathBuf::from("/repo/my notes.md")]);
    }

    #[cfg(unix)]
    #[test]
    fn keeps_non_utf8_path_bytes() {
        use std::os::unix::ffi::OsStrExt as _;

        let files = parse_ls_files_output(Path::new("/repo"), b"caf\xe9.md\0");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().map(|n| return n.as_bytes()), Some(&b"caf\xe9.md"[..]));
    }

    #[test]
    fn fails_outside_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let result = tracked_markdown_files(dir.path());
        assert!(matches!(
            result,
            Err(Error::GitFailed { .. } | Error::GitUnavailable { .. })
        ));
    }
}
