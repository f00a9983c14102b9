use crate::error::Error;

/// ANSI bold on.
const BOLD: &str = "\x1b[1m";
/// ANSI attributes off.
const RESET: &str = "\x1b[0m";

/// Render a fatal error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render a fatal error as a structured markdown diagnostic:
/// what happened, then how to fix it where there is a known fix.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::GitFailed { args, dir, stderr } => render_git_failed(args, &dir.display().to_string(), stderr),
        Error::GitUnavailable { source } => render_git_unavailable(source),
        Error::RootNotFound { path } => format!("\
# Error: Repository Root Not Found

`{}` does not exist or is not a directory.

## Fix

Pass an existing directory to `--root`, or run doclinks inside a git repository.
", path.display()),
        Error::ReadFailed { path, source } => format!("\
# Error: Unreadable Document

Could not read `{}`: {source}
", path.display()),
        Error::Io(err) => format!("\
# Error: I/O

{err}
"),
        Error::Json(err) => format!("\
# Error: JSON Serialization

{err}
"),
    };
}

/// Diagnostic for a git command that exited non-zero.
fn render_git_failed(args: &str, dir: &str, stderr: &str) -> String {
    let detail = if stderr.is_empty() { "git printed no error output" } else { stderr };
    return format!("\
# Error: Git Query Failed

`git {args}` failed in `{dir}`:

    {detail}

No files were checked.

## Fix

Run doclinks inside a git repository, or point `--root` at one.
");
}

/// Diagnostic for a missing git executable.
fn render_git_unavailable(source: &std::io::Error) -> String {
    return format!("\
# Error: Git Not Available

Could not run `git`: {source}

No files were checked.

## Fix

Install git and make sure it is on `PATH`.
");
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn git_failure_names_command_and_directory() {
        let e = Error::GitFailed {
            args: "ls-files -z -- *.md".to_string(),
            dir: PathBuf::from("/not/a/repo"),
            stderr: "fatal: not a git repository".to_string(),
        };
        let md = render_error(&e);
        assert!(md.starts_with("# Error: Git Query Failed"));
        assert!(md.contains("`git ls-files -z -- *.md` failed in `/not/a/repo`"));
        assert!(md.contains("fatal: not a git repository"));
    }

    #[test]
    fn missing_root_suggests_flag() {
        let e = Error::RootNotFound { path: PathBuf::from("/nowhere") };
        let md = render_error(&e);
        assert!(md.contains("`/nowhere` does not exist"));
        assert!(md.contains("--root"));
    }

    #[test]
    fn unavailable_git_mentions_path() {
        let e = Error::GitUnavailable {
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(render_error(&e).contains("on `PATH`"));
    }
}
