//! Target resolution: decide which link targets are local paths, resolve them
//! against the document or repository root, and collect the ones that are missing.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{LinkOccurrence, ResolvedFailure};

/// A URI scheme prefix such as `https:` or `mailto:`.
static URI_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").expect("valid regex"));

/// Trim, then strip one surrounding `<...>` pair and trim again.
pub fn normalize_target(raw: &str) -> &str {
    let trimmed = raw.trim();
    return match trimmed.strip_prefix('<').and_then(|t| return t.strip_suffix('>')) {
        Some(inner) => inner.trim(),
        None => trimmed,
    };
}

/// Keep the path before the first `#`, then before the first `?`.
pub fn split_target(target: &str) -> &str {
    let without_fragment = target.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();
    return without_query.trim();
}

/// Whether a normalized, split target names a repository path rather than a
/// URL, a protocol-relative URL, or an in-page anchor.
pub fn is_local_target(target: &str) -> bool {
    if target.is_empty() || target.starts_with('#') {
        return false;
    }
    if URI_SCHEME.is_match(target) {
        return false;
    }
    return !target.starts_with("//");
}

/// Resolve a local target to an absolute path. A leading `/` anchors at the
/// repository root; anything else is relative to the document's directory.
pub fn resolve_target_path(root: &Path, source_file: &Path, target: &str) -> PathBuf {
    let joined = match target.strip_prefix('/') {
        Some(_) => root.join(target.trim_start_matches('/')),
        None => source_file.parent().unwrap_or(root).join(target),
    };
    return canonicalize_lenient(&joined);
}

/// Canonicalize an absolute path that may not exist, like `realpath -m`: each
/// existing prefix has its symlinks followed, the missing remainder is appended
/// lexically, and `..` always pops the already-resolved prefix.
fn canonicalize_lenient(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                resolved.pop();
            },
            Component::Normal(name) => {
                let candidate = resolved.join(name);
                resolved = std::fs::canonicalize(&candidate).unwrap_or(candidate);
            },
            Component::Prefix(_) | Component::RootDir => resolved.push(component),
        }
    }
    return resolved;
}

/// Resolve one occurrence. Returns `None` when the link is not local, escapes
/// the repository, or points at something that exists.
pub fn check_occurrence(root: &Path, occurrence: &LinkOccurrence) -> Option<ResolvedFailure> {
    let target = split_target(normalize_target(&occurrence.raw_target));
    if !is_local_target(target) {
        return None;
    }

    let resolved = resolve_target_path(root, &occurrence.source_file, target);
    if !resolved.starts_with(root) {
        tracing::debug!(target = %occurrence.raw_target, resolved = %resolved.display(), "outside repository, ignored");
        return None;
    }
    if resolved.exists() {
        return None;
    }

    tracing::debug!(
        source = %occurrence.source_file.display(),
        line = occurrence.line_number,
        target = %occurrence.raw_target,
        "missing link target"
    );
    return Some(ResolvedFailure {
        occurrence: occurrence.clone(),
        resolved,
    });
}

/// Check every occurrence, keeping input order. Never stops at the first failure.
pub fn find_missing(root: &Path, occurrences: &[LinkOccurrence]) -> Vec<ResolvedFailure> {
    return occurrences
        .iter()
        .filter_map(|occurrence| return check_occurrence(root, occurrence))
        .collect();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;

    fn occurrence(source: &Path, target: &str) -> LinkOccurrence {
        return LinkOccurrence {
            line_number: 1,
            raw_target: target.to_string(),
            source_file: source.to_path_buf(),
        };
    }

    /// Canonical temp repo with `docs/b.md` and `top.md`.
    fn repo() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = std::fs::canonicalize(dir.path()).unwrap();
        std::fs::create_dir_all(root.join("docs")).unwrap();
        std::fs::write(root.join("docs/b.md"), "b").unwrap();
        std::fs::write(root.join("top.md"), "top").unwrap();
        return (dir, root);
    }

    #[test]
    fn normalizes_angle_brackets() {
        assert_eq!(normalize_target("  < a b.md >  "), "a b.md");
        assert_eq!(normalize_target("plain.md"), "plain.md");
        assert_eq!(normalize_target("<unclosed.md"), "<unclosed.md");
    }

    #[test]
    fn splits_fragment_then_query() {
        assert_eq!(split_target("a.md#sec?x"), "a.md");
        assert_eq!(split_target("a.md?x=1#sec"), "a.md");
        assert_eq!(split_target("#only"), "");
    }

    #[test]
    fn classifies_local_targets() {
        assert!(is_local_target("docs/a.md"));
        assert!(is_local_target("/abs.md"));
        assert!(is_local_target("../up.md"));
        assert!(!is_local_target(""));
        assert!(!is_local_target("#anchor"));
        assert!(!is_local_target("https://example.com/x"));
        assert!(!is_local_target("mailto:someone@example.com"));
        assert!(!is_local_target("//cdn.example.com/x.js"));
    }

    #[test]
    fn leading_slash_resolves_from_root() {
        let root = Path::new("/repo");
        let source = Path::new("/repo/docs/guide.md");
        assert_eq!(resolve_target_path(root, source, "/top.md"), PathBuf::from("/repo/top.md"));
        assert_eq!(resolve_target_path(root, source, "top.md"), PathBuf::from("/repo/docs/top.md"));
        assert_eq!(resolve_target_path(root, source, "../x/./y.md"), PathBuf::from("/repo/x/y.md"));
    }

    #[test]
    fn parent_dir_never_climbs_above_filesystem_root() {
        assert_eq!(canonicalize_lenient(Path::new("/a-doclinks/../../b")), PathBuf::from("/b"));
    }

    #[cfg(unix)]
    #[test]
    fn missing_target_under_symlink_escaping_repository_is_ignored() {
        let (_dir, root) = repo();
        let outside = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("vendor")).unwrap();
        let source = root.join("a.md");

        let resolved = resolve_target_path(&root, &source, "vendor/missing.md");
        assert_eq!(resolved, std::fs::canonicalize(outside.path()).unwrap().join("missing.md"));
        assert!(check_occurrence(&root, &occurrence(&source, "vendor/missing.md")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn missing_target_under_symlink_inside_repository_is_reported() {
        let (_dir, root) = repo();
        std::os::unix::fs::symlink(root.join("docs"), root.join("alias")).unwrap();
        let source = root.join("a.md");

        let failure = check_occurrence(&root, &occurrence(&source, "alias/missing.md")).unwrap();
        assert_eq!(failure.resolved, root.join("docs/missing.md"));
    }

    #[cfg(unix)]
    #[test]
    fn parent_dir_after_symlink_pops_the_link_target() {
        let (_dir, root) = repo();
        std::fs::create_dir_all(root.join("deep/nested")).unwrap();
        std::os::unix::fs::symlink(root.join("deep/nested"), root.join("docs/link")).unwrap();
        let source = root.join("docs/a.md");

        let resolved = resolve_target_path(&root, &source, "link/../x.md");
        assert_eq!(resolved, root.join("deep/x.md"));
    }

    #[test]
    fn existing_sibling_is_not_reported() {
        let (_dir, root) = repo();
        let source = root.join("docs/a.md");
        assert!(check_occurrence(&root, &occurrence(&source, "b.md")).is_none());
        assert!(check_occurrence(&root, &occurrence(&source, "/top.md#intro")).is_none());
        assert!(check_occurrence(&root, &occurrence(&source, "<../docs>")).is_none());
    }

    #[test]
    fn missing_sibling_is_reported_with_resolved_path() {
        let (_dir, root) = repo();
        let source = root.join("docs/c.md");
        let failure = check_occurrence(&root, &occurrence(&source, "missing.md")).unwrap();
        assert_eq!(failure.resolved, root.join("docs/missing.md"));
        assert_eq!(failure.occurrence.raw_target, "missing.md");
    }

    #[test]
    fn escaping_the_repository_is_ignored() {
        let (_dir, root) = repo();
        let source = root.join("docs/a.md");
        assert!(check_occurrence(&root, &occurrence(&source, "../../elsewhere/x.md")).is_none());
    }

    #[test]
    fn urls_and_anchors_are_never_checked() {
        let (_dir, root) = repo();
        let source = root.join("docs/a.md");
        let occurrences = vec![
            occurrence(&source, "https://example.com/x"),
            occurrence(&source, "#section"),
            occurrence(&source, "<mailto:a@b.c>"),
        ];
        assert!(find_missing(&root, &occurrences).is_empty());
    }

    #[test]
    fn reports_every_failure_in_order() {
        let (_dir, root) = repo();
        let source = root.join("docs/a.md");
        let occurrences = vec![
            occurrence(&source, "one.md"),
            occurrence(&source, "b.md"),
            occurrence(&source, "two.md"),
        ];
        let failures = find_missing(&root, &occurrences);
        let names: Vec<&str> = failures.iter().map(|f| return f.occurrence.raw_target.as_str()).collect();
        assert_eq!(names, vec!["one.md", "two.md"]);
    }
}
