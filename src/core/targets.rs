use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A file to process, reported under `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTarget {
    pub label: String,
    pub path: PathBuf,
}

impl FileTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            label: path.display().to_string(),
            path,
        }
    }

    pub fn labeled(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

fn is_glob_pattern(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

/// Build the glob pattern for `entry`; the root is matched literally.
fn glob_pattern(expanded: &str, root: &Path) -> String {
    if Path::new(expanded).is_absolute() {
        return expanded.to_string();
    }
    Path::new(&glob::Pattern::escape(&root.to_string_lossy()))
        .join(expanded)
        .to_string_lossy()
        .to_string()
}

/// Key for duplicate detection; falls back to the path as written when it
/// cannot be canonicalized.
fn dedup_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn relative_label(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Resolve target entries into file targets, in entry order.
///
/// - `~` expands to the home directory
/// - relative entries join `root`
/// - entries with glob metacharacters expand to matching files, sorted;
///   a pattern with no matches stays as one (missing) target
/// - a directory that cannot be read during expansion becomes a target of
///   its own, so the run reports it as failed
/// - a file already seen, under any spelling of its path, is skipped
pub fn resolve(entries: &[String], root: &Path) -> Result<Vec<FileTarget>> {
    let mut targets = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for entry in entries {
        let expanded = shellexpand::tilde(entry);
        let joined = root.join(&*expanded);

        if !is_glob_pattern(entry) {
            if seen.insert(dedup_key(&joined)) {
                targets.push(FileTarget::labeled(entry.clone(), joined));
            }
            continue;
        }

        let pattern = glob_pattern(&expanded, root);
        let paths = glob::glob(&pattern).map_err(|e| {
            Error::validation_invalid_argument(
                "targets",
                format!("Invalid glob pattern '{}': {}", entry, e),
                Some(entry.clone()),
                None,
            )
        })?;

        let mut matched: Vec<PathBuf> = Vec::new();
        let mut unreadable: Vec<PathBuf> = Vec::new();
        for path in paths {
            match path {
                Ok(path) if path.is_file() => matched.push(path),
                Ok(_) => {}
                Err(e) => {
                    crate::log_status!(
                        "targets",
                        "Cannot read {} while expanding '{}': {}",
                        e.path().display(),
                        entry,
                        e.error()
                    );
                    unreadable.push(e.path().to_path_buf());
                }
            }
        }
        matched.sort();

        if matched.is_empty() && unreadable.is_empty() {
            if seen.insert(dedup_key(&joined)) {
                targets.push(FileTarget::labeled(entry.clone(), joined));
            }
            continue;
        }

        for path in matched.into_iter().chain(unreadable) {
            if !seen.insert(dedup_key(&path)) {
                continue;
            }
            targets.push(FileTarget::labeled(relative_label(&path, root), path));
        }
    }

    crate::log_status!("targets", "Resolved {} targets", targets.len());

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn relative_entries_join_root_and_keep_label() {
        let dir = tempfile::tempdir().unwrap();
        let targets = resolve(&entries(&["components/Navbar.tsx"]), dir.path()).unwrap();

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].label, "components/Navbar.tsx");
        assert_eq!(targets[0].path, dir.path().join("components/Navbar.tsx"));
    }

    #[test]
    fn absolute_entries_ignore_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("About.tsx");
        let entry = file.to_string_lossy().to_string();

        let targets = resolve(&[entry], Path::new("/somewhere/else")).unwrap();
        assert_eq!(targets[0].path, file);
    }

    #[test]
    fn order_is_preserved_and_duplicates_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let targets = resolve(&entries(&["b.tsx", "a.tsx", "b.tsx"]), dir.path()).unwrap();

        let labels: Vec<&str> = targets.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["b.tsx", "a.tsx"]);
    }

    #[test]
    fn glob_expands_sorted_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let ui = dir.path().join("components").join("ui");
        fs::create_dir_all(ui.join("nested.tsx")).unwrap();
        fs::write(ui.join("feature-steps.tsx"), "").unwrap();
        fs::write(ui.join("Badge.tsx"), "").unwrap();
        fs::write(ui.join("notes.md"), "").unwrap();

        let targets = resolve(&entries(&["components/ui/*.tsx"]), dir.path()).unwrap();
        let labels: Vec<&str> = targets.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["components/ui/Badge.tsx", "components/ui/feature-steps.tsx"]
        );
    }

    #[test]
    fn glob_without_matches_becomes_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        let targets = resolve(&entries(&["components/*.vue"]), dir.path()).unwrap();

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].label, "components/*.vue");
        assert!(!targets[0].path.exists());
    }

    #[test]
    fn glob_and_literal_overlap_processed_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Menu.tsx"), "").unwrap();

        let targets = resolve(&entries(&["Menu.tsx", "*.tsx"]), dir.path()).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].label, "Menu.tsx");
    }

    #[test]
    fn malformed_glob_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve(&entries(&["components/[.tsx"]), dir.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert_eq!(err.details["field"], "targets");
    }

    #[test]
    fn glob_under_root_with_brackets() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("app/api/menu/[id]");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("route.ts"), "").unwrap();

        let targets = resolve(&entries(&["*.ts"]), &root).unwrap();

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].label, "route.ts");
        assert_eq!(targets[0].path, root.join("route.ts"));
    }

    #[test]
    fn same_file_through_different_spellings_processed_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("components")).unwrap();
        fs::write(dir.path().join("About.tsx"), "").unwrap();
        let root = dir.path().join("components").join("..");
        let absolute = dir.path().join("About.tsx").to_string_lossy().to_string();

        let targets = resolve(&[String::from("About.tsx"), absolute], &root).unwrap();

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].label, "About.tsx");
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_during_glob_becomes_target() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("Hidden.tsx"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to root.
        let readable = fs::read_dir(&locked).is_ok();
        let targets = resolve(&entries(&["*/*.tsx"]), dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        let targets = targets.unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].label, "locked");
    }
}
