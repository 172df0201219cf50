use std::{
    fs::DirEntry,
    path::{Path, PathBuf},
};

use crate::{
    config::Config,
    error::{Error, Result},
};

/// A discovered document file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Name of the subject folder holding the file, `None` for files placed
    /// directly in the root.
    pub folder: Option<String>,
    /// Path relative to the root directory.
    pub relative_path: PathBuf,
    /// Absolute path below the canonical root.
    pub absolute_path: PathBuf,
}

impl DiscoveredFile {
    /// The file name with its extension stripped.
    pub fn stem(&self) -> String {
        self.absolute_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Walk the two-level document tree below `root`.
///
/// Immediate child directories are subject folders; only the files directly
/// inside them are listed, deeper directories are ignored. Files directly in
/// the root are listed too. Hidden entries (names starting with `.`) and files
/// without a document extension are skipped. Unreadable subject folders are
/// logged and skipped. Results are sorted by absolute path.
pub fn discover_files(
    root: &Path,
    config: &Config,
) -> Result<Vec<DiscoveredFile>> {
    let not_found = || Error::NotFound {
        kind: "root directory",
        name: root.display().to_string(),
    };

    let canonical_root = root.canonicalize().map_err(|_| not_found())?;
    if !canonical_root.is_dir() {
        return Err(not_found());
    }
    let entries = std::fs::read_dir(&canonical_root).map_err(|e| {
        tracing::debug!(error = %e, "cannot read root directory");
        not_found()
    })?;

    let mut results = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable root entry");
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        match classify(&entry) {
            Some(Kind::Dir) => {
                list_folder(&entry.path(), &name, config, &mut results);
            }
            Some(Kind::File) if config.is_document(&entry.path()) => {
                results.push(DiscoveredFile {
                    folder: None,
                    relative_path: PathBuf::from(entry.file_name()),
                    absolute_path: entry.path(),
                });
            }
            _ => {}
        }
    }

    results.sort_by(|a, b| a.absolute_path.cmp(&b.absolute_path));
    Ok(results)
}

/// List the documents of one subject folder. `dir` is the real folder path;
/// `folder` is its name decoded for parsing.
fn list_folder(
    dir: &Path,
    folder: &str,
    config: &Config,
    results: &mut Vec<DiscoveredFile>,
) {
    let folder_name = dir.file_name().map(PathBuf::from).unwrap_or_default();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                folder = %dir.display(),
                error = %e,
                "skipping unreadable folder"
            );
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    folder = %dir.display(),
                    error = %e,
                    "skipping unreadable entry"
                );
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        match classify(&entry) {
            Some(Kind::File) if config.is_document(&entry.path()) => {
                results.push(DiscoveredFile {
                    folder: Some(folder.to_string()),
                    relative_path: folder_name.join(entry.file_name()),
                    absolute_path: entry.path(),
                });
            }
            Some(Kind::Dir) => {
                tracing::debug!(
                    path = %entry.path().display(),
                    "ignoring nested directory"
                );
            }
            _ => {}
        }
    }
}

enum Kind {
    Dir,
    File,
}

/// Classify an entry, following symlinks. Broken links yield `None`.
fn classify(entry: &DirEntry) -> Option<Kind> {
    let file_type = entry.file_type().ok()?;
    if file_type.is_dir() {
        return Some(Kind::Dir);
    }
    if file_type.is_file() {
        return Some(Kind::File);
    }
    if file_type.is_symlink() {
        let meta = std::fs::metadata(entry.path()).ok()?;
        if meta.is_dir() {
            return Some(Kind::Dir);
        }
        if meta.is_file() {
            return Some(Kind::File);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative_paths(files: &[DiscoveredFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.relative_path.to_string_lossy().to_string())
            .collect()
    }

    fn config(root: &Path) -> Config {
        Config::with_root(root)
    }

    #[test]
    fn discovers_documents_in_subject_folders() {
        let tmp = tempfile::tempdir().unwrap();
        let folder = tmp.path().join("optimization__opt");
        std::fs::create_dir(&folder).unwrap();
        std::fs::write(folder.join("boyd__convex.pdf"), "pdf").unwrap();
        std::fs::write(folder.join("notes.txt"), "text").unwrap();

        let files = discover_files(tmp.path(), &config(tmp.path())).unwrap();
        assert_eq!(
            relative_paths(&files),
            vec!["optimization__opt/boyd__convex.pdf"]
        );
        assert_eq!(files[0].folder.as_deref(), Some("optimization__opt"));
        assert_eq!(files[0].stem(), "boyd__convex");
        assert!(files[0].absolute_path.is_absolute());
    }

    #[test]
    fn root_level_documents_have_no_folder() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("router_manual.pdf"), "pdf").unwrap();

        let files = discover_files(tmp.path(), &config(tmp.path())).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].folder.is_none());
    }

    #[test]
    fn skips_hidden_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let hidden = tmp.path().join(".trash__t");
        std::fs::create_dir(&hidden).unwrap();
        std::fs::write(hidden.join("a__b.pdf"), "pdf").unwrap();
        let visible = tmp.path().join("topology__topo");
        std::fs::create_dir(&visible).unwrap();
        std::fs::write(visible.join(".c__d.pdf"), "pdf").unwrap();
        std::fs::write(visible.join("munkres__topology.pdf"), "pdf").unwrap();

        let files = discover_files(tmp.path(), &config(tmp.path())).unwrap();
        assert_eq!(relative_paths(&files), vec![
            "topology__topo/munkres__topology.pdf"
        ]);
    }

    #[test]
    fn does_not_descend_below_subject_folders() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("algebra__alg").join("old");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("lang__algebra.pdf"), "pdf").unwrap();

        let files = discover_files(tmp.path(), &config(tmp.path())).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn results_are_sorted_by_path() {
        let tmp = tempfile::tempdir().unwrap();
        for folder in ["zeta__z", "alpha__a", "mu__m"] {
            let dir = tmp.path().join(folder);
            std::fs::create_dir(&dir).unwrap();
            std::fs::write(dir.join("y__second.pdf"), "pdf").unwrap();
            std::fs::write(dir.join("x__first.pdf"), "pdf").unwrap();
        }

        let files = discover_files(tmp.path(), &config(tmp.path())).unwrap();
        let paths: Vec<_> = files.iter().map(|f| &f.absolute_path).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
        assert_eq!(files.len(), 6);
    }

    #[test]
    fn missing_root_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let err = discover_files(&missing, &config(&missing)).unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "root directory", .. }));
    }

    #[test]
    fn file_as_root_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("file.pdf");
        std::fs::write(&file, "pdf").unwrap();
        let err = discover_files(&file, &config(&file)).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinked_folders() {
        let tmp = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        std::fs::write(elsewhere.path().join("hatcher__at.pdf"), "pdf").unwrap();
        std::os::unix::fs::symlink(
            elsewhere.path(),
            tmp.path().join("topology__topo"),
        )
        .unwrap();

        let files = discover_files(tmp.path(), &config(tmp.path())).unwrap();
        assert_eq!(
            relative_paths(&files),
            vec!["topology__topo/hatcher__at.pdf"]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_keep_their_real_path() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let tmp = tempfile::tempdir().unwrap();
        let folder = tmp.path().join(OsStr::from_bytes(b"alg\xff__a"));
        std::fs::create_dir(&folder).unwrap();
        std::fs::write(
            folder.join(OsStr::from_bytes(b"knuth__t\xffaocp.pdf")),
            "pdf",
        )
        .unwrap();

        let files = discover_files(tmp.path(), &config(tmp.path())).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].absolute_path.exists());
        assert!(files[0].stem().starts_with("knuth__t"));
        assert!(files[0].folder.as_deref().unwrap().ends_with("__a"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_folder_does_not_fail_the_walk() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let locked = tmp.path().join("locked__l");
        std::fs::create_dir(&locked).unwrap();
        std::fs::write(locked.join("a__hidden.pdf"), "pdf").unwrap();
        let open = tmp.path().join("open__o");
        std::fs::create_dir(&open).unwrap();
        std::fs::write(open.join("b__visible.pdf"), "pdf").unwrap();

        let mode = |m| std::fs::Permissions::from_mode(m);
        std::fs::set_permissions(&locked, mode(0o000)).unwrap();
        let result = discover_files(tmp.path(), &config(tmp.path()));
        std::fs::set_permissions(&locked, mode(0o755)).unwrap();

        // Privileged users can still read the folder, so only the readable
        // folder's document is guaranteed.
        let files = result.unwrap();
        let paths = relative_paths(&files);
        assert!(paths.contains(&"open__o/b__visible.pdf".to_string()));
    }

    #[test]
    fn empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let files = discover_files(tmp.path(), &config(tmp.path())).unwrap();
        assert!(files.is_empty());
    }
}
