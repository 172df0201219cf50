//! In-memory catalog of a document tree.
//!
//! The catalog is rebuilt from disk on every run: [`build`] walks the root,
//! parses folder and file names with the [`naming`](crate::naming)
//! convention and keeps one [`CatalogEntry`] per document, ordered by path.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    config::Config,
    error::Result,
    naming,
    walker::{self, DiscoveredFile},
};

/// A single document of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Subject of the parent folder; empty for documents in the root.
    pub subject: String,
    /// Keyword of the parent folder; empty when the folder has no `__` mark.
    pub keyword: String,
    pub authors: Vec<String>,
    pub title: String,
    /// Absolute path of the document.
    pub path: PathBuf,
}

/// A subject folder that holds at least one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectGroup {
    pub subject: String,
    pub keyword: String,
    pub path: PathBuf,
    pub documents: usize,
}

impl SubjectGroup {
    /// Short name used to pick the folder: its keyword, or the subject for
    /// folders without one.
    pub fn key(&self) -> &str {
        if self.keyword.is_empty() {
            &self.subject
        } else {
            &self.keyword
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

/// Build the catalog for `config.root`.
///
/// Fails with [`Error::NotFound`](crate::Error::NotFound) when the root does
/// not exist or cannot be read. Names that do not follow the convention are
/// kept with empty fields.
pub fn build(config: &Config) -> Result<Catalog> {
    let files = walker::discover_files(&config.root, config)?;
    tracing::debug!(
        root = %config.root.display(),
        files = files.len(),
        "discovered documents"
    );

    let entries: Vec<CatalogEntry> = files.iter().map(entry_for).collect();
    Ok(Catalog::from_entries(entries))
}

fn entry_for(file: &DiscoveredFile) -> CatalogEntry {
    let (subject, keyword, scheme_folder) = match &file.folder {
        Some(folder) => {
            let parsed = naming::parse_folder_name(folder);
            if !parsed.conforms {
                tracing::debug!(folder = %folder, "folder has no keyword");
            }
            (parsed.subject, parsed.keyword, parsed.conforms)
        }
        None => (String::new(), String::new(), false),
    };

    let stem = file.stem();
    let parsed = naming::parse_file_stem(&stem);
    // Files in a `subject__keyword` folder are expected to name their authors.
    if scheme_folder && !parsed.conforms {
        tracing::warn!(
            path = %file.relative_path.display(),
            "file name does not match the authors__title pattern"
        );
    }

    CatalogEntry {
        subject,
        keyword,
        authors: parsed.authors,
        title: parsed.title,
        path: file.absolute_path.clone(),
    }
}

impl Catalog {
    /// Wrap entries, sorting them by path.
    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> Self {
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Subject folders with their document counts, sorted by folder path.
    pub fn groups(&self) -> Vec<SubjectGroup> {
        let mut groups: Vec<SubjectGroup> = Vec::new();
        for entry in &self.entries {
            if entry.subject.is_empty() && entry.keyword.is_empty() {
                continue;
            }
            let Some(folder) = entry.path.parent() else {
                continue;
            };
            // Entries are path ordered, so documents of one folder are adjacent.
            match groups.last_mut() {
                Some(group) if group.path == folder => group.documents += 1,
                _ => groups.push(SubjectGroup {
                    subject: entry.subject.clone(),
                    keyword: entry.keyword.clone(),
                    path: folder.to_path_buf(),
                    documents: 1,
                }),
            }
        }
        groups
    }

    /// Documents of one subject folder, in path order.
    pub fn in_group(&self, group: &SubjectGroup) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.path.parent() == Some(group.path.as_path()))
            .collect()
    }

    /// The subject folder whose key is exactly `key`.
    pub fn group(&self, key: &str) -> Option<SubjectGroup> {
        self.groups().into_iter().find(|g| g.key() == key)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "%PDF").unwrap();
    }

    #[test]
    fn parses_subject_keyword_authors_and_title() {
        let tmp = tempfile::tempdir().unwrap();
        touch(
            &tmp.path()
                .join("optimization__opt")
                .join("knuth_graham__concrete_math.pdf"),
        );

        let catalog = build(&Config::with_root(tmp.path())).unwrap();
        assert_eq!(catalog.len(), 1);

        let entry = &catalog.entries()[0];
        assert_eq!(entry.subject, "optimization");
        assert_eq!(entry.keyword, "opt");
        assert_eq!(entry.authors, vec!["knuth", "graham"]);
        assert_eq!(entry.title, "concrete_math");
        assert!(entry.path.is_absolute());
        assert!(
            entry
                .path
                .ends_with("optimization__opt/knuth_graham__concrete_math.pdf")
        );
    }

    #[test]
    fn manuals_folder_without_marks() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("manuals").join("router_manual.pdf"));

        let catalog = build(&Config::with_root(tmp.path())).unwrap();
        let entry = &catalog.entries()[0];
        assert_eq!(entry.subject, "manuals");
        assert_eq!(entry.keyword, "");
        assert!(entry.authors.is_empty());
        assert_eq!(entry.title, "router_manual");
    }

    #[test]
    fn nonconforming_file_in_scheme_folder_is_kept() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("topology__topo").join("lecture_notes.pdf"));

        let catalog = build(&Config::with_root(tmp.path())).unwrap();
        let entry = &catalog.entries()[0];
        assert_eq!(entry.subject, "topology");
        assert_eq!(entry.keyword, "topo");
        assert!(entry.authors.is_empty());
        assert_eq!(entry.title, "lecture_notes");
    }

    #[test]
    fn root_level_files_have_empty_subject() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("cormen_leiserson__algorithms.pdf"));

        let catalog = build(&Config::with_root(tmp.path())).unwrap();
        let entry = &catalog.entries()[0];
        assert_eq!(entry.subject, "");
        assert_eq!(entry.keyword, "");
        assert_eq!(entry.authors, vec!["cormen", "leiserson"]);
        assert!(catalog.groups().is_empty());
    }

    #[test]
    fn missing_root_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err =
            build(&Config::with_root(tmp.path().join("missing"))).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn consecutive_builds_are_identical() {
        let tmp = tempfile::tempdir().unwrap();
        for path in [
            "zeta__z/b__two.pdf",
            "alpha__a/c__three.epub",
            "alpha__a/a__one.djvu",
            "manuals/tv.pdf",
        ] {
            touch(&tmp.path().join(path));
        }

        let config = Config::with_root(tmp.path());
        let first = build(&config).unwrap();
        let second = build(&config).unwrap();
        assert_eq!(first, second);

        let titles: Vec<_> = first.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "three", "tv", "two"]);
    }

    #[test]
    fn groups_count_documents_per_folder() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("algebra__alg/lang__algebra.pdf"));
        touch(&tmp.path().join("algebra__alg/artin__algebra.pdf"));
        touch(&tmp.path().join("topology__topo/munkres__topology.pdf"));
        std::fs::create_dir(tmp.path().join("empty__e")).unwrap();

        let catalog = build(&Config::with_root(tmp.path())).unwrap();
        let groups = catalog.groups();
        let summary: Vec<_> = groups
            .iter()
            .map(|g| (g.keyword.as_str(), g.documents))
            .collect();
        assert_eq!(summary, vec![("alg", 2), ("topo", 1)]);
    }

    #[test]
    fn group_lookup_is_exact_and_lists_its_documents() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("algebra__alg/lang__algebra.pdf"));
        touch(&tmp.path().join("algebra__alg/artin__algebra.pdf"));
        touch(&tmp.path().join("algebraic_topology__algtop/hatcher__at.pdf"));
        touch(&tmp.path().join("manuals/router_manual.pdf"));

        let catalog = build(&Config::with_root(tmp.path())).unwrap();
        let group = catalog.group("alg").unwrap();
        assert_eq!(group.subject, "algebra");
        let authors: Vec<_> = catalog
            .in_group(&group)
            .iter()
            .map(|e| e.authors[0].as_str())
            .collect();
        assert_eq!(authors, vec!["artin", "lang"]);

        assert!(catalog.group("al").is_none());
        assert_eq!(catalog.group("manuals").unwrap().documents, 1);
    }
}
