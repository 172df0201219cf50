//! Query resolution against a [`Catalog`].
//!
//! Every search term must match at least one field of an entry (subject,
//! keyword, any author, or title) as a case-insensitive substring. Matching
//! entries are ranked by how many distinct fields were hit, then by path.

use std::fmt;

use crate::catalog::{Catalog, CatalogEntry};

/// Normalized search terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    /// Build a query from raw terms. Terms are lowercased and empty terms
    /// are dropped; nothing else about a term is rewritten.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .filter_map(|t| {
                let t = t.as_ref();
                (!t.is_empty()).then(|| t.to_lowercase())
            })
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.terms.join(" "))
    }
}

/// Which fields of an entry a query touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldHits {
    pub subject: bool,
    pub keyword: bool,
    pub authors: bool,
    pub title: bool,
}

impl FieldHits {
    pub fn count(&self) -> usize {
        [self.subject, self.keyword, self.authors, self.title]
            .iter()
            .filter(|hit| **hit)
            .count()
    }
}

/// A matching entry with the fields it matched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<'a> {
    pub entry: &'a CatalogEntry,
    pub hits: FieldHits,
}

/// Resolve `query` against `catalog`, best matches first.
///
/// An empty query matches every entry. No match yields an empty vector.
pub fn resolve<'a>(
    catalog: &'a Catalog,
    query: &Query,
) -> Vec<&'a CatalogEntry> {
    rank(catalog, query).into_iter().map(|r| r.entry).collect()
}

/// Like [`resolve`], keeping the per-field hits of every match.
pub fn rank<'a>(catalog: &'a Catalog, query: &Query) -> Vec<Ranked<'a>> {
    let mut ranked: Vec<Ranked<'a>> = catalog
        .iter()
        .filter_map(|entry| {
            match_entry(entry, query).map(|hits| Ranked { entry, hits })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.hits
            .count()
            .cmp(&a.hits.count())
            .then_with(|| a.entry.path.cmp(&b.entry.path))
    });

    tracing::debug!(query = %query, matches = ranked.len(), "resolved query");
    ranked
}

/// Match one entry. Returns `None` unless every term hits some field.
pub fn match_entry(entry: &CatalogEntry, query: &Query) -> Option<FieldHits> {
    let subject = entry.subject.to_lowercase();
    let keyword = entry.keyword.to_lowercase();
    let authors: Vec<String> =
        entry.authors.iter().map(|a| a.to_lowercase()).collect();
    let title = entry.title.to_lowercase();

    let mut hits = FieldHits::default();
    for term in query.terms() {
        // Names use `_` where people type spaces, so `concrete math` also
        // tries `concrete_math`.
        let underscored = term
            .contains(char::is_whitespace)
            .then(|| term.replace(char::is_whitespace, "_"));
        let hit = |field: &str| {
            field.contains(term.as_str())
                || underscored.as_deref().is_some_and(|u| field.contains(u))
        };

        let in_subject = hit(subject.as_str());
        let in_keyword = hit(keyword.as_str());
        let in_authors = authors.iter().any(|a| hit(a.as_str()));
        let in_title = hit(title.as_str());

        if !(in_subject || in_keyword || in_authors || in_title) {
            return None;
        }

        hits.subject |= in_subject;
        hits.keyword |= in_keyword;
        hits.authors |= in_authors;
        hits.title |= in_title;
    }
    Some(hits)
}
