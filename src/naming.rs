//! The two-level naming convention of a document tree.
//!
//! Subject folders are named `subject__keyword` and documents inside them
//! `authors__title.ext`, where `authors` is an underscore separated list of
//! surnames. Names without the `__` mark are still accepted: a folder becomes
//! a subject with an empty keyword and a file becomes a bare title.

/// Separates subject from keyword and authors from title.
pub const SPLIT_MARK: &str = "__";

/// Separates individual authors inside the authors part.
pub const AUTHOR_MARK: char = '_';

/// A parsed subject folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderName {
    pub subject: String,
    pub keyword: String,
    /// Whether the name carried the `__` mark.
    pub conforms: bool,
}

/// A parsed document file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    pub authors: Vec<String>,
    pub title: String,
    /// Whether the stem carried the `__` mark.
    pub conforms: bool,
}

/// Split `name` on the first occurrence of [`SPLIT_MARK`].
pub fn split_mark(name: &str) -> Option<(&str, &str)> {
    name.split_once(SPLIT_MARK)
}

pub fn parse_folder_name(name: &str) -> FolderName {
    match split_mark(name) {
        Some((subject, keyword)) => FolderName {
            subject: subject.to_string(),
            keyword: keyword.to_string(),
            conforms: true,
        },
        None => FolderName {
            subject: name.to_string(),
            keyword: String::new(),
            conforms: false,
        },
    }
}

/// Parse a file stem (the base name with its extension already stripped).
pub fn parse_file_stem(stem: &str) -> FileName {
    match split_mark(stem) {
        Some((authors, title)) => FileName {
            authors: split_authors(authors),
            title: title.to_string(),
            conforms: true,
        },
        None => FileName {
            authors: Vec::new(),
            title: stem.to_string(),
            conforms: false,
        },
    }
}

/// Split the authors part into individual names, dropping empty tokens.
pub fn split_authors(part: &str) -> Vec<String> {
    part.split(AUTHOR_MARK)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
