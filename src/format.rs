use crate::{
    catalog::{CatalogEntry, SubjectGroup},
    naming::AUTHOR_MARK,
};

/// Column at which listing lines are wrapped.
pub const TEXT_WRAP: usize = 80;

/// Render a name part for humans: underscores become spaces.
pub fn display_name(name: &str) -> String {
    name.replace(AUTHOR_MARK, " ")
}

/// Render an author list as `a, b.`, or `NO_AUTHOR.` when empty.
pub fn format_authors(authors: &[String]) -> String {
    if authors.is_empty() {
        "NO_AUTHOR.".to_string()
    } else {
        format!("{}.", authors.join(", "))
    }
}

/// One-line description of an entry: `authors. title.`
///
/// Entries without authors and without a subject folder keyword (manuals)
/// show just the title.
pub fn describe(entry: &CatalogEntry) -> String {
    let title = display_name(&entry.title);
    if entry.authors.is_empty() && entry.keyword.is_empty() {
        title
    } else {
        format!("{} {title}.", format_authors(&entry.authors))
    }
}

/// Greedy word wrap at `width` columns, counted in characters. Words longer
/// than `width` are kept whole on their own line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut columns = 0;
    for word in text.split_whitespace() {
        let word_columns = word.chars().count();
        if columns > 0 && columns + 1 + word_columns > width {
            lines.push(std::mem::take(&mut current));
            columns = 0;
        }
        if columns > 0 {
            current.push(' ');
            columns += 1;
        }
        current.push_str(word);
        columns += word_columns;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Numbered listing of entries, ids starting at 1:
///
/// ```text
/// (1)  knuth, graham. concrete math.
/// (10) boyd, vandenberghe. convex optimization.
/// ```
///
/// The id column is padded to the widest id and wrapped lines are indented
/// under the text.
pub fn listing(entries: &[&CatalogEntry]) -> String {
    let id_width = entries.len().to_string().len();
    let mut out = String::new();

    for (idx, entry) in entries.iter().enumerate() {
        let id = format!("({})", idx + 1);
        let prefix = format!("{id:<width$}", width = id_width + 2);
        let indent = " ".repeat(prefix.len());
        let text_width = TEXT_WRAP.saturating_sub(prefix.len() + 1).max(20);

        for (line_no, line) in
            wrap(&describe(entry), text_width).iter().enumerate()
        {
            let lead = if line_no == 0 { &prefix } else { &indent };
            out.push_str(lead);
            out.push(' ');
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Listing of subject groups as `(key) subject [documents]`, key column
/// padded to the widest key.
pub fn group_listing(groups: &[SubjectGroup]) -> String {
    let key_width = groups
        .iter()
        .map(|g| g.key().chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for group in groups {
        let key = format!("({})", group.key());
        out.push_str(&format!(
            "{key:<width$} {} [{}]\n",
            display_name(&group.subject),
            group.documents,
            width = key_width + 2,
        ));
    }
    out
}
