//! Browsing the tree by subject folder key instead of searching it.

use std::io::{BufRead, Write};

use crate::{
    catalog::Catalog,
    error::Result,
    select::{self, Selection},
};

/// Pick a document by walking folder then file.
///
/// With a `key` naming a subject folder exactly, that folder's documents are
/// listed and one is asked for. Without a key, or with one that names no
/// folder, the folders are listed first and a key is asked for. Root-level
/// files belong to no folder and are only reachable by search.
pub fn browse<'a>(
    catalog: &'a Catalog,
    key: Option<&str>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Selection<'a>> {
    let group = match key.and_then(|k| catalog.group(k)) {
        Some(group) => group,
        None => {
            let groups = catalog.groups();
            if groups.is_empty() {
                tracing::warn!("no subject folders to browse");
                return Ok(Selection::Cancelled);
            }
            if let Some(key) = key {
                writeln!(
                    output,
                    "books: wrong directory key \"{key}\", directory keys:"
                )?;
            }
            match select::choose_group(&groups, input, output)? {
                Some(group) => group,
                None => return Ok(Selection::Cancelled),
            }
        }
    };

    tracing::debug!(
        key = group.key(),
        path = %group.path.display(),
        "browsing folder"
    );
    select::choose(&catalog.in_group(&group), input, output)
}
