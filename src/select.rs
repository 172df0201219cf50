//! What to do when a query resolves to more than one document.

use std::io::{BufRead, Write};

use clap::ValueEnum;

use crate::{
    catalog::{CatalogEntry, SubjectGroup},
    error::Result,
    format,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SelectPolicy {
    /// List the matches and ask which one to open
    #[default]
    Prompt,
    /// Open the best-ranked match
    First,
    /// Open every match
    All,
    /// Only list the matches
    List,
}

/// Outcome of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    Open(Vec<&'a CatalogEntry>),
    Cancelled,
}

/// Apply `policy` to ranked `matches`.
///
/// A single match is always selected. Listings and the prompt are written to
/// `output`; answers are read from `input`.
pub fn select<'a>(
    policy: SelectPolicy,
    matches: &[&'a CatalogEntry],
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<Selection<'a>> {
    if matches.len() == 1 {
        return Ok(Selection::Open(matches.to_vec()));
    }
    if matches.is_empty() {
        return Ok(Selection::Cancelled);
    }

    match policy {
        SelectPolicy::First => Ok(Selection::Open(vec![matches[0]])),
        SelectPolicy::All => Ok(Selection::Open(matches.to_vec())),
        SelectPolicy::List => {
            output.write_all(format::listing(matches).as_bytes())?;
            Ok(Selection::Cancelled)
        }
        SelectPolicy::Prompt => choose(matches, &mut input, &mut output),
    }
}

/// List `entries` and ask for an id until a valid one, `q` or end of input.
///
/// Unlike [`select`], a single entry is still listed and asked for.
pub fn choose<'a>(
    entries: &[&'a CatalogEntry],
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Selection<'a>> {
    output.write_all(format::listing(entries).as_bytes())?;
    loop {
        let Some(answer) = ask(input, output, "type (id) to open")? else {
            return Ok(Selection::Cancelled);
        };
        match answer.parse::<usize>() {
            Ok(id) if (1..=entries.len()).contains(&id) => {
                return Ok(Selection::Open(vec![entries[id - 1]]));
            }
            _ => tracing::debug!(answer = %answer, "ignoring unknown id"),
        }
    }
}

/// List subject `groups` and ask for a key until one matches exactly, `q` or
/// end of input.
pub fn choose_group(
    groups: &[SubjectGroup],
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<SubjectGroup>> {
    output.write_all(format::group_listing(groups).as_bytes())?;
    loop {
        let Some(answer) = ask(input, output, "type (key) to browse")? else {
            return Ok(None);
        };
        match groups.iter().find(|g| g.key() == answer) {
            Some(group) => return Ok(Some(group.clone())),
            None => tracing::debug!(answer = %answer, "ignoring unknown key"),
        }
    }
}

/// Write the prompt and read one trimmed answer. `None` on `q` or end of
/// input.
fn ask(
    input: &mut impl BufRead,
    output: &mut impl Write,
    action: &str,
) -> Result<Option<String>> {
    write!(output, "books: {action} | 'q' to quit: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    let answer = line.trim();
    if answer == "q" {
        return Ok(None);
    }
    Ok(Some(answer.to_string()))
}
