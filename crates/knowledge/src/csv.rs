//! Minimal quote-aware CSV decoding.
//!
//! The reference tables are small flat files: a header row naming the
//! columns, then one record per line. Fields are comma-separated; a field
//! may be wrapped in double quotes to carry embedded commas, and
//! list-valued cells hold a comma-separated list inside one quoted field.
//! This is deliberately not a general CSV implementation (no multi-line
//! fields); it decodes exactly the shape the table files use.

use std::collections::HashMap;

/// Decode CSV content into one header-keyed map per record.
///
/// The first non-empty line names the columns. Missing trailing fields
/// decode as empty strings; surplus fields are dropped.
pub(crate) fn parse_records(content: &str) -> Vec<HashMap<String, String>> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_line
        .split(',')
        .map(|header| header.trim().to_string())
        .collect();

    lines
        .map(|line| {
            let fields = split_record(line);
            headers
                .iter()
                .enumerate()
                .map(|(index, header)| {
                    let value = fields
                        .get(index)
                        .map(|field| strip_quotes(field).to_string())
                        .unwrap_or_default();
                    (header.clone(), value)
                })
                .collect()
        })
        .collect()
}

/// Split one record line on commas, honouring double quotes.
///
/// Quote characters toggle quoted mode and are consumed; a backslash-escaped
/// quote is kept literally.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut previous = None;

    for c in line.chars() {
        if c == '"' && previous != Some('\\') {
            in_quotes = !in_quotes;
        } else if c == ',' && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
        previous = Some(c);
    }
    fields.push(current);

    fields
}

/// Strip one leading and one trailing double quote, independently.
fn strip_quotes(field: &str) -> &str {
    let field = field.strip_prefix('"').unwrap_or(field);
    field.strip_suffix('"').unwrap_or(field)
}

/// Split a list-valued cell into its entries.
///
/// One surrounding quote pair (single or double) is stripped, then the cell
/// splits on commas; entries are trimmed and empties dropped.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    let value = value
        .strip_prefix(['"', '\''])
        .unwrap_or(value);
    let value = value
        .strip_suffix(['"', '\''])
        .unwrap_or(value);

    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
