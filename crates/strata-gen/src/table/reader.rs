//! Line reader for declarative node-kind tables.
//!
//! Splits raw table text into module headers and column rows, keeping byte
//! ranges so later stages can point diagnostics at the exact cell. Comment
//! paragraphs (`#`) and blank lines are dropped here; nothing downstream ever
//! sees raw comment syntax.

use rowan::TextRange;

/// One structural line of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableItem {
    /// `module NAME` or `module NAME : UPSTREAM`
    Header {
        name: TextRange,
        upstream: Option<TextRange>,
        range: TextRange,
    },
    /// A `|`-separated row.
    Row(RowRecord),
}

/// A row split into trimmed cells. Cell count is not checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRecord {
    pub cols: Vec<TextRange>,
    pub range: TextRange,
}

/// Splits table text into headers and rows.
pub fn read(source: &str) -> Vec<TableItem> {
    let mut items = Vec::new();
    let mut offset = 0usize;

    for raw_line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();

        let line = raw_line.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(header) = read_header(line, line_start) {
            items.push(header);
            continue;
        }

        items.push(TableItem::Row(read_row(line, line_start)));
    }

    items
}

/// Retrieves the text slice for a range produced by [`read`].
#[inline]
pub fn item_text<'src>(source: &'src str, range: TextRange) -> &'src str {
    &source[std::ops::Range::<usize>::from(range)]
}

fn read_header(line: &str, line_start: usize) -> Option<TableItem> {
    if line.contains('|') {
        return None;
    }
    let lead = line.len() - line.trim_start().len();
    let rest = line.trim_start().strip_prefix("module")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest_start = line_start + lead + "module".len();

    let (name_part, upstream_part) = match rest.split_once(':') {
        Some((name, upstream)) => (name, Some(upstream)),
        None => (rest, None),
    };
    let name = trimmed_range(name_part, rest_start);
    if name.is_empty() {
        return None;
    }
    let upstream = upstream_part.and_then(|part| {
        let start = rest_start + name_part.len() + 1;
        let range = trimmed_range(part, start);
        (!range.is_empty()).then_some(range)
    });

    Some(TableItem::Header {
        name,
        upstream,
        range: trimmed_range(line, line_start),
    })
}

fn read_row(line: &str, line_start: usize) -> RowRecord {
    let mut cols = Vec::new();
    let mut col_start = line_start;
    for cell in line.split('|') {
        cols.push(trimmed_range(cell, col_start));
        col_start += cell.len() + 1;
    }
    RowRecord {
        cols,
        range: trimmed_range(line, line_start),
    }
}

/// Range of `text` with surrounding whitespace stripped, shifted by `start`.
fn trimmed_range(text: &str, start: usize) -> TextRange {
    let lead = text.len() - text.trim_start().len();
    let s = start + lead;
    let e = s + text.trim().len();
    TextRange::new((s as u32).into(), (e as u32).into())
}
