//! Pipe table recognition.

/// Column alignment from the separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    fn from_separator_cell(cell: &str) -> Self {
        match (cell.starts_with(':'), cell.ends_with(':') && cell.len() > 1) {
            (true, true) => Self::Center,
            (false, true) => Self::Right,
            (true, false) => Self::Left,
            (false, false) => Self::None,
        }
    }

    /// Inline style attribute for a cell, empty for unaligned columns.
    pub(crate) fn style_attr(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Left => r#" style="text-align: left""#,
            Self::Center => r#" style="text-align: center""#,
            Self::Right => r#" style="text-align: right""#,
        }
    }
}

/// A table split into raw (not yet inline-rendered) cells.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Table<'a> {
    pub header: Vec<&'a str>,
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<&'a str>>,
}

impl Table<'_> {
    /// Alignment of the given column; columns past the separator are unaligned.
    pub(crate) fn alignment(&self, column: usize) -> Alignment {
        self.alignments
            .get(column)
            .copied()
            .unwrap_or(Alignment::None)
    }
}

/// Try to read a table starting at the first line.
///
/// Needs a header row containing `|` followed by a separator row. Data rows
/// are the following non-blank lines that contain `|`. Returns the table and
/// the number of lines it spans.
pub(crate) fn parse<'a>(lines: &[&'a str]) -> Option<(Table<'a>, usize)> {
    let &header = lines.first()?;
    if !header.contains('|') {
        return None;
    }
    let alignments = parse_separator(lines.get(1)?)?;

    let rows: Vec<Vec<&str>> = lines[2..]
        .iter()
        .take_while(|line| !line.trim().is_empty() && line.contains('|'))
        .map(|&line| split_cells(line))
        .collect();
    let consumed = 2 + rows.len();

    Some((
        Table {
            header: split_cells(header),
            alignments,
            rows,
        },
        consumed,
    ))
}

/// Parse a separator row like `|---|:--:|`.
///
/// Only hyphens, colons, pipes and whitespace are allowed, with at least one
/// hyphen and one pipe.
fn parse_separator(line: &str) -> Option<Vec<Alignment>> {
    let trimmed = line.trim();
    let valid = trimmed.contains('-')
        && trimmed.contains('|')
        && trimmed
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace());
    if !valid {
        return None;
    }

    Some(
        split_cells(trimmed)
            .into_iter()
            .map(Alignment::from_separator_cell)
            .collect(),
    )
}

/// Split a row on `|`, trimming cells and dropping the empty edge cells
/// produced by leading and trailing pipes.
pub(crate) fn split_cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.trim().split('|').map(str::trim).collect();
    if cells.first().is_some_and(|cell| cell.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}
