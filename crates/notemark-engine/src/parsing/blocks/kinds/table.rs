/// Pipe table syntax.
///
/// A table starts at a `|` line directly followed by a separator row such as
/// `| --- | :-: |`. Cells are split on unescaped pipes; `\|` stays in the
/// cell text for the inline parser to unescape. As in GFM, an unescaped pipe
/// inside a code span still splits the cell.
///
/// Every row is fitted to the header width: short rows are padded with empty
/// cells, long rows are truncated.
pub struct Table;

impl Table {
    pub const PIPE: char = '|';

    pub fn is_row(line: &str) -> bool {
        line.trim_start().starts_with(Self::PIPE)
    }

    /// `|` followed only by whitespace, dashes, colons and pipes, with at
    /// least one dash.
    pub fn is_separator(line: &str) -> bool {
        let t = line.trim();
        t.starts_with(Self::PIPE)
            && t.contains('-')
            && t.chars()
                .all(|c| c == Self::PIPE || c == '-' || c == ':' || c.is_whitespace())
    }

    /// Splits a row into trimmed cell texts.
    pub fn split_cells(line: &str) -> Vec<&str> {
        let t = line.trim();
        let t = t.strip_prefix(Self::PIPE).unwrap_or(t);
        let t = match t.strip_suffix(Self::PIPE) {
            Some(inner) if !inner.ends_with('\\') => inner,
            _ => t,
        };

        let mut cells = Vec::new();
        let mut start = 0;
        let mut escaped = false;
        for (i, c) in t.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                Self::PIPE => {
                    cells.push(t[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            }
        }
        cells.push(t[start..].trim());
        cells
    }

    /// Pads short rows with empty cells and truncates long rows so every row
    /// has exactly `width` cells.
    pub fn fit_row(mut cells: Vec<&str>, width: usize) -> Vec<&str> {
        cells.resize(width, "");
        cells
    }
}
