use super::kinds::{BlockQuote, CodeFence, FenceOpen, Heading, ListItemLine, Table, ThematicBreak};

/// Classification of a single line containing only local facts.
///
/// Patterns are tried in block priority order; the first match wins. Whether
/// a [`LineClass::TableRow`] actually starts a table depends on the next line,
/// so that decision is left to the block parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Blank,
    FenceOpen(FenceOpen<'a>),
    Heading { level: u8, text: &'a str },
    ThematicBreak,
    Quote,
    TableRow,
    ListItem(ListItemLine<'a>),
    Text,
}

impl LineClass<'_> {
    /// Whether a line of this class interrupts a running paragraph.
    ///
    /// Table rows are excluded here; they only interrupt when a separator
    /// row follows.
    pub fn interrupts_paragraph(&self) -> bool {
        !matches!(self, LineClass::TableRow | LineClass::Text)
    }
}

/// Classifies `line` into a [`LineClass`].
pub fn classify(line: &str) -> LineClass<'_> {
    if line.trim().is_empty() {
        return LineClass::Blank;
    }
    if let Some(open) = CodeFence::open(line) {
        return LineClass::FenceOpen(open);
    }
    if let Some((level, text)) = Heading::parse(line) {
        return LineClass::Heading { level, text };
    }
    if ThematicBreak::matches(line) {
        return LineClass::ThematicBreak;
    }
    if BlockQuote::is_quoted(line) {
        return LineClass::Quote;
    }
    if Table::is_row(line) {
        return LineClass::TableRow;
    }
    if let Some(item) = ListItemLine::parse(line) {
        return LineClass::ListItem(item);
    }
    LineClass::Text
}
