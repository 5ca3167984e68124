/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters - they are the default block when no other
/// opener matches. Their lines are joined with literal newlines and inline
/// parsed as one unit, so a trailing double space before a newline becomes a
/// hard break while a bare newline stays in the text.
pub struct Paragraph;

impl Paragraph {
    pub const LINE_JOIN: &'static str = "\n";

    pub fn join(lines: &[&str]) -> String {
        lines.join(Self::LINE_JOIN)
    }
}
