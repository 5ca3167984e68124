/// Blockquote block type with owned delimiter constant.
///
/// Only one level of `>` is stripped at a time; deeper levels are handled by
/// the block parser recursing on the dedented body.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Whether the line carries a quote prefix.
    pub fn is_quoted(line: &str) -> bool {
        line.trim_start_matches(' ').starts_with(Self::PREFIX)
    }

    /// Strips one `> ` or `>` prefix, returning the remainder.
    ///
    /// Lines without a prefix are returned unchanged.
    pub fn strip_prefix(line: &str) -> &str {
        match line.trim_start_matches(' ').strip_prefix(Self::PREFIX) {
            Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
            None => line,
        }
    }
}
