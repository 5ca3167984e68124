/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: their content is copied verbatim and no other
/// inline parsing happens inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: char = '`';

    /// Matches a code span at the start of `rest`.
    ///
    /// The closing run must have the same length as the opening one, so
    /// ``` `` a ` b `` ``` keeps its inner backtick. Returns the content and
    /// the number of bytes consumed.
    pub fn match_at(rest: &str) -> Option<(&str, usize)> {
        let open = rest.chars().take_while(|&c| c == Self::TICK).count();
        if open == 0 {
            return None;
        }
        let body = &rest[open..];
        let mut i = 0;
        while i < body.len() {
            let Some(offset) = body[i..].find(Self::TICK) else {
                return None;
            };
            let at = i + offset;
            let run = body[at..].chars().take_while(|&c| c == Self::TICK).count();
            if run == open {
                let content = &body[..at];
                if content.is_empty() {
                    return None;
                }
                return Some((content, open + at + run));
            }
            i = at + run;
        }
        None
    }
}
