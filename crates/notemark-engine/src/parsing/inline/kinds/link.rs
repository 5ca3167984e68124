use super::Escape;

/// Markdown `[text](href)` links.
pub struct Link;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkMatch<'a> {
    pub text: &'a str,
    pub href: &'a str,
    pub len: usize,
}

impl Link {
    pub const TEXT_OPEN: char = '[';
    pub const TEXT_CLOSE: char = ']';
    pub const HREF_OPEN: char = '(';
    pub const HREF_CLOSE: char = ')';

    /// Matches a link at the start of `rest`.
    ///
    /// Both segments are scanned for their balanced closer, so brackets in
    /// the text and parentheses in the href survive. An optional title after
    /// the href is dropped.
    pub fn match_at(rest: &str) -> Option<LinkMatch<'_>> {
        if !rest.starts_with(Self::TEXT_OPEN) {
            return None;
        }
        let text_close = balanced_close(rest, Self::TEXT_OPEN, Self::TEXT_CLOSE)?;
        let tail = &rest[text_close + 1..];
        if !tail.starts_with(Self::HREF_OPEN) {
            return None;
        }
        let href_close = balanced_close(tail, Self::HREF_OPEN, Self::HREF_CLOSE)?;
        let href = destination(&tail[1..href_close])?;
        Some(LinkMatch {
            text: &rest[1..text_close],
            href,
            len: text_close + 1 + href_close + 1,
        })
    }
}

/// Offset of the closer matching the opener at `s[0]`.
fn balanced_close(s: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            Escape::BACKSLASH => {
                chars.next();
            }
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// The href part of a link destination: `<...>` or the first token.
fn destination(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let href = match raw.strip_prefix('<') {
        Some(inner) => &inner[..inner.find('>')?],
        None => raw.split_whitespace().next()?,
    };
    (!href.is_empty()).then_some(href)
}
