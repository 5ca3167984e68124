/// A cursor for character-by-character inline parsing.
///
/// Positions are byte offsets into `s` and always sit on char boundaries.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    /// Peeks at the current character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character just before the cursor.
    pub fn prev(&self) -> Option<char> {
        self.s[..self.i.min(self.s.len())].chars().next_back()
    }

    /// Checks if the remaining input starts with `pat`.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// Advances by one character, returning it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some('h'));
        assert_eq!(cur.prev(), None);
        assert_eq!(cur.bump(), Some('h'));
        assert_eq!(cur.prev(), Some('h'));
        assert_eq!(cur.rest(), "ello");
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("[[link]]");
        assert!(cur.starts_with("[["));
        assert!(!cur.starts_with("]]"));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.rest(), "");
    }

    #[test]
    fn bump_steps_over_multibyte_chars() {
        let mut cur = Cursor::new("é#");
        assert_eq!(cur.bump(), Some('é'));
        assert_eq!(cur.i, 2);
        assert_eq!(cur.prev(), Some('é'));
        assert_eq!(cur.peek(), Some('#'));
    }

    #[test]
    fn bump_n_past_end_is_eof() {
        // bump_n does not bounds check; caller must ensure validity
        let mut cur = Cursor::new("hi");
        cur.bump_n(10);
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.rest(), "");
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x");
        assert_eq!(cur.bump(), Some('x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }
}
