use crate::document::Mark;

use super::Escape;

/// Emphasis and strikethrough delimiter runs, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    DoubleStar,
    DoubleUnderscore,
    DoubleTilde,
    Star,
    Underscore,
}

impl Delimiter {
    pub const ORDER: [Delimiter; 5] = [
        Delimiter::DoubleStar,
        Delimiter::DoubleUnderscore,
        Delimiter::DoubleTilde,
        Delimiter::Star,
        Delimiter::Underscore,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Delimiter::DoubleStar => "**",
            Delimiter::DoubleUnderscore => "__",
            Delimiter::DoubleTilde => "~~",
            Delimiter::Star => "*",
            Delimiter::Underscore => "_",
        }
    }

    pub fn mark(self) -> Mark {
        match self {
            Delimiter::DoubleStar | Delimiter::DoubleUnderscore => Mark::Bold,
            Delimiter::DoubleTilde => Mark::Strike,
            Delimiter::Star | Delimiter::Underscore => Mark::Italic,
        }
    }

    fn char(self) -> char {
        match self {
            Delimiter::DoubleStar | Delimiter::Star => '*',
            Delimiter::DoubleUnderscore | Delimiter::Underscore => '_',
            Delimiter::DoubleTilde => '~',
        }
    }

    fn is_double(self) -> bool {
        self.token().len() == 2
    }

    fn is_underscore(self) -> bool {
        self.char() == '_'
    }

    /// Matches this delimiter pair at the start of `rest`; `prev` is the
    /// character before the opener.
    ///
    /// Returns the interior and the number of bytes consumed.
    pub fn match_at(self, rest: &str, prev: Option<char>) -> Option<(&str, usize)> {
        let token = self.token();
        let after = rest.strip_prefix(token)?;
        let first = after.chars().next()?;
        if first.is_whitespace() {
            return None;
        }
        // A single delimiter must not be the start of a double one.
        if !self.is_double() && (first == self.char() || prev == Some(self.char())) {
            return None;
        }
        if self.is_underscore() && prev.is_some_and(char::is_alphanumeric) {
            return None;
        }
        let close = self.find_closer(after)?;
        Some((&after[..close], token.len() * 2 + close))
    }

    /// Byte offset in `after` of the closing delimiter.
    ///
    /// Escaped characters are skipped. A closer must follow a non-whitespace
    /// character. In a longer run the closer is taken from the end of the run.
    fn find_closer(self, after: &str) -> Option<usize> {
        let c = self.char();
        let mut prev: Option<char> = None;
        let mut chars = after.char_indices();
        while let Some((j, ch)) = chars.next() {
            if ch == Escape::BACKSLASH {
                prev = chars.next().map(|(_, escaped)| escaped);
                continue;
            }
            if ch != c {
                prev = Some(ch);
                continue;
            }

            let run = after[j..].chars().take_while(|&r| r == c).count();
            let next = after[j + run..].chars().next();
            let cannot_close = j == 0 || prev.is_some_and(char::is_whitespace);
            let intraword = self.is_underscore() && next.is_some_and(char::is_alphanumeric);
            let closer = match (self.is_double(), run) {
                _ if cannot_close || intraword => None,
                (true, run) if run >= 2 => Some(j + run - 2),
                (false, 1) => Some(j),
                // `*a **b***`: the last star closes the outer italic
                (false, run) if run >= 3 && run % 2 == 1 => Some(j + run - 1),
                _ => None,
            };
            if closer.is_some() {
                return closer;
            }
            // Skip the rest of the run.
            for _ in 1..run {
                chars.next();
            }
            prev = Some(c);
        }
        None
    }
}
