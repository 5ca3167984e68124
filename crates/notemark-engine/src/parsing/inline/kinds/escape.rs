/// Backslash escapes of delimiter characters.
pub struct Escape;

impl Escape {
    pub const BACKSLASH: char = '\\';

    /// Characters that lose their meaning when preceded by a backslash.
    pub const ESCAPABLE: &'static str = "\\`*_~[]()#|<>!{}+-.";

    /// The escaped character if `rest` starts with a valid escape.
    pub fn match_at(rest: &str) -> Option<char> {
        let mut chars = rest.chars();
        if chars.next() != Some(Self::BACKSLASH) {
            return None;
        }
        chars.next().filter(|c| Self::ESCAPABLE.contains(*c))
    }

    pub fn is_escapable(c: char) -> bool {
        Self::ESCAPABLE.contains(c)
    }
}
