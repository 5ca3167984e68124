/// `#tag` references.
pub struct Tag;

impl Tag {
    pub const HASH: char = '#';
    pub const MIN_LEN: usize = 2;
    pub const MAX_LEN: usize = 50;

    fn is_name_char(c: char) -> bool {
        c.is_alphanumeric() || c == '-' || c == '_'
    }

    /// Matches `#name` at the start of `rest`; `prev` is the character
    /// before the `#`, which must be whitespace or absent.
    ///
    /// A name starts alphanumeric and continues with alphanumerics, `-` or
    /// `_`. Runs outside `MIN_LEN..=MAX_LEN` characters are not tags.
    pub fn match_at(rest: &str, prev: Option<char>) -> Option<&str> {
        if prev.is_some_and(|c| !c.is_whitespace()) {
            return None;
        }
        let body = rest.strip_prefix(Self::HASH)?;
        if !body.chars().next().is_some_and(char::is_alphanumeric) {
            return None;
        }
        let end = body
            .char_indices()
            .find(|&(_, c)| !Self::is_name_char(c))
            .map_or(body.len(), |(i, _)| i);
        let name = &body[..end];
        (Self::MIN_LEN..=Self::MAX_LEN)
            .contains(&name.chars().count())
            .then_some(name)
    }

    /// Whether `name` would parse back as a whole plain tag.
    pub fn is_valid_name(name: &str) -> bool {
        Self::match_at(&format!("{}{name}", Self::HASH), None) == Some(name)
    }
}
