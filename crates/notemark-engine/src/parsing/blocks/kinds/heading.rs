/// ATX heading syntax: one to six `#` followed by a space.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 6;

    /// Returns the level and the heading text.
    ///
    /// Seven or more `#` never match, so such lines fall through to later rules.
    pub fn parse(line: &str) -> Option<(u8, &str)> {
        let level = line.chars().take_while(|&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        let rest = line[level..].strip_prefix(' ')?;
        Some((level as u8, rest.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", Some((1, "Title")))]
    #[case("###### Six", Some((6, "Six")))]
    #[case("## spaced  ", Some((2, "spaced")))]
    #[case("####### Seven", None)]
    #[case("#NoSpace", None)]
    #[case("#", None)]
    #[case("plain", None)]
    fn parses_heading_lines(#[case] line: &str, #[case] expected: Option<(u8, &str)>) {
        assert_eq!(Heading::parse(line), expected);
    }
}
