/// A horizontal rule: a line of three or more `-`, `*` or `_` and nothing else.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const CHARS: [char; 3] = ['-', '*', '_'];
    pub const MIN_LEN: usize = 3;

    pub fn matches(line: &str) -> bool {
        let t = line.trim_end();
        let Some(first) = t.chars().next() else {
            return false;
        };
        Self::CHARS.contains(&first) && t.len() >= Self::MIN_LEN && t.chars().all(|c| c == first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("---", true)]
    #[case("*****", true)]
    #[case("___  ", true)]
    #[case("--", false)]
    #[case("-*-", false)]
    #[case("- - -", false)]
    #[case("", false)]
    fn recognises_rules(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(ThematicBreak::matches(line), expected);
    }
}
