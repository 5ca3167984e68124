use serde::{Deserialize, Serialize};

/// A formatting annotation on a text node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "attrs", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Strike,
    Code,
    Link(LinkAttrs),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
    pub target: String,
    pub rel: String,
}

impl LinkAttrs {
    pub const TARGET: &'static str = "_blank";
    pub const REL: &'static str = "noopener noreferrer nofollow";

    /// Link attributes for an imported markdown link: always opens externally.
    pub fn external(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            target: Self::TARGET.to_string(),
            rel: Self::REL.to_string(),
        }
    }
}

/// Order-insensitive equality of two mark lists.
pub fn same_mark_set(a: &[Mark], b: &[Mark]) -> bool {
    a.len() == b.len() && a.iter().all(|m| b.contains(m)) && b.iter().all(|m| a.contains(m))
}

/// The marks in effect at some point of an inline scan.
///
/// Never mutated in place: entering a delimiter produces a new set via
/// [`ActiveMarks::with`], so returning from the nested scan restores the
/// outer set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveMarks(Vec<Mark>);

impl ActiveMarks {
    /// A copy of `self` with `mark` appended, unless already present.
    #[must_use]
    pub fn with(&self, mark: Mark) -> Self {
        let mut marks = self.0.clone();
        if !marks.contains(&mark) {
            marks.push(mark);
        }
        Self(marks)
    }

    pub fn contains(&self, mark: &Mark) -> bool {
        self.0.contains(mark)
    }

    pub fn as_slice(&self) -> &[Mark] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<Mark> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_does_not_modify_original() {
        let outer = ActiveMarks::default().with(Mark::Bold);
        let inner = outer.with(Mark::Italic);
        assert_eq!(outer.as_slice(), &[Mark::Bold]);
        assert_eq!(inner.as_slice(), &[Mark::Bold, Mark::Italic]);
    }

    #[test]
    fn with_ignores_duplicates() {
        let marks = ActiveMarks::default().with(Mark::Italic).with(Mark::Italic);
        assert_eq!(marks.as_slice(), &[Mark::Italic]);
    }

    #[test]
    fn mark_sets_compare_without_order() {
        assert!(same_mark_set(
            &[Mark::Bold, Mark::Code],
            &[Mark::Code, Mark::Bold]
        ));
        assert!(!same_mark_set(&[Mark::Bold], &[Mark::Bold, Mark::Code]));
    }

    #[test]
    fn link_mark_serializes_attrs() {
        let json = serde_json::to_value(Mark::Link(LinkAttrs::external("https://x.y"))).unwrap();
        assert_eq!(json["type"], "link");
        assert_eq!(json["attrs"]["href"], "https://x.y");
        assert_eq!(json["attrs"]["rel"], LinkAttrs::REL);
    }
}
