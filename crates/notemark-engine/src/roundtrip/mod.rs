//! # Round-Trip Verification
//!
//! Structural diff of an original tree against the tree produced by
//! exporting it to markdown and importing it again.
//!
//! Every discrepancy is classified:
//!
//! - **semantic**: real information was lost (different node kind, changed
//!   text, a mark that disappeared, a changed id/color/level/checked state,
//!   a different number of children)
//! - **cosmetic**: no meaning lost (whitespace, mark order, an added mark,
//!   other attribute changes)
//! - **lossless**: a normalization that preserves content exactly (text
//!   node merging, `""` vs `"plaintext"` code language)
//!
//! Marks are asymmetric: losing a mark is loss, gaining one is not.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{AttrValue, Mark, Node, has_mergeable_text, merge_adjacent_text};

/// Attributes whose change always counts as data loss.
pub const SEMANTIC_ATTRS: [&str; 4] = ["id", "color", "level", "checked"];

/// Code-block languages that mean "no language".
const PLAIN_LANGUAGES: [&str; 2] = ["", "plaintext"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffCategory {
    Lossless,
    Cosmetic,
    Semantic,
}

impl fmt::Display for DiffCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiffCategory::Lossless => "lossless",
            DiffCategory::Cosmetic => "cosmetic",
            DiffCategory::Semantic => "semantic",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    /// Location in the original tree, e.g. `doc.content[2].attrs.level`.
    pub path: String,
    pub category: DiffCategory,
    pub original: Value,
    pub imported: Value,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTripReport {
    pub identical: bool,
    pub lossless_count: usize,
    pub cosmetic_count: usize,
    pub semantic_count: usize,
    pub differences: Vec<Difference>,
}

impl RoundTripReport {
    fn from_differences(differences: Vec<Difference>) -> Self {
        let count = |category| differences.iter().filter(|d| d.category == category).count();
        Self {
            identical: differences.is_empty(),
            lossless_count: count(DiffCategory::Lossless),
            cosmetic_count: count(DiffCategory::Cosmetic),
            semantic_count: count(DiffCategory::Semantic),
            differences,
        }
    }

    /// No semantic differences.
    pub fn is_lossless(&self) -> bool {
        self.semantic_count == 0
    }
}

/// Compares `original` against `imported`.
///
/// Never fails and never mutates; identical trees give an empty report.
pub fn verify_round_trip(original: &Node, imported: &Node) -> RoundTripReport {
    let mut differences = Vec::new();
    let root = original.kind().as_str().to_string();
    compare(&root, original, imported, &mut differences);
    log::debug!(
        "round trip: {} differences at {:?}",
        differences.len(),
        differences.iter().map(|d| d.path.as_str()).collect::<Vec<_>>()
    );
    RoundTripReport::from_differences(differences)
}

fn push(
    out: &mut Vec<Difference>,
    path: String,
    category: DiffCategory,
    original: Value,
    imported: Value,
    message: impl Into<String>,
) {
    out.push(Difference {
        path,
        category,
        original,
        imported,
        message: message.into(),
    });
}

fn compare(path: &str, a: &Node, b: &Node, out: &mut Vec<Difference>) {
    if a.kind() != b.kind() {
        push(
            out,
            path.to_string(),
            DiffCategory::Semantic,
            Value::from(a.kind().as_str()),
            Value::from(b.kind().as_str()),
            format!("node kind changed from {} to {}", a.kind(), b.kind()),
        );
        return;
    }

    if let (Node::Text { text: ta, marks: ma }, Node::Text { text: tb, marks: mb }) = (a, b) {
        compare_text(path, ta, tb, out);
        compare_marks(path, ma, mb, out);
        return;
    }

    compare_attrs(path, a, b, out);
    compare_children(path, a.children(), b.children(), out);
}

fn compare_text(path: &str, a: &str, b: &str, out: &mut Vec<Difference>) {
    if a == b {
        return;
    }
    let (category, message) = if a.split_whitespace().eq(b.split_whitespace()) {
        (DiffCategory::Cosmetic, "text differs only in whitespace")
    } else {
        (DiffCategory::Semantic, "text changed")
    };
    push(
        out,
        format!("{path}.text"),
        category,
        Value::from(a),
        Value::from(b),
        message,
    );
}

fn compare_marks(path: &str, a: &[Mark], b: &[Mark], out: &mut Vec<Difference>) {
    if a == b {
        return;
    }
    let lost: Vec<&Mark> = a.iter().filter(|m| !b.contains(m)).collect();
    let added: Vec<&Mark> = b.iter().filter(|m| !a.contains(m)).collect();
    let path = format!("{path}.marks");
    let to_value = |marks: &[Mark]| serde_json::to_value(marks).unwrap_or(Value::Null);

    if !lost.is_empty() {
        push(
            out,
            path.clone(),
            DiffCategory::Semantic,
            to_value(a),
            to_value(b),
            format!("marks lost: {}", mark_names(&lost)),
        );
    }
    if !added.is_empty() {
        push(
            out,
            path.clone(),
            DiffCategory::Cosmetic,
            to_value(a),
            to_value(b),
            format!("marks added: {}", mark_names(&added)),
        );
    }
    if lost.is_empty() && added.is_empty() {
        push(
            out,
            path,
            DiffCategory::Cosmetic,
            to_value(a),
            to_value(b),
            "marks reordered",
        );
    }
}

fn mark_names(marks: &[&Mark]) -> String {
    marks
        .iter()
        .map(|m| match m {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Strike => "strike",
            Mark::Code => "code",
            Mark::Link(_) => "link",
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn compare_attrs(path: &str, a: &Node, b: &Node, out: &mut Vec<Difference>) {
    let attrs_a = a.attrs();
    let attrs_b = b.attrs();
    let keys = attrs_a.keys().chain(attrs_b.keys().filter(|k| !attrs_a.contains_key(*k)));
    let null = AttrValue::Null;

    for key in keys {
        let va = attrs_a.get(key).unwrap_or(&null);
        let vb = attrs_b.get(key).unwrap_or(&null);
        if va == vb || (va.is_empty() && vb.is_empty()) {
            continue;
        }
        let to_value = |v: &AttrValue| serde_json::to_value(v).unwrap_or(Value::Null);
        let category = if *key == "language" && is_plain_language(va) && is_plain_language(vb) {
            DiffCategory::Lossless
        } else if SEMANTIC_ATTRS.contains(key) {
            DiffCategory::Semantic
        } else {
            DiffCategory::Cosmetic
        };
        push(
            out,
            format!("{path}.attrs.{key}"),
            category,
            to_value(va),
            to_value(vb),
            format!("{key} changed from {va} to {vb}"),
        );
    }
}

fn is_plain_language(value: &AttrValue) -> bool {
    match value {
        AttrValue::Null => true,
        AttrValue::Str(s) => PLAIN_LANGUAGES.contains(&s.as_str()),
        AttrValue::Bool(_) | AttrValue::Int(_) => false,
    }
}

fn compare_children(path: &str, a: &[Node], b: &[Node], out: &mut Vec<Difference>) {
    let (a, b) = if has_mergeable_text(a) || has_mergeable_text(b) {
        let merged_a: Cow<'_, [Node]> = Cow::Owned(merge_adjacent_text(a.to_vec()));
        let merged_b: Cow<'_, [Node]> = Cow::Owned(merge_adjacent_text(b.to_vec()));
        let merged = merged_a.len() != a.len() || merged_b.len() != b.len();
        if merged && a != b {
            push(
                out,
                format!("{path}.content"),
                DiffCategory::Lossless,
                Value::from(a.len()),
                Value::from(b.len()),
                "adjacent text nodes merged",
            );
        }
        (merged_a, merged_b)
    } else {
        (Cow::Borrowed(a), Cow::Borrowed(b))
    };

    if a.len() != b.len() {
        push(
            out,
            format!("{path}.content"),
            DiffCategory::Semantic,
            Value::from(a.len()),
            Value::from(b.len()),
            format!("child count changed from {} to {}", a.len(), b.len()),
        );
    }
    for (i, (ca, cb)) in a.iter().zip(b.iter()).enumerate() {
        compare(&format!("{path}.content[{i}]"), ca, cb, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CalloutAttrs, CalloutType, LinkAttrs, TagAttrs, TaskItemAttrs};
    use pretty_assertions::assert_eq;

    fn doc(content: Vec<Node>) -> Node {
        Node::doc(content)
    }

    fn para(nodes: Vec<Node>) -> Node {
        Node::paragraph(nodes)
    }

    fn categories(report: &RoundTripReport) -> Vec<DiffCategory> {
        report.differences.iter().map(|d| d.category).collect()
    }

    fn sample() -> Node {
        doc(vec![
            Node::heading(1, vec![Node::plain("Title")]),
            para(vec![
                Node::plain("a "),
                Node::text("b", vec![Mark::Bold, Mark::Italic]),
                Node::Tag {
                    attrs: TagAttrs::unresolved("rust"),
                },
            ]),
            Node::code_block("rust", "fn main() {}"),
        ])
    }

    #[test]
    fn same_tree_is_identical() {
        let tree = sample();
        let report = verify_round_trip(&tree, &tree);
        assert!(report.identical);
        assert_eq!(
            report,
            RoundTripReport {
                identical: true,
                ..RoundTripReport::default()
            }
        );
    }

    #[test]
    fn kind_change_is_semantic_and_stops() {
        let a = doc(vec![para(vec![Node::plain("x")])]);
        let b = doc(vec![Node::heading(1, vec![Node::plain("y")])]);
        let report = verify_round_trip(&a, &b);
        assert_eq!(report.semantic_count, 1);
        assert_eq!(report.differences[0].path, "doc.content[0]");
        assert_eq!(report.differences[0].original, Value::from("paragraph"));
    }

    #[test]
    fn whitespace_only_text_change_is_cosmetic() {
        let a = doc(vec![para(vec![Node::plain("a  b\n")])]);
        let b = doc(vec![para(vec![Node::plain("a b")])]);
        let report = verify_round_trip(&a, &b);
        assert_eq!(categories(&report), vec![DiffCategory::Cosmetic]);
        assert_eq!(report.differences[0].path, "doc.content[0].content[0].text");
    }

    #[test]
    fn text_change_is_semantic() {
        let a = doc(vec![para(vec![Node::plain("cat")])]);
        let b = doc(vec![para(vec![Node::plain("cut")])]);
        assert_eq!(verify_round_trip(&a, &b).semantic_count, 1);
    }

    #[test]
    fn mark_loss_is_semantic_and_gain_is_cosmetic() {
        let bold = doc(vec![para(vec![Node::text("x", vec![Mark::Bold])])]);
        let plain = doc(vec![para(vec![Node::plain("x")])]);
        assert_eq!(
            categories(&verify_round_trip(&bold, &plain)),
            vec![DiffCategory::Semantic]
        );
        assert_eq!(
            categories(&verify_round_trip(&plain, &bold)),
            vec![DiffCategory::Cosmetic]
        );
    }

    #[test]
    fn mark_reorder_is_cosmetic() {
        let a = doc(vec![para(vec![Node::text("x", vec![Mark::Bold, Mark::Italic])])]);
        let b = doc(vec![para(vec![Node::text("x", vec![Mark::Italic, Mark::Bold])])]);
        let report = verify_round_trip(&a, &b);
        assert_eq!(categories(&report), vec![DiffCategory::Cosmetic]);
        assert_eq!(report.differences[0].message, "marks reordered");
    }

    #[test]
    fn changed_link_href_is_lost_and_added() {
        let link = |href: &str| Mark::Link(LinkAttrs::external(href));
        let a = doc(vec![para(vec![Node::text("x", vec![link("https://a")])])]);
        let b = doc(vec![para(vec![Node::text("x", vec![link("https://b")])])]);
        assert_eq!(
            categories(&verify_round_trip(&a, &b)),
            vec![DiffCategory::Semantic, DiffCategory::Cosmetic]
        );
    }

    #[test]
    fn heading_level_change_is_semantic() {
        let a = doc(vec![Node::heading(1, vec![Node::plain("T")])]);
        let b = doc(vec![Node::heading(2, vec![Node::plain("T")])]);
        let report = verify_round_trip(&a, &b);
        insta::assert_json_snapshot!(report, @r#"
        {
          "identical": false,
          "losslessCount": 0,
          "cosmeticCount": 0,
          "semanticCount": 1,
          "differences": [
            {
              "path": "doc.content[0].attrs.level",
              "category": "semantic",
              "original": 1,
              "imported": 2,
              "message": "level changed from 1 to 2"
            }
          ]
        }
        "#);
    }

    #[test]
    fn task_checked_change_is_semantic() {
        let item = |checked| Node::TaskList {
            content: vec![Node::TaskItem {
                attrs: TaskItemAttrs { checked },
                content: vec![para(vec![Node::plain("t")])],
            }],
        };
        let report = verify_round_trip(&doc(vec![item(true)]), &doc(vec![item(false)]));
        assert_eq!(categories(&report), vec![DiffCategory::Semantic]);
    }

    #[test]
    fn tag_id_and_color_are_semantic() {
        let tag = |id: Option<&str>, color: Option<&str>| {
            doc(vec![para(vec![Node::Tag {
                attrs: TagAttrs {
                    id: id.map(Into::into),
                    color: color.map(Into::into),
                    ..TagAttrs::unresolved("rust")
                },
            }])])
        };
        let report = verify_round_trip(&tag(Some("t1"), Some("#f00")), &tag(None, None));
        assert_eq!(report.semantic_count, 2);
        // Both sides empty is not a difference.
        assert!(verify_round_trip(&tag(None, Some("")), &tag(None, None)).identical);
    }

    #[test]
    fn callout_title_change_is_cosmetic() {
        let callout = |title: Option<&str>| {
            doc(vec![Node::Callout {
                attrs: CalloutAttrs {
                    callout_type: CalloutType::Note,
                    title: title.map(Into::into),
                },
                content: vec![Node::empty_paragraph()],
            }])
        };
        let report = verify_round_trip(&callout(Some("Heads up")), &callout(Some("Heads-up")));
        assert_eq!(categories(&report), vec![DiffCategory::Cosmetic]);
    }

    #[test]
    fn plaintext_language_is_lossless() {
        let a = doc(vec![Node::code_block("", "x")]);
        let b = doc(vec![Node::code_block("plaintext", "x")]);
        let report = verify_round_trip(&a, &b);
        assert_eq!(categories(&report), vec![DiffCategory::Lossless]);
        assert!(report.is_lossless());
    }

    #[test]
    fn split_text_nodes_are_lossless() {
        let a = doc(vec![para(vec![Node::plain("ab")])]);
        let b = doc(vec![para(vec![Node::plain("a"), Node::plain("b")])]);
        let report = verify_round_trip(&a, &b);
        assert_eq!(categories(&report), vec![DiffCategory::Lossless]);
    }

    #[test]
    fn child_count_change_is_semantic_and_compares_prefix() {
        let a = doc(vec![para(vec![Node::plain("x")]), Node::HorizontalRule]);
        let b = doc(vec![para(vec![Node::plain("y")])]);
        let report = verify_round_trip(&a, &b);
        assert_eq!(report.semantic_count, 2);
        assert_eq!(report.differences[0].path, "doc.content");
        assert_eq!(report.differences[1].path, "doc.content[0].content[0].text");
    }
}
