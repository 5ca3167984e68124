//! # Document Tree
//!
//! The typed rich-document tree produced by the import pipeline.
//!
//! Every node kind is a variant of [`Node`], so the parser, the enricher, the
//! exporter and the round-trip verifier all match exhaustively over the same
//! closed set. The serde representation is the editor's JSON wire shape:
//!
//! ```text
//! {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Hi"}]}
//! ```
//!
//! ## Invariants
//!
//! - The root is always [`Node::Doc`].
//! - Containers (blockquote, callout, list/task items, table cells) never
//!   have empty content: [`Node::container_content`] substitutes a single
//!   empty paragraph.
//! - Adjacent text nodes with the same mark set are merged
//!   ([`merge_adjacent_text`]).

pub mod marks;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use marks::{ActiveMarks, LinkAttrs, Mark, same_mark_set};

/// One node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Doc {
        #[serde(default)]
        content: Vec<Node>,
    },
    Paragraph {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    CodeBlock {
        attrs: CodeBlockAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Blockquote {
        content: Vec<Node>,
    },
    Callout {
        attrs: CalloutAttrs,
        content: Vec<Node>,
    },
    HorizontalRule,
    BulletList {
        content: Vec<Node>,
    },
    OrderedList {
        attrs: OrderedListAttrs,
        content: Vec<Node>,
    },
    ListItem {
        content: Vec<Node>,
    },
    TaskList {
        content: Vec<Node>,
    },
    TaskItem {
        attrs: TaskItemAttrs,
        content: Vec<Node>,
    },
    Table {
        content: Vec<Node>,
    },
    TableRow {
        content: Vec<Node>,
    },
    TableHeader {
        content: Vec<Node>,
    },
    TableCell {
        content: Vec<Node>,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    HardBreak,
    Tag {
        attrs: TagAttrs,
    },
    WikiLink {
        attrs: WikiLinkAttrs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    /// 1 through 6.
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalloutAttrs {
    pub callout_type: CalloutType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutType {
    Note,
    Tip,
    Warning,
    Danger,
    Info,
    Success,
}

impl CalloutType {
    pub const ALL: [CalloutType; 6] = [
        CalloutType::Note,
        CalloutType::Tip,
        CalloutType::Warning,
        CalloutType::Danger,
        CalloutType::Info,
        CalloutType::Success,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CalloutType::Note => "note",
            CalloutType::Tip => "tip",
            CalloutType::Warning => "warning",
            CalloutType::Danger => "danger",
            CalloutType::Info => "info",
            CalloutType::Success => "success",
        }
    }

    /// Case-insensitive lookup of a callout type name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CalloutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedListAttrs {
    #[serde(default = "OrderedListAttrs::default_start")]
    pub start: u64,
}

impl OrderedListAttrs {
    fn default_start() -> u64 {
        1
    }
}

impl Default for OrderedListAttrs {
    fn default() -> Self {
        Self { start: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskItemAttrs {
    #[serde(default)]
    pub checked: bool,
}

/// A `#tag` reference.
///
/// `id` is `None` until a sidecar or the persistence layer resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAttrs {
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
}

impl TagAttrs {
    /// An unresolved tag named `name`.
    pub fn unresolved(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            slug: slugify(name),
            color: None,
        }
    }
}

/// A `[[Target|Display]]` reference to another document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiLinkAttrs {
    pub id: Option<String>,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// Tag slugs are the lowercased tag name.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
}

/// The closed set of node kinds, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Doc,
    Paragraph,
    Heading,
    CodeBlock,
    Blockquote,
    Callout,
    HorizontalRule,
    BulletList,
    OrderedList,
    ListItem,
    TaskList,
    TaskItem,
    Table,
    TableRow,
    TableHeader,
    TableCell,
    Text,
    HardBreak,
    Tag,
    WikiLink,
}

impl NodeKind {
    /// The wire name used in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Doc => "doc",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::CodeBlock => "codeBlock",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Callout => "callout",
            NodeKind::HorizontalRule => "horizontalRule",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::TaskList => "taskList",
            NodeKind::TaskItem => "taskItem",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableHeader => "tableHeader",
            NodeKind::TableCell => "tableCell",
            NodeKind::Text => "text",
            NodeKind::HardBreak => "hardBreak",
            NodeKind::Tag => "tag",
            NodeKind::WikiLink => "wikiLink",
        }
    }

    /// Inline kinds live inside a block's content.
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            NodeKind::Text | NodeKind::HardBreak | NodeKind::Tag | NodeKind::WikiLink
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flattened attribute value, used for kind-agnostic attribute comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(u64),
    Str(String),
}

impl AttrValue {
    /// `Null` and the empty string both count as "no value".
    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::Null => true,
            AttrValue::Str(s) => s.is_empty(),
            AttrValue::Bool(_) | AttrValue::Int(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&Option<String>> for AttrValue {
    fn from(value: &Option<String>) -> Self {
        match value {
            Some(s) => AttrValue::Str(s.clone()),
            None => AttrValue::Null,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => f.write_str("null"),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Int(n) => write!(f, "{n}"),
            AttrValue::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl Node {
    pub fn doc(content: Vec<Node>) -> Self {
        Node::Doc { content }
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph { content }
    }

    pub fn empty_paragraph() -> Self {
        Node::Paragraph { content: vec![] }
    }

    pub fn text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::text(text, vec![])
    }

    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        Node::Heading {
            attrs: HeadingAttrs { level },
            content,
        }
    }

    /// A code block holding `body` verbatim as a single unmarked text node.
    pub fn code_block(language: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let content = if body.is_empty() {
            vec![]
        } else {
            vec![Node::plain(body)]
        };
        Node::CodeBlock {
            attrs: CodeBlockAttrs {
                language: language.into(),
            },
            content,
        }
    }

    /// Content for a container node: `children`, or one empty paragraph.
    pub fn container_content(children: Vec<Node>) -> Vec<Node> {
        if children.is_empty() {
            vec![Node::empty_paragraph()]
        } else {
            children
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Doc { .. } => NodeKind::Doc,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::Heading { .. } => NodeKind::Heading,
            Node::CodeBlock { .. } => NodeKind::CodeBlock,
            Node::Blockquote { .. } => NodeKind::Blockquote,
            Node::Callout { .. } => NodeKind::Callout,
            Node::HorizontalRule => NodeKind::HorizontalRule,
            Node::BulletList { .. } => NodeKind::BulletList,
            Node::OrderedList { .. } => NodeKind::OrderedList,
            Node::ListItem { .. } => NodeKind::ListItem,
            Node::TaskList { .. } => NodeKind::TaskList,
            Node::TaskItem { .. } => NodeKind::TaskItem,
            Node::Table { .. } => NodeKind::Table,
            Node::TableRow { .. } => NodeKind::TableRow,
            Node::TableHeader { .. } => NodeKind::TableHeader,
            Node::TableCell { .. } => NodeKind::TableCell,
            Node::Text { .. } => NodeKind::Text,
            Node::HardBreak => NodeKind::HardBreak,
            Node::Tag { .. } => NodeKind::Tag,
            Node::WikiLink { .. } => NodeKind::WikiLink,
        }
    }

    /// Child nodes; empty for leaf kinds.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Doc { content }
            | Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Blockquote { content }
            | Node::Callout { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content, .. }
            | Node::ListItem { content }
            | Node::TaskList { content }
            | Node::TaskItem { content, .. }
            | Node::Table { content }
            | Node::TableRow { content }
            | Node::TableHeader { content }
            | Node::TableCell { content } => content,
            Node::HorizontalRule
            | Node::Text { .. }
            | Node::HardBreak
            | Node::Tag { .. }
            | Node::WikiLink { .. } => &[],
        }
    }

    /// Mutable child list; `None` for leaf kinds.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Doc { content }
            | Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Blockquote { content }
            | Node::Callout { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content, .. }
            | Node::ListItem { content }
            | Node::TaskList { content }
            | Node::TaskItem { content, .. }
            | Node::Table { content }
            | Node::TableRow { content }
            | Node::TableHeader { content }
            | Node::TableCell { content } => Some(content),
            Node::HorizontalRule
            | Node::Text { .. }
            | Node::HardBreak
            | Node::Tag { .. }
            | Node::WikiLink { .. } => None,
        }
    }

    /// Kind-specific attributes flattened into a name → value map.
    pub fn attrs(&self) -> BTreeMap<&'static str, AttrValue> {
        let mut map = BTreeMap::new();
        match self {
            Node::Heading { attrs, .. } => {
                map.insert("level", AttrValue::Int(u64::from(attrs.level)));
            }
            Node::CodeBlock { attrs, .. } => {
                map.insert("language", AttrValue::Str(attrs.language.clone()));
            }
            Node::Callout { attrs, .. } => {
                map.insert(
                    "calloutType",
                    AttrValue::Str(attrs.callout_type.as_str().to_string()),
                );
                map.insert("title", AttrValue::from(&attrs.title));
            }
            Node::OrderedList { attrs, .. } => {
                map.insert("start", AttrValue::Int(attrs.start));
            }
            Node::TaskItem { attrs, .. } => {
                map.insert("checked", AttrValue::Bool(attrs.checked));
            }
            Node::Tag { attrs } => {
                map.insert("id", AttrValue::from(&attrs.id));
                map.insert("name", AttrValue::Str(attrs.name.clone()));
                map.insert("slug", AttrValue::Str(attrs.slug.clone()));
                map.insert("color", AttrValue::from(&attrs.color));
            }
            Node::WikiLink { attrs } => {
                map.insert("id", AttrValue::from(&attrs.id));
                map.insert("target", AttrValue::Str(attrs.target.clone()));
                map.insert("display", AttrValue::from(&attrs.display));
            }
            Node::Doc { .. }
            | Node::Paragraph { .. }
            | Node::Blockquote { .. }
            | Node::HorizontalRule
            | Node::BulletList { .. }
            | Node::ListItem { .. }
            | Node::TaskList { .. }
            | Node::Table { .. }
            | Node::TableRow { .. }
            | Node::TableHeader { .. }
            | Node::TableCell { .. }
            | Node::Text { .. }
            | Node::HardBreak => {}
        }
        map
    }

    /// Counts `(block, inline)` nodes below and including `self`, excluding the root.
    pub fn count_nodes(&self) -> (usize, usize) {
        let own = match self.kind() {
            NodeKind::Doc => (0, 0),
            k if k.is_inline() => (0, 1),
            _ => (1, 0),
        };
        self.children().iter().fold(own, |(b, i), child| {
            let (cb, ci) = child.count_nodes();
            (b + cb, i + ci)
        })
    }

    /// Concatenated text of every descendant text node.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { text, .. } => out.push_str(text),
            Node::HardBreak => out.push('\n'),
            Node::Tag { attrs } => {
                out.push('#');
                out.push_str(&attrs.name);
            }
            Node::WikiLink { attrs } => {
                out.push_str(attrs.display.as_deref().unwrap_or(&attrs.target))
            }
            _ => self
                .children()
                .iter()
                .for_each(|child| child.collect_text(out)),
        }
    }
}

/// Merges runs of adjacent text nodes whose mark sets are equal.
///
/// The first node's mark order is kept.
pub fn merge_adjacent_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Node::Text { text, marks } = &node
            && let Some(Node::Text {
                text: prev_text,
                marks: prev_marks,
            }) = out.last_mut()
            && same_mark_set(prev_marks, marks)
        {
            prev_text.push_str(text);
            continue;
        }
        out.push(node);
    }
    out
}

/// Whether `nodes` contains any pair that [`merge_adjacent_text`] would join.
pub fn has_mergeable_text(nodes: &[Node]) -> bool {
    nodes.windows(2).any(|pair| match (&pair[0], &pair[1]) {
        (Node::Text { marks: a, .. }, Node::Text { marks: b, .. }) => same_mark_set(a, b),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn container_content_substitutes_empty_paragraph() {
        assert_eq!(
            Node::container_content(vec![]),
            vec![Node::empty_paragraph()]
        );
    }

    #[test]
    fn merge_joins_equal_mark_sets_regardless_of_order() {
        let nodes = vec![
            Node::text("a", vec![Mark::Bold, Mark::Italic]),
            Node::text("b", vec![Mark::Italic, Mark::Bold]),
            Node::plain("c"),
        ];
        assert_eq!(
            merge_adjacent_text(nodes),
            vec![
                Node::text("ab", vec![Mark::Bold, Mark::Italic]),
                Node::plain("c"),
            ]
        );
    }

    #[test]
    fn merge_does_not_cross_atomic_nodes() {
        let nodes = vec![Node::plain("a"), Node::HardBreak, Node::plain("b")];
        assert_eq!(merge_adjacent_text(nodes.clone()), nodes);
        assert!(!has_mergeable_text(&nodes));
    }

    #[test]
    fn count_nodes_excludes_root() {
        let doc = Node::doc(vec![
            Node::heading(1, vec![Node::plain("T")]),
            Node::paragraph(vec![Node::plain("a"), Node::HardBreak, Node::plain("b")]),
        ]);
        assert_eq!(doc.count_nodes(), (2, 4));
    }

    #[test]
    fn callout_type_lookup_is_case_insensitive() {
        assert_eq!(CalloutType::from_name("WaRnInG"), Some(CalloutType::Warning));
        assert_eq!(CalloutType::from_name("caution"), None);
    }

    #[test]
    fn wire_shape_of_heading() {
        let node = Node::heading(2, vec![Node::text("Hi", vec![Mark::Bold])]);
        insta::assert_json_snapshot!(node, @r#"
        {
          "type": "heading",
          "attrs": {
            "level": 2
          },
          "content": [
            {
              "type": "text",
              "text": "Hi",
              "marks": [
                {
                  "type": "bold"
                }
              ]
            }
          ]
        }
        "#);
    }

    #[test]
    fn wire_shape_round_trips_through_json() {
        let node = Node::doc(vec![
            Node::Callout {
                attrs: CalloutAttrs {
                    callout_type: CalloutType::Tip,
                    title: Some("Heads up".into()),
                },
                content: vec![Node::empty_paragraph()],
            },
            Node::HorizontalRule,
            Node::paragraph(vec![
                Node::text("x", vec![Mark::Link(LinkAttrs::external("https://a.b"))]),
                Node::Tag {
                    attrs: TagAttrs::unresolved("Rust"),
                },
            ]),
        ]);
        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
