//! # Markdown Export
//!
//! The inverse of [`parse_markdown`]: renders a document tree as markdown
//! that parses back to the same tree, plus [`build_sidecar`] to capture what
//! plain markdown cannot carry.
//!
//! Rendering reuses the delimiter constants owned by the parsing kinds, so
//! the two directions cannot drift apart.
//!
//! [`parse_markdown`]: crate::parsing::parse_markdown

pub mod inline;
pub mod sidecar;

use serde::{Deserialize, Serialize};

use crate::document::Node;
use crate::parsing::blocks::kinds::{BlockQuote, CodeFence, Heading, ListItemLine, Table};

pub use inline::render_inlines;
pub use sidecar::{SCHEMA_VERSION, SIDECAR_VERSION, SidecarMeta, build_sidecar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Write tags and wiki-links that have an id as `<!-- … -->` envelopes.
    pub semantic_envelopes: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            semantic_envelopes: true,
        }
    }
}

/// Renders `tree` as markdown. Blocks are separated by blank lines and the
/// output ends with a newline unless it is empty.
pub fn to_markdown(tree: &Node, options: &ExportOptions) -> String {
    let body = render_block(tree, options);
    if body.is_empty() {
        body
    } else {
        body + "\n"
    }
}

fn render_blocks(nodes: &[Node], options: &ExportOptions) -> String {
    nodes
        .iter()
        .map(|node| render_block(node, options))
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(node: &Node, options: &ExportOptions) -> String {
    match node {
        Node::Doc { content }
        | Node::ListItem { content }
        | Node::TaskItem { content, .. }
        | Node::TableRow { content }
        | Node::TableHeader { content }
        | Node::TableCell { content } => render_blocks(content, options),
        Node::Paragraph { content } => {
            inline::escape_line_starts(&render_inlines(content, options))
        }
        Node::Heading { attrs, content } => format!(
            "{} {}",
            Heading::MARKER.to_string().repeat(usize::from(attrs.level)),
            single_line(&render_inlines(content, options))
        ),
        Node::CodeBlock { attrs, content } => {
            let body: String = content.iter().map(Node::plain_text).collect();
            code_block(&attrs.language, &body)
        }
        Node::Blockquote { content } => quote(&render_blocks(content, options)),
        Node::Callout { attrs, content } => {
            let marker = match &attrs.title {
                Some(title) => format!("[!{}] {title}", attrs.callout_type),
                None => format!("[!{}]", attrs.callout_type),
            };
            let body = render_blocks(content, options);
            if body.is_empty() {
                quote(&marker)
            } else {
                quote(&format!("{marker}\n{body}"))
            }
        }
        Node::HorizontalRule => "---".to_string(),
        Node::BulletList { .. } | Node::OrderedList { .. } | Node::TaskList { .. } => {
            let mut lines = Vec::new();
            render_list(node, 0, options, &mut lines);
            lines.join("\n")
        }
        Node::Table { content } => render_table(content, options),
        Node::Text { .. } | Node::HardBreak | Node::Tag { .. } | Node::WikiLink { .. } => {
            render_inlines(std::slice::from_ref(node), options)
        }
    }
}

/// Hard breaks and newlines become spaces where a block must stay on one line.
fn single_line(text: &str) -> String {
    text.replace("  \n", " ").replace('\n', " ")
}

fn quote(body: &str) -> String {
    body.split('\n')
        .map(|line| {
            if line.is_empty() {
                BlockQuote::PREFIX.to_string()
            } else {
                format!("{} {line}", BlockQuote::PREFIX)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn code_block(language: &str, body: &str) -> String {
    // The fence must be longer than any backtick-only line in the body.
    let longest = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.chars().all(|c| c == CodeFence::TICK))
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = CodeFence::TICK
        .to_string()
        .repeat(CodeFence::MIN_LEN.max(longest + 1));
    if body.is_empty() {
        format!("{fence}{language}\n{fence}")
    } else {
        format!("{fence}{language}\n{body}\n{fence}")
    }
}

fn render_list(list: &Node, indent: usize, options: &ExportOptions, out: &mut Vec<String>) {
    let pad = " ".repeat(indent);
    let items = list.children().iter().enumerate();
    for (i, item) in items {
        let marker = match (list, item) {
            (Node::OrderedList { attrs, .. }, _) => {
                format!("{}. ", attrs.start.saturating_add(i as u64))
            }
            (Node::TaskList { .. }, Node::TaskItem { attrs, .. }) if attrs.checked => {
                "- [x] ".to_string()
            }
            (Node::TaskList { .. }, _) => "- [ ] ".to_string(),
            _ => "- ".to_string(),
        };

        let children = item.children();
        let (text, rest) = match children.split_first() {
            Some((Node::Paragraph { content }, rest)) => {
                (single_line(&render_inlines(content, options)), rest)
            }
            _ => (String::new(), children),
        };
        out.push(format!("{pad}{marker}{text}"));

        let nested_indent = indent + ListItemLine::INDENT_WIDTH;
        for child in rest {
            match child {
                Node::BulletList { .. } | Node::OrderedList { .. } | Node::TaskList { .. } => {
                    render_list(child, nested_indent, options, out);
                }
                other => {
                    let nested_pad = " ".repeat(nested_indent);
                    out.extend(
                        render_block(other, options)
                            .split('\n')
                            .map(|line| format!("{nested_pad}{line}")),
                    );
                }
            }
        }
    }
}

fn render_table(rows: &[Node], options: &ExportOptions) -> String {
    let mut lines = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .children()
            .iter()
            .map(|cell| single_line(&render_block(cell, options)))
            .collect();
        lines.push(format!("{0} {1} {0}", Table::PIPE, cells.join(" | ")));
        if i == 0 {
            let separator = vec!["---"; cells.len()].join(" | ");
            lines.push(format!("{0} {separator} {0}", Table::PIPE));
        }
    }
    lines.join("\n")
}
