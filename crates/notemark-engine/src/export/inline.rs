use crate::document::{Mark, Node};
use crate::parsing::inline::kinds::{CodeSpan, Envelope, Escape, Tag, WikiLink};

use super::ExportOptions;

/// Marks in nesting order, outermost first. Code must be innermost because
/// a code span cannot contain other markup.
fn rank(mark: &Mark) -> u8 {
    match mark {
        Mark::Link(_) => 0,
        Mark::Bold => 1,
        Mark::Italic => 2,
        Mark::Strike => 3,
        Mark::Code => 4,
    }
}

/// Renders inline nodes back to markdown.
///
/// Runs of text nodes sharing a mark are wrapped once, so `**a _b_**`
/// survives as one bold span rather than two touching ones.
pub fn render_inlines(nodes: &[Node], options: &ExportOptions) -> String {
    let mut out = String::new();
    render_run(nodes, &[], options, &mut out);
    out
}

fn render_run(nodes: &[Node], open: &[Mark], options: &ExportOptions, out: &mut String) {
    let mut i = 0;
    while i < nodes.len() {
        let node = &nodes[i];
        let Node::Text { text, marks } = node else {
            render_atom(node, options, out);
            i += 1;
            continue;
        };

        let Some(outer) = marks
            .iter()
            .filter(|m| !open.contains(m))
            .min_by_key(|m| rank(m))
        else {
            out.push_str(&escape_text(text));
            i += 1;
            continue;
        };

        let end = group_end(nodes, i, outer, open);
        let group = &nodes[i..end];
        if *outer == Mark::Code {
            let code: String = group.iter().map(Node::plain_text).collect();
            out.push_str(&code_span(&code));
        } else {
            let mut opened = open.to_vec();
            opened.push(outer.clone());
            let mut inner = String::new();
            render_run(group, &opened, options, &mut inner);
            let next = nodes.get(end).and_then(|n| first_char(n, open));
            wrap(outer, &inner, out, next);
        }
        i = end;
    }
}

/// End of the run of text nodes starting at `start` that carry `mark`.
fn group_end(nodes: &[Node], start: usize, mark: &Mark, open: &[Mark]) -> usize {
    let carries = |node: &Node| match node {
        // Inside a code span nothing else may still need opening.
        Node::Text { marks, .. } if *mark == Mark::Code => marks
            .iter()
            .all(|m| *m == Mark::Code || open.contains(m)),
        Node::Text { marks, .. } => marks.contains(mark),
        _ => false,
    };
    nodes[start..]
        .iter()
        .position(|n| !carries(n))
        .map_or(nodes.len(), |offset| start + offset)
}

/// Wraps `inner` in the delimiters of `mark`, moving edge whitespace outside
/// so the delimiters still parse.
fn wrap(mark: &Mark, inner: &str, out: &mut String, next: Option<char>) {
    if let Mark::Link(attrs) = mark {
        let href = if attrs.href.contains(char::is_whitespace) {
            format!("<{}>", attrs.href)
        } else {
            attrs.href.clone()
        };
        out.push_str(&format!("[{inner}]({href})"));
        return;
    }

    let core = inner.trim();
    if core.is_empty() {
        out.push_str(inner);
        return;
    }
    let lead = &inner[..inner.len() - inner.trim_start().len()];
    let trail = &inner[inner.trim_end().len()..];
    let prev = out.chars().next_back();
    let delimiter = match mark {
        Mark::Bold => "**",
        Mark::Strike => "~~",
        // `_` cannot open or close inside a word.
        Mark::Italic
            if prev.is_some_and(char::is_alphanumeric) && lead.is_empty()
                || next.is_some_and(char::is_alphanumeric) && trail.is_empty() =>
        {
            "*"
        }
        Mark::Italic => "_",
        Mark::Code | Mark::Link(_) => "",
    };
    out.push_str(lead);
    out.push_str(delimiter);
    out.push_str(core);
    out.push_str(delimiter);
    out.push_str(trail);
}

fn code_span(code: &str) -> String {
    let longest = code
        .split(|c| c != CodeSpan::TICK)
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = CodeSpan::TICK.to_string().repeat(longest + 1);
    format!("{fence}{code}{fence}")
}

fn render_atom(node: &Node, options: &ExportOptions, out: &mut String) {
    match node {
        Node::HardBreak => out.push_str("  \n"),
        Node::Tag { attrs } => match &attrs.id {
            Some(id) if options.semantic_envelopes => {
                out.push_str(&Envelope::render_tag(attrs, id));
            }
            _ if Tag::is_valid_name(&attrs.name) => {
                out.push(Tag::HASH);
                out.push_str(&attrs.name);
            }
            // Would not parse back as a tag; keep the text.
            _ => out.push_str(&escape_text(&node.plain_text())),
        },
        Node::WikiLink { attrs } => match &attrs.id {
            Some(id) if options.semantic_envelopes => {
                out.push_str(&Envelope::render_wikilink(attrs, id));
            }
            _ => out.push_str(&WikiLink::render(attrs)),
        },
        other => out.push_str(&escape_text(&other.plain_text())),
    }
}

/// The first character `node` renders to at the current nesting level.
fn first_char(node: &Node, open: &[Mark]) -> Option<char> {
    match node {
        Node::Text { text, marks } if marks.iter().all(|m| open.contains(m)) => {
            text.chars().next()
        }
        // Starts with a delimiter.
        Node::Text { .. } => Some('*'),
        Node::HardBreak => Some(' '),
        Node::Tag { .. } => Some(Tag::HASH),
        _ => Some('['),
    }
}

/// Characters escaped wherever they appear in text.
const ALWAYS_ESCAPED: &[char] = &['\\', '`', '*', '_', '~', '[', ']', '|', '<'];

/// Escapes `text` so that reparsing yields the same characters without marks.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        let hash_trigger = c == Tag::HASH
            && (prev.is_none_or(char::is_whitespace) || next.is_some_and(char::is_alphanumeric));
        if (ALWAYS_ESCAPED.contains(&c) || hash_trigger) && Escape::is_escapable(c) {
            out.push(Escape::BACKSLASH);
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Escapes characters at the start of each line that would otherwise open a
/// block (`>`, list markers, rules).
pub fn escape_line_starts(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let indent = line.len() - line.trim_start_matches(' ').len();
            let (spaces, rest) = line.split_at(indent);
            let digits = rest.chars().take_while(char::is_ascii_digit).count();
            let marker_at = match rest.chars().next() {
                Some('>') => Some(0),
                Some('-' | '+') if rest[1..].starts_with([' ', '-']) || rest.len() == 1 => Some(0),
                Some(_) if digits > 0 && rest[digits..].starts_with(". ") => Some(digits),
                _ => None,
            };
            match marker_at {
                Some(at) => format!("{spaces}{}{}{}", &rest[..at], Escape::BACKSLASH, &rest[at..]),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
