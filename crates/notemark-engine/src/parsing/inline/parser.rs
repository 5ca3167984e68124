use crate::document::{ActiveMarks, LinkAttrs, Mark, Node, TagAttrs, merge_adjacent_text};
use crate::parsing::ParseOptions;

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Delimiter, Envelope, Escape, Link, Tag, WikiLink},
};

/// Two trailing spaces before a newline.
const HARD_BREAK: &str = "  \n";

/// Parses inline content with default options.
pub fn parse_inline(text: &str, parse_semantics: bool) -> Vec<Node> {
    InlineParser::new(parse_semantics, ParseOptions::DEFAULT_MAX_NESTING_DEPTH).parse(text)
}

/// Converts the text of one block into inline nodes.
///
/// Reused across all blocks of a parse; the only state carried between
/// calls is the truncation flag, which the block parser drains after each
/// call with [`InlineParser::take_truncated`].
#[derive(Debug)]
pub struct InlineParser {
    semantics: bool,
    max_depth: usize,
    truncated: bool,
}

impl InlineParser {
    pub fn new(semantics: bool, max_depth: usize) -> Self {
        Self {
            semantics,
            max_depth,
            truncated: false,
        }
    }

    /// Parses `text` into inline nodes, merging adjacent text with equal marks.
    pub fn parse(&mut self, text: &str) -> Vec<Node> {
        let mut out = vec![];
        self.scan(text, &ActiveMarks::default(), 0, &mut out);
        merge_adjacent_text(out)
    }

    /// Whether a delimiter was kept literal because of the nesting cap since
    /// the last call. Resets the flag.
    pub fn take_truncated(&mut self) -> bool {
        std::mem::take(&mut self.truncated)
    }

    fn scan(&mut self, s: &str, marks: &ActiveMarks, depth: usize, out: &mut Vec<Node>) {
        let mut cur = Cursor::new(s);
        let mut pending = String::new();

        while !cur.eof() {
            if let Some(c) = Escape::match_at(cur.rest()) {
                pending.push(c);
                cur.bump_n(Escape::BACKSLASH.len_utf8() + c.len_utf8());
                continue;
            }
            if let Some(node) = self.try_atom(&mut cur) {
                flush(&mut pending, marks, out);
                out.push(node);
                continue;
            }
            if let Some((content, len)) = CodeSpan::match_at(cur.rest()) {
                flush(&mut pending, marks, out);
                out.push(Node::text(content, marks.with(Mark::Code).to_vec()));
                cur.bump_n(len);
                continue;
            }
            if self.try_delimited(&mut cur, marks, depth, &mut pending, out) {
                continue;
            }
            if cur.starts_with(HARD_BREAK) {
                flush(&mut pending, marks, out);
                out.push(Node::HardBreak);
                cur.bump_n(HARD_BREAK.len());
                continue;
            }
            if let Some(c) = cur.bump() {
                pending.push(c);
            }
        }

        flush(&mut pending, marks, out);
    }

    /// Envelopes, wiki-links and tags: atomic nodes that carry no marks.
    fn try_atom(&self, cur: &mut Cursor<'_>) -> Option<Node> {
        let rest = cur.rest();
        if self.semantics {
            if let Some((attrs, len)) = Envelope::tag(rest) {
                cur.bump_n(len);
                return Some(Node::Tag { attrs });
            }
            if let Some((attrs, len)) = Envelope::wikilink(rest) {
                cur.bump_n(len);
                return Some(Node::WikiLink { attrs });
            }
        }
        if let Some((attrs, len)) = WikiLink::match_at(rest) {
            cur.bump_n(len);
            return Some(Node::WikiLink { attrs });
        }
        if let Some(name) = Tag::match_at(rest, cur.prev()) {
            cur.bump_n(Tag::HASH.len_utf8() + name.len());
            return Some(Node::Tag {
                attrs: TagAttrs::unresolved(name),
            });
        }
        None
    }

    /// Emphasis, strikethrough and links. Returns true if something was
    /// consumed.
    ///
    /// Past the nesting cap the opener is left for the caller to treat as
    /// literal text.
    fn try_delimited(
        &mut self,
        cur: &mut Cursor<'_>,
        marks: &ActiveMarks,
        depth: usize,
        pending: &mut String,
        out: &mut Vec<Node>,
    ) -> bool {
        let rest = cur.rest();
        let matched = Delimiter::ORDER
            .into_iter()
            .find_map(|delim| {
                delim
                    .match_at(rest, cur.prev())
                    .map(|(inner, len)| (inner, delim.mark(), len))
            })
            .or_else(|| {
                Link::match_at(rest).map(|link| {
                    let inner = if link.text.is_empty() { link.href } else { link.text };
                    (inner, Mark::Link(LinkAttrs::external(link.href)), link.len)
                })
            });

        let Some((inner, mark, len)) = matched else {
            return false;
        };
        if depth >= self.max_depth {
            self.truncated = true;
            return false;
        }

        // `*_x_*`: italic inside italic reads as bold italic.
        let mark = match mark {
            Mark::Italic if marks.contains(&Mark::Italic) => Mark::Bold,
            mark => mark,
        };

        flush(pending, marks, out);
        self.scan(inner, &marks.with(mark), depth + 1, out);
        cur.bump_n(len);
        true
    }
}

fn flush(pending: &mut String, marks: &ActiveMarks, out: &mut Vec<Node>) {
    if !pending.is_empty() {
        out.push(Node::text(std::mem::take(pending), marks.to_vec()));
    }
}
