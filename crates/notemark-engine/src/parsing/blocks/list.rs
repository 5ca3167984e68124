//! The shared bullet/ordered list algorithm and task lists.
//!
//! A list collects items at its own indentation level. A deeper item opens a
//! nested list (its type taken from that line) which is attached to the
//! previous sibling item, so nesting shows up as list nodes inside list-item
//! content rather than as siblings.

use crate::document::{Node, OrderedListAttrs, TaskItemAttrs};

use super::{
    classify::{LineClass, classify},
    kinds::{ItemKind, ListItemLine},
    parser::BlockParser,
};

impl<'a> BlockParser<'a, '_> {
    /// Parses a bullet or ordered list whose first item is the current line.
    pub(super) fn list(&mut self, first: ListItemLine<'a>) -> Node {
        let base = first.level;
        let kind = first.kind;
        let mut items: Vec<Node> = Vec::new();
        self.depth += 1;

        while !self.eof() {
            let idx = self.pos;
            let item = match classify(self.lines[idx]) {
                LineClass::Blank if self.list_resumes_after(idx, base) => {
                    self.pos += 1;
                    continue;
                }
                LineClass::ListItem(item) if item.level >= base => item,
                _ => break,
            };

            if item.level > base {
                if self.depth < self.ctx.options.max_nesting_depth {
                    let nested = match item.kind {
                        ItemKind::Task { .. } => self.task_list(item.level),
                        ItemKind::Bullet | ItemKind::Ordered { .. } => self.list(item),
                    };
                    attach_nested(&mut items, nested);
                    continue;
                }
                let line = self.line_number(idx);
                self.ctx.nesting_exceeded(line);
            }

            if !item.kind.same_list(kind) {
                break;
            }
            let paragraph = Node::paragraph(self.inline(item.text, idx));
            items.push(Node::ListItem {
                content: vec![paragraph],
            });
            self.pos += 1;
        }

        self.depth -= 1;
        match kind {
            ItemKind::Ordered { number } => Node::OrderedList {
                attrs: OrderedListAttrs { start: number },
                content: items,
            },
            ItemKind::Bullet | ItemKind::Task { .. } => Node::BulletList { content: items },
        }
    }

    /// Parses a contiguous run of task items at `level` or deeper.
    ///
    /// Deeper task lines are kept as siblings; task lists do not nest.
    pub(super) fn task_list(&mut self, level: usize) -> Node {
        let mut items = Vec::new();
        while !self.eof() {
            let idx = self.pos;
            let LineClass::ListItem(ListItemLine {
                kind: ItemKind::Task { checked },
                level: item_level,
                text,
            }) = classify(self.lines[idx])
            else {
                break;
            };
            if item_level < level {
                break;
            }
            let paragraph = Node::paragraph(self.inline(text, idx));
            items.push(Node::TaskItem {
                attrs: TaskItemAttrs { checked },
                content: vec![paragraph],
            });
            self.pos += 1;
        }
        Node::TaskList { content: items }
    }

    /// A blank line inside a list is skipped when the next non-blank line is
    /// an item at `base` level or deeper.
    fn list_resumes_after(&self, idx: usize, base: usize) -> bool {
        self.lines[idx..]
            .iter()
            .find(|line| !line.trim().is_empty())
            .and_then(|line| ListItemLine::parse(line))
            .is_some_and(|item| item.level >= base)
    }
}

fn attach_nested(items: &mut Vec<Node>, nested: Node) {
    match items.last_mut() {
        Some(Node::ListItem { content }) => content.push(nested),
        _ => items.push(Node::ListItem {
            content: vec![Node::empty_paragraph(), nested],
        }),
    }
}
