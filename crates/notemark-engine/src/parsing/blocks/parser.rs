use crate::document::Node;
use crate::parsing::ParseOptions;
use crate::parsing::inline::InlineParser;
use crate::warnings::{Warning, WarningCode};

use super::{
    classify::{LineClass, classify},
    kinds::{BlockQuote, Callout, CodeFence, FenceOpen, ItemKind, Paragraph, Table},
};

/// State shared by every [`BlockParser`] of one parse, nested ones included.
pub struct ParseContext {
    pub(super) options: ParseOptions,
    pub(super) inline: InlineParser,
    warnings: Vec<Warning>,
}

impl ParseContext {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            inline: InlineParser::new(options.parse_semantics, options.max_nesting_depth),
            warnings: vec![],
        }
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub(super) fn nesting_exceeded(&mut self, line: usize) {
        log::warn!(
            "nesting deeper than {} at line {line}; keeping content flat",
            self.options.max_nesting_depth
        );
        self.warn(
            Warning::new(
                WarningCode::MaxNestingExceeded,
                format!(
                    "Content nested deeper than {} levels was flattened",
                    self.options.max_nesting_depth
                ),
            )
            .at_line(line),
        );
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// Builds block nodes from a run of lines.
pub struct BlockParser<'a, 'p> {
    pub(super) lines: &'p [&'a str],
    pub(super) pos: usize,
    first_line_number: usize,
    pub(super) depth: usize,
    pub(super) ctx: &'p mut ParseContext,
}

impl<'a, 'p> BlockParser<'a, 'p> {
    /// `first_line_number` is the 1-based line of `lines[0]` in the original
    /// input; `depth` is the number of enclosing containers.
    pub fn new(
        lines: &'p [&'a str],
        first_line_number: usize,
        depth: usize,
        ctx: &'p mut ParseContext,
    ) -> Self {
        Self {
            lines,
            pos: 0,
            first_line_number,
            depth,
            ctx,
        }
    }

    pub fn parse(mut self) -> Vec<Node> {
        let mut out = Vec::new();
        while !self.eof() {
            if let Some(node) = self.next_block() {
                out.push(node);
            }
        }
        out
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.lines.len()
    }

    pub(super) fn line_number(&self, idx: usize) -> usize {
        self.first_line_number + idx
    }

    fn next_block(&mut self) -> Option<Node> {
        let idx = self.pos;
        let node = match classify(self.lines[idx]) {
            LineClass::Blank => {
                self.pos += 1;
                return None;
            }
            LineClass::FenceOpen(open) => self.code_block(open),
            LineClass::Heading { level, text } => {
                self.pos += 1;
                Node::heading(level, self.inline(text, idx))
            }
            LineClass::ThematicBreak => {
                self.pos += 1;
                Node::HorizontalRule
            }
            LineClass::Quote => self.quote(),
            LineClass::TableRow if self.table_starts_at(idx) => self.table(),
            LineClass::ListItem(item) => match item.kind {
                ItemKind::Task { .. } => self.task_list(item.level),
                ItemKind::Bullet | ItemKind::Ordered { .. } => self.list(item),
            },
            LineClass::TableRow | LineClass::Text => self.paragraph(),
        };
        Some(node)
    }

    /// Inline-parses `text` found on line index `idx`.
    pub(super) fn inline(&mut self, text: &str, idx: usize) -> Vec<Node> {
        let nodes = self.ctx.inline.parse(text);
        if self.ctx.inline.take_truncated() {
            self.ctx.nesting_exceeded(self.line_number(idx));
        }
        nodes
    }

    fn code_block(&mut self, open: FenceOpen<'a>) -> Node {
        let opener = self.pos;
        self.pos += 1;
        let body_start = self.pos;

        while !self.eof() {
            if CodeFence::closes(&open, self.lines[self.pos]) {
                let body = self.lines[body_start..self.pos].join("\n");
                self.pos += 1;
                return Node::code_block(open.language, body);
            }
            self.pos += 1;
        }

        let line = self.line_number(opener);
        log::warn!("code fence opened at line {line} is never closed");
        self.ctx.warn(
            Warning::new(
                WarningCode::UnclosedCodeBlock,
                "Code block is never closed; kept everything up to the end of input",
            )
            .at_line(line)
            .with_suggestion("Add a closing ``` line"),
        );
        Node::code_block(open.language, self.lines[body_start..].join("\n"))
    }

    fn quote(&mut self) -> Node {
        let start = self.pos;
        let mut body = Vec::new();
        while !self.eof() && BlockQuote::is_quoted(self.lines[self.pos]) {
            body.push(BlockQuote::strip_prefix(self.lines[self.pos]));
            self.pos += 1;
        }

        if let Some(attrs) = body.first().and_then(|first| Callout::parse_marker(first)) {
            let content = self.nested(&body[1..], start + 1);
            return Node::Callout {
                attrs,
                content: Node::container_content(content),
            };
        }

        let content = self.nested(&body, start);
        Node::Blockquote {
            content: Node::container_content(content),
        }
    }

    /// Parses a container body, or keeps it as raw text past the nesting cap.
    fn nested(&mut self, lines: &[&'a str], start_idx: usize) -> Vec<Node> {
        let line_number = self.line_number(start_idx);
        if self.depth + 1 > self.ctx.options.max_nesting_depth {
            self.ctx.nesting_exceeded(line_number);
            let raw = Paragraph::join(lines);
            if raw.trim().is_empty() {
                return vec![];
            }
            return vec![Node::paragraph(vec![Node::plain(raw)])];
        }
        BlockParser::new(lines, line_number, self.depth + 1, &mut *self.ctx).parse()
    }

    fn table_starts_at(&self, idx: usize) -> bool {
        Table::is_row(self.lines[idx])
            && self
                .lines
                .get(idx + 1)
                .is_some_and(|next| Table::is_separator(next))
    }

    fn table(&mut self) -> Node {
        let header_idx = self.pos;
        let header = Table::split_cells(self.lines[header_idx]);
        let width = header.len();
        let mut rows = vec![self.table_row(header, header_idx, true)];
        self.pos += 2;

        while !self.eof() && Table::is_row(self.lines[self.pos]) {
            let idx = self.pos;
            let cells = Table::fit_row(Table::split_cells(self.lines[idx]), width);
            rows.push(self.table_row(cells, idx, false));
            self.pos += 1;
        }

        Node::Table { content: rows }
    }

    fn table_row(&mut self, cells: Vec<&str>, idx: usize, header: bool) -> Node {
        let content = cells
            .into_iter()
            .map(|cell| {
                let content = vec![Node::paragraph(self.inline(cell, idx))];
                if header {
                    Node::TableHeader { content }
                } else {
                    Node::TableCell { content }
                }
            })
            .collect();
        Node::TableRow { content }
    }

    fn paragraph(&mut self) -> Node {
        let start = self.pos;
        self.pos += 1;
        while !self.eof() && !self.interrupts_paragraph(self.pos) {
            self.pos += 1;
        }
        let text = Paragraph::join(&self.lines[start..self.pos]);
        Node::paragraph(self.inline(&text, start))
    }

    fn interrupts_paragraph(&self, idx: usize) -> bool {
        match classify(self.lines[idx]) {
            LineClass::TableRow => self.table_starts_at(idx),
            class => class.interrupts_paragraph(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CalloutAttrs, CalloutType, Mark};
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> (Vec<Node>, Vec<Warning>) {
        parse_with(input, ParseOptions::default())
    }

    fn parse_with(input: &str, options: ParseOptions) -> (Vec<Node>, Vec<Warning>) {
        let lines: Vec<&str> = input.lines().collect();
        let mut ctx = ParseContext::new(options);
        let nodes = BlockParser::new(&lines, 1, 0, &mut ctx).parse();
        (nodes, ctx.into_warnings())
    }

    fn para(text: &str) -> Node {
        Node::paragraph(vec![Node::plain(text)])
    }

    #[test]
    fn fenced_code_keeps_body_verbatim() {
        let (nodes, warnings) = parse("```js\nlet x = 1;\n```");
        assert_eq!(nodes, vec![Node::code_block("js", "let x = 1;")]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn code_body_is_a_raw_zone() {
        let (nodes, _) = parse("```\n# not a heading\n**x**\n```");
        assert_eq!(nodes, vec![Node::code_block("", "# not a heading\n**x**")]);
    }

    #[test]
    fn unclosed_fence_warns_and_keeps_body() {
        let (nodes, warnings) = parse("intro\n\n```py\na = 1\nb = 2");
        assert_eq!(
            nodes,
            vec![para("intro"), Node::code_block("py", "a = 1\nb = 2")]
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::UnclosedCodeBlock);
        assert_eq!(warnings[0].line, Some(3));
    }

    #[test]
    fn seven_hashes_is_a_paragraph() {
        let (nodes, _) = parse("####### Not a heading");
        assert_eq!(nodes, vec![para("####### Not a heading")]);
    }

    #[test]
    fn heading_levels() {
        let (nodes, _) = parse("# One\n###### Six");
        assert_eq!(
            nodes,
            vec![
                Node::heading(1, vec![Node::plain("One")]),
                Node::heading(6, vec![Node::plain("Six")]),
            ]
        );
    }

    #[test]
    fn rule_between_paragraphs() {
        let (nodes, _) = parse("above\n\n---\n\nbelow");
        assert_eq!(nodes, vec![para("above"), Node::HorizontalRule, para("below")]);
    }

    #[test]
    fn paragraph_lines_join_with_newlines() {
        let (nodes, _) = parse("one\ntwo\n\nthree");
        assert_eq!(nodes, vec![para("one\ntwo"), para("three")]);
    }

    #[test]
    fn trailing_double_space_is_a_hard_break() {
        let (nodes, _) = parse("one  \ntwo");
        assert_eq!(
            nodes,
            vec![Node::paragraph(vec![
                Node::plain("one"),
                Node::HardBreak,
                Node::plain("two"),
            ])]
        );
    }

    #[test]
    fn heading_interrupts_paragraph() {
        let (nodes, _) = parse("text\n# Head");
        assert_eq!(
            nodes,
            vec![para("text"), Node::heading(1, vec![Node::plain("Head")])]
        );
    }

    #[test]
    fn blockquote_recurses_into_body() {
        let (nodes, _) = parse("> # Title\n> body **b**");
        assert_eq!(
            nodes,
            vec![Node::Blockquote {
                content: vec![
                    Node::heading(1, vec![Node::plain("Title")]),
                    Node::paragraph(vec![
                        Node::plain("body "),
                        Node::text("b", vec![Mark::Bold]),
                    ]),
                ]
            }]
        );
    }

    #[test]
    fn nested_blockquotes() {
        let (nodes, _) = parse("> outer\n> > inner");
        assert_eq!(
            nodes,
            vec![Node::Blockquote {
                content: vec![
                    para("outer"),
                    Node::Blockquote {
                        content: vec![para("inner")]
                    },
                ]
            }]
        );
    }

    #[test]
    fn empty_blockquote_gets_placeholder() {
        let (nodes, _) = parse(">");
        assert_eq!(
            nodes,
            vec![Node::Blockquote {
                content: vec![Node::empty_paragraph()]
            }]
        );
    }

    #[test]
    fn callout_with_title_and_body() {
        let (nodes, _) = parse("> [!tip] Try this\n> - one\n> - two");
        let Node::Callout { attrs, content } = &nodes[0] else {
            panic!("expected callout, got {nodes:?}");
        };
        assert_eq!(
            attrs,
            &CalloutAttrs {
                callout_type: CalloutType::Tip,
                title: Some("Try this".into())
            }
        );
        assert!(matches!(content.as_slice(), [Node::BulletList { content }] if content.len() == 2));
    }

    #[test]
    fn callout_without_body_gets_placeholder() {
        let (nodes, _) = parse("> [!Danger]");
        assert_eq!(
            nodes,
            vec![Node::Callout {
                attrs: CalloutAttrs {
                    callout_type: CalloutType::Danger,
                    title: None
                },
                content: vec![Node::empty_paragraph()],
            }]
        );
    }

    #[test]
    fn unknown_callout_type_is_plain_blockquote() {
        let (nodes, _) = parse("> [!quote] hi");
        assert!(matches!(nodes[0], Node::Blockquote { .. }));
    }

    fn cell(text: &str) -> Node {
        Node::TableCell {
            content: vec![if text.is_empty() {
                Node::empty_paragraph()
            } else {
                para(text)
            }],
        }
    }

    fn header(text: &str) -> Node {
        Node::TableHeader {
            content: vec![para(text)],
        }
    }

    #[test]
    fn table_with_header_and_rows() {
        let (nodes, _) = parse("| a | b |\n| --- | --- |\n| 1 | 2 |\nafter");
        assert_eq!(
            nodes,
            vec![
                Node::Table {
                    content: vec![
                        Node::TableRow {
                            content: vec![header("a"), header("b")]
                        },
                        Node::TableRow {
                            content: vec![cell("1"), cell("2")]
                        },
                    ]
                },
                para("after"),
            ]
        );
    }

    #[test]
    fn short_table_rows_are_padded() {
        let (nodes, warnings) = parse("| a | b | c |\n|---|---|---|\n| 1 | 2 |\n| 1 | 2 | 3 | 4 |");
        assert!(warnings.is_empty());
        let Node::Table { content: rows } = &nodes[0] else {
            panic!("expected table");
        };
        assert_eq!(
            rows[1],
            Node::TableRow {
                content: vec![cell("1"), cell("2"), cell("")]
            }
        );
        assert_eq!(rows[2].children().len(), 3);
    }

    #[test]
    fn pipe_line_without_separator_is_paragraph() {
        let (nodes, _) = parse("| not | a table |\njust text");
        assert_eq!(nodes, vec![para("| not | a table |\njust text")]);
    }

    #[test]
    fn table_interrupts_paragraph() {
        let (nodes, _) = parse("intro\n| a |\n| - |");
        assert_eq!(nodes.len(), 2);
        assert!(matches!(nodes[1], Node::Table { .. }));
    }

    #[test]
    fn nesting_cap_flattens_quotes() {
        let options = ParseOptions {
            max_nesting_depth: 1,
            ..ParseOptions::default()
        };
        let (nodes, warnings) = parse_with("> a\n> > **b**", options);
        assert_eq!(
            nodes,
            vec![Node::Blockquote {
                content: vec![
                    para("a"),
                    Node::Blockquote {
                        content: vec![para("**b**")]
                    },
                ]
            }]
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::MaxNestingExceeded);
        assert_eq!(warnings[0].line, Some(2));
    }
}
