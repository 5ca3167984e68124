//! # Markdown Import
//!
//! Turns markdown text into a [`Node::Doc`] tree.
//!
//! ```text
//! text → lines → frontmatter::strip → blocks::BlockParser → Doc
//!                                          ↳ inline::InlineParser (per block)
//! ```
//!
//! Parsing never fails on malformed markdown. Anomalies (unclosed fences,
//! unclosed frontmatter, nesting past the configured cap) are reported as
//! [`Warning`]s next to a best-effort tree.

pub mod blocks;
pub mod frontmatter;
pub mod inline;

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::document::Node;
use crate::error::ImportError;
use crate::warnings::Warning;

use blocks::{BlockParser, ParseContext};

/// Knobs for [`parse_markdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Recognise `<!-- tag … -->` / `<!-- wikilink … -->` envelopes.
    pub parse_semantics: bool,
    /// Drop a leading `---` delimited metadata block.
    pub strip_frontmatter: bool,
    /// Maximum container/emphasis nesting before content is kept flat.
    pub max_nesting_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            parse_semantics: true,
            strip_frontmatter: true,
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    /// Block nodes at any depth, excluding the root.
    pub block_count: usize,
    /// Inline nodes (text, hard breaks, tags, wiki-links) at any depth.
    pub inline_node_count: usize,
    pub parse_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub tree: Node,
    pub warnings: Vec<Warning>,
    pub stats: ParseStats,
    /// Raw text between the frontmatter delimiters, if a block was stripped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<String>,
}

/// Parses markdown text into a document tree.
pub fn parse_markdown(text: &str, options: &ParseOptions) -> ParseResult {
    let started = Instant::now();
    let mut warnings = Vec::new();

    let lines: Vec<&str> = text.lines().collect();
    let stripped = frontmatter::strip(lines, options.strip_frontmatter, &mut warnings);

    let mut ctx = ParseContext::new(*options);
    let content =
        BlockParser::new(&stripped.lines, stripped.first_line_number, 0, &mut ctx).parse();
    warnings.extend(ctx.into_warnings());

    let tree = Node::doc(content);
    let (block_count, inline_node_count) = tree.count_nodes();
    let stats = ParseStats {
        block_count,
        inline_node_count,
        parse_time_ms: started.elapsed().as_secs_f64() * 1000.0,
    };
    log::debug!(
        "parsed {block_count} blocks / {inline_node_count} inline nodes with {} warnings",
        warnings.len()
    );

    ParseResult {
        tree,
        warnings,
        stats,
        frontmatter: stripped.frontmatter,
    }
}

/// Like [`parse_markdown`], for raw bytes. Fails only when `bytes` is not UTF-8.
pub fn parse_markdown_bytes(bytes: &[u8], options: &ParseOptions) -> Result<ParseResult, ImportError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(parse_markdown(text, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warnings::WarningCode;

    #[test]
    fn empty_input_yields_empty_doc() {
        let result = parse_markdown("", &ParseOptions::default());
        assert_eq!(result.tree, Node::doc(vec![]));
        assert!(result.warnings.is_empty());
        assert_eq!(result.stats.block_count, 0);
        assert_eq!(result.stats.inline_node_count, 0);
    }

    #[test]
    fn frontmatter_is_reported_and_removed() {
        let result = parse_markdown("---\ntitle: x\n---\nbody", &ParseOptions::default());
        assert_eq!(result.frontmatter.as_deref(), Some("title: x"));
        assert_eq!(
            result.tree,
            Node::doc(vec![Node::paragraph(vec![Node::plain("body")])])
        );
    }

    #[test]
    fn warning_lines_account_for_stripped_frontmatter() {
        let result = parse_markdown("---\na: 1\n---\n\n```\nnever closed", &ParseOptions::default());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, WarningCode::UnclosedCodeBlock);
        assert_eq!(result.warnings[0].line, Some(5));
    }

    #[test]
    fn stats_count_blocks_and_inlines() {
        let result = parse_markdown("# Title\n\n- a\n- b", &ParseOptions::default());
        // heading, bulletList, 2 × (listItem + paragraph)
        assert_eq!(result.stats.block_count, 6);
        assert_eq!(result.stats.inline_node_count, 3);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = parse_markdown_bytes(&[0x66, 0xff, 0x6f], &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ImportError::InvalidUtf8(_)));
    }

    #[test]
    fn crlf_input_parses_like_lf() {
        let options = ParseOptions::default();
        assert_eq!(
            parse_markdown("# A\r\n\r\ntext\r\n", &options).tree,
            parse_markdown("# A\n\ntext\n", &options).tree
        );
    }
}
