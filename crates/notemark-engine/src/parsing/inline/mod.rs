//! # Inline Parsing
//!
//! Cursor-based inline parsing over the text of one block (paragraph,
//! heading, list/task item, table cell).
//!
//! ## Architecture
//!
//! At each cursor position the constructs are tried in a fixed priority
//! order (escape, envelopes, wiki-links, tags, code spans, emphasis, links,
//! hard breaks); unmatched characters accumulate into a pending text buffer.
//! Delimited constructs recurse over their interior with an extended
//! [`ActiveMarks`] set, so the outer set is restored on return without any
//! mutation. Pending text is flushed with the marks active at that level.
//!
//! ## Modules
//!
//! - **`kinds`**: inline-specific types with owned delimiters
//! - **`cursor`**: `Cursor` for character-by-character parsing
//! - **`parser`**: [`InlineParser`] and its `try_*` helpers
//!
//! ## Raw Zone Precedence
//!
//! Code spans are raw zones: `` `[[not a link]]` `` is one text node with a
//! code mark, not text containing a wiki-link.
//!
//! [`ActiveMarks`]: crate::document::ActiveMarks

pub mod cursor;
pub mod kinds;
pub mod parser;

pub use parser::{InlineParser, parse_inline};
