//! # Block Parsing
//!
//! Line-oriented block parsing with a cursor over the input lines.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    [`LineClass`] from local facts only, trying block patterns in priority
//!    order (fence, heading, rule, quote, table row, list item, text).
//!
//! 2. **Block Construction** (`parser`, `list`): a [`BlockParser`] walks the
//!    lines, consumes each block's extent and builds [`Node`]s, calling the
//!    inline parser for block text. Blockquotes and callouts recurse into a
//!    fresh `BlockParser` over their dedented body; nested lists recurse
//!    within the same parser.
//!
//! ## Modules
//!
//! - **`kinds`**: block-specific types owning their delimiters
//! - **`classify`**: [`classify`] produces a [`LineClass`] per line
//! - **`parser`**: [`BlockParser`] and [`ParseContext`]
//! - **`list`**: the shared bullet/ordered list algorithm and task lists
//!
//! ## Key Invariants
//!
//! - Fenced code blocks are raw zones: no block/inline parsing inside
//! - Containers never end up with empty content
//! - Nesting deeper than `max_nesting_depth` is flattened, never recursed
//!
//! [`Node`]: crate::document::Node

pub mod classify;
pub mod kinds;
mod list;
pub mod parser;

pub use classify::{LineClass, classify};
pub use parser::{BlockParser, ParseContext};
