//! # Block Kinds
//!
//! Block-specific types that own their syntax delimiters. The classifier
//! and the block parser call into these; they never hardcode `>`, `#` or
//! fence characters themselves.

pub mod block_quote;
pub mod callout;
pub mod code_fence;
pub mod heading;
pub mod list_item;
pub mod paragraph;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use callout::Callout;
pub use code_fence::{CodeFence, FenceOpen};
pub use heading::Heading;
pub use list_item::{ItemKind, ListItemLine};
pub use paragraph::Paragraph;
pub use table::Table;
pub use thematic_break::ThematicBreak;
