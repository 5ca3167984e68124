//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`Escape`**: `BACKSLASH` plus the set of escapable characters
//! - **`Envelope`**: HTML-comment wrappers carrying resolved tag/wiki-link ids
//! - **`WikiLink`**: `OPEN = "[["`, `CLOSE = "]]"`, `ALIAS = '|'`
//! - **`Tag`**: `HASH = '#'` and the name length bounds
//! - **`CodeSpan`**: `TICK = '\`'` - raw zone that suppresses other parsing
//! - **`Delimiter`**: emphasis and strikethrough runs
//! - **`Link`**: `[text](href)` with balanced bracket/paren scanning
//!
//! The parser calls these types; it never hardcodes `[[` or `` ` ``.

pub mod code_span;
pub mod emphasis;
pub mod envelope;
pub mod escape;
pub mod link;
pub mod tag;
pub mod wikilink;

pub use code_span::CodeSpan;
pub use emphasis::Delimiter;
pub use envelope::Envelope;
pub use escape::Escape;
pub use link::{Link, LinkMatch};
pub use tag::Tag;
pub use wikilink::WikiLink;
