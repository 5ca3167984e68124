pub mod document;
pub mod error;
pub mod export;
pub mod io;
pub mod parsing;
pub mod roundtrip;
pub mod sidecar;
pub mod warnings;

// Re-export key types for easier usage
pub use document::{Mark, Node, NodeKind};
pub use error::ImportError;
pub use export::{ExportOptions, SidecarMeta, build_sidecar, to_markdown};
pub use io::{ImportOptions, ImportedNote, import_note, scan_markdown_files};
pub use parsing::{ParseOptions, ParseResult, ParseStats, parse_markdown, parse_markdown_bytes};
pub use roundtrip::{DiffCategory, Difference, RoundTripReport, verify_round_trip};
pub use sidecar::{Sidecar, enrich_with_sidecar, parse_sidecar};
pub use warnings::{Warning, WarningCode};
