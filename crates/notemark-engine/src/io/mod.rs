//! Reading notes and their sidecars from a notes directory.

use std::fs;
use std::path::{Path, PathBuf};

use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ImportError;
use crate::parsing::{ParseOptions, ParseResult, parse_markdown};
use crate::sidecar::{ParsedSidecar, Sidecar, enrich_with_sidecar, parse_sidecar};

pub const DEFAULT_SIDECAR_EXTENSION: &str = "meta.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportOptions {
    pub parse: ParseOptions,
    /// Extension replacing `.md` to find a note's sidecar.
    pub sidecar_extension: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            sidecar_extension: DEFAULT_SIDECAR_EXTENSION.to_string(),
        }
    }
}

/// A parsed note, enriched from its sidecar when one was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedNote {
    pub path: RelativePathBuf,
    pub result: ParseResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidecar: Option<Sidecar>,
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, ImportError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(ImportError::NotFound(absolute_path));
    }
    let bytes = fs::read(&absolute_path)?;
    Ok(std::str::from_utf8(&bytes)?.to_string())
}

/// Scan for markdown files in the notes directory
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<PathBuf>, ImportError> {
    if !notes_root.is_dir() {
        return Err(ImportError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ImportError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

/// `notes/today.md` → `notes/today.meta.json`
pub fn sidecar_path(markdown_path: &Path, extension: &str) -> PathBuf {
    markdown_path.with_extension(extension)
}

/// Loads a sidecar file. A missing file or one that is not a JSON object
/// is `Ok(None)`.
pub fn load_sidecar(path: &Path) -> Result<Option<ParsedSidecar>, ImportError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    let parsed = parse_sidecar(&text);
    if parsed.is_none() {
        log::warn!("ignoring unreadable sidecar {}", path.display());
    }
    Ok(parsed)
}

/// Enriches `result` in place, appending sidecar and enrichment warnings.
pub fn apply_sidecar(result: &mut ParseResult, parsed: ParsedSidecar) -> Sidecar {
    let ParsedSidecar { sidecar, warnings } = parsed;
    result.warnings.extend(warnings);
    let enriched = enrich_with_sidecar(&result.tree, &sidecar);
    result.tree = enriched.tree;
    result.warnings.extend(enriched.warnings);
    sidecar
}

/// Reads, parses and enriches one note.
pub fn import_note(
    relative_path: &RelativePath,
    notes_root: &Path,
    options: &ImportOptions,
) -> Result<ImportedNote, ImportError> {
    let text = read_file(relative_path, notes_root)?;
    let mut result = parse_markdown(&text, &options.parse);

    let sidecar_file = sidecar_path(
        &relative_path.to_path(notes_root),
        &options.sidecar_extension,
    );
    let sidecar = load_sidecar(&sidecar_file)?.map(|parsed| apply_sidecar(&mut result, parsed));
    log::debug!(
        "imported {relative_path} ({} warnings, sidecar: {})",
        result.warnings.len(),
        sidecar.is_some()
    );

    Ok(ImportedNote {
        path: relative_path.to_relative_path_buf(),
        result,
        sidecar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;
    use crate::warnings::WarningCode;
    use tempfile::TempDir;

    fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn tag_ids(node: &Node, out: &mut Vec<Option<String>>) {
        match node {
            Node::Tag { attrs } => out.push(attrs.id.clone()),
            _ => node.children().iter().for_each(|c| tag_ids(c, out)),
        }
    }

    #[test]
    fn test_scan_nested_markdown_only() {
        let notes_dir = TempDir::new().unwrap();
        create_test_file(&notes_dir, "root.md", "# Root");
        create_test_file(&notes_dir, "sub/nested.md", "# Nested");
        create_test_file(&notes_dir, "root.meta.json", "{}");
        create_test_file(&notes_dir, "image.png", "fake");

        let files = scan_markdown_files(notes_dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("root.md")));
        assert!(files.iter().any(|f| f.ends_with("sub/nested.md")));
    }

    #[test]
    fn test_scan_invalid_notes_directory() {
        let result = scan_markdown_files(Path::new("/this/path/does/not/exist"));
        assert!(matches!(result, Err(ImportError::InvalidNotesDir(_))));
    }

    #[test]
    fn test_read_file_not_found() {
        let notes_dir = TempDir::new().unwrap();
        let result = read_file(RelativePath::new("missing.md"), notes_dir.path());
        assert!(matches!(result, Err(ImportError::NotFound(_))));
    }

    #[test]
    fn test_read_file_rejects_invalid_utf8() {
        let notes_dir = TempDir::new().unwrap();
        fs::write(notes_dir.path().join("bad.md"), [0x66, 0xff, 0x6f]).unwrap();
        let result = read_file(RelativePath::new("bad.md"), notes_dir.path());
        assert!(matches!(result, Err(ImportError::InvalidUtf8(_))));
    }

    #[test]
    fn test_sidecar_path_replaces_extension() {
        assert_eq!(
            sidecar_path(Path::new("notes/today.md"), DEFAULT_SIDECAR_EXTENSION),
            PathBuf::from("notes/today.meta.json")
        );
    }

    #[test]
    fn test_import_without_sidecar() {
        let notes_dir = TempDir::new().unwrap();
        create_test_file(&notes_dir, "note.md", "hello #rust");

        let note = import_note(
            RelativePath::new("note.md"),
            notes_dir.path(),
            &ImportOptions::default(),
        )
        .unwrap();

        assert!(note.sidecar.is_none());
        assert!(note.result.warnings.is_empty());
        assert_eq!(note.path, RelativePath::new("note.md").to_relative_path_buf());
    }

    #[test]
    fn test_import_enriches_from_sidecar() {
        let notes_dir = TempDir::new().unwrap();
        create_test_file(&notes_dir, "daily/note.md", "#rust and #misc");
        create_test_file(
            &notes_dir,
            "daily/note.meta.json",
            r#"{"version":"1.0","schemaVersion":"1","tags":[{"id":"t-1","name":"rust","slug":"rust"}]}"#,
        );

        let note = import_note(
            RelativePath::new("daily/note.md"),
            notes_dir.path(),
            &ImportOptions::default(),
        )
        .unwrap();

        let mut ids = Vec::new();
        tag_ids(&note.result.tree, &mut ids);
        assert_eq!(ids, vec![Some("t-1".to_string()), None]);
        let codes: Vec<_> = note.result.warnings.iter().map(|w| w.code).collect();
        assert_eq!(codes, vec![WarningCode::SidecarTagNotFound]);
        assert_eq!(note.sidecar.unwrap().tags.len(), 1);
    }

    #[test]
    fn test_unreadable_sidecar_counts_as_absent() {
        let notes_dir = TempDir::new().unwrap();
        create_test_file(&notes_dir, "note.md", "#rust");
        create_test_file(&notes_dir, "note.meta.json", "not json");

        let note = import_note(
            RelativePath::new("note.md"),
            notes_dir.path(),
            &ImportOptions::default(),
        )
        .unwrap();

        assert!(note.sidecar.is_none());
        assert!(note.result.warnings.is_empty());
    }
}
