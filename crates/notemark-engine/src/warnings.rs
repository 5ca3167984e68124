use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable warning identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    UnclosedFrontmatter,
    UnclosedCodeBlock,
    MaxNestingExceeded,
    SidecarMissingVersion,
    SidecarMissingSchemaVersion,
    SidecarInvalidTags,
    SidecarInvalidWikilinks,
    SidecarNoValidTags,
    SidecarTagNotFound,
}

impl WarningCode {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningCode::UnclosedFrontmatter => "UNCLOSED_FRONTMATTER",
            WarningCode::UnclosedCodeBlock => "UNCLOSED_CODE_BLOCK",
            WarningCode::MaxNestingExceeded => "MAX_NESTING_EXCEEDED",
            WarningCode::SidecarMissingVersion => "SIDECAR_MISSING_VERSION",
            WarningCode::SidecarMissingSchemaVersion => "SIDECAR_MISSING_SCHEMA_VERSION",
            WarningCode::SidecarInvalidTags => "SIDECAR_INVALID_TAGS",
            WarningCode::SidecarInvalidWikilinks => "SIDECAR_INVALID_WIKILINKS",
            WarningCode::SidecarNoValidTags => "SIDECAR_NO_VALID_TAGS",
            WarningCode::SidecarTagNotFound => "SIDECAR_TAG_NOT_FOUND",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal anomaly found while importing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub code: WarningCode,
    pub message: String,
    /// 1-based line in the original input, when the anomaly has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Warning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            line: None,
            suggestion: None,
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} (line {line}): {}", self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}
